//! Desktop notification delivery through notify-send

use tokio::process::Command;
use tracing::{debug, info};

const APP_NAME: &str = "interval-timer";

/// Show a desktop notification with critical urgency
pub async fn send_desktop_notification(title: &str, body: &str) -> Result<(), String> {
    debug!("Sending desktop notification: {}", title);

    let output = Command::new("notify-send")
        .args(["--urgency=critical", "--app-name", APP_NAME, title, body])
        .output()
        .await
        .map_err(|e| format!("Failed to execute notify-send: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("notify-send failed: {}", stderr));
    }

    info!("Desktop notification delivered");
    Ok(())
}

/// Check if notify-send is available on the system
pub async fn check_notify_send_available() -> Result<(), String> {
    Command::new("notify-send")
        .arg("--version")
        .output()
        .await
        .map_err(|_| "notify-send is not available; desktop notifications need libnotify.".to_string())?;

    info!("notify-send is available");
    Ok(())
}

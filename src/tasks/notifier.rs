//! Notification dispatch background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::{services::send_desktop_notification, state::AppState};

/// Background task that delivers workout notifications.
///
/// Every notification is logged; with `desktop` set it is also handed to the
/// desktop notification daemon. Failed deliveries are not retried.
pub async fn notification_task(state: Arc<AppState>, desktop: bool) {
    info!("Starting notification task (desktop notifications {})",
          if desktop { "enabled" } else { "disabled" });

    let mut notification_rx = state.notification_tx.subscribe();

    loop {
        match notification_rx.recv().await {
            Ok(notification) => {
                info!("{}: {}", notification.title, notification.body);

                if desktop {
                    if let Err(e) = send_desktop_notification(&notification.title, &notification.body).await {
                        warn!("Failed to deliver desktop notification: {}", e);
                    }
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Notification task lagged, {} notifications skipped", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Notification channel closed, stopping notification task");
                break;
            }
        }
    }
}

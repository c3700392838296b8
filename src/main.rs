//! Interval Timer - An HTTP-controlled interval workout timer
//!
//! This is the main entry point for the interval-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use interval_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    services::check_notify_send_available,
    tasks::{display_log_task, notification_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("interval_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting interval-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms, desktop_notify={}",
          config.host, config.port, config.tick_ms, config.desktop_notify);

    // Desktop delivery is optional; notifications are still logged without it
    let mut desktop_notify = config.desktop_notify;
    if desktop_notify {
        if let Err(e) = check_notify_send_available().await {
            warn!("{}; falling back to log-only notifications", e);
            desktop_notify = false;
        }
    }

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.tick_period()));

    // Start the notification and display background tasks
    let notifier_state = Arc::clone(&state);
    tokio::spawn(async move {
        notification_task(notifier_state, desktop_notify).await;
    });
    tokio::spawn(display_log_task(state.display_rx.clone()));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start  - Start a workout (JSON: numberOfIntervals, workoutDuration, restDuration) or resume");
    info!("  POST /pause  - Pause the work countdown");
    info!("  POST /toggle - Start/Pause button");
    info!("  POST /reset  - Reset to idle");
    info!("  GET  /status - Current phase, countdown and display");
    info!("  GET  /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

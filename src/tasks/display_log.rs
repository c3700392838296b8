//! Console rendering of the workout display

use tokio::sync::watch;
use tracing::{debug, info};

use crate::state::DisplayState;

/// Background task that logs the countdown text and reminder whenever they change
pub async fn display_log_task(mut display_rx: watch::Receiver<DisplayState>) {
    debug!("Starting display log task");

    let mut last_text = String::new();
    let mut last_reminder = String::new();

    while display_rx.changed().await.is_ok() {
        let view = display_rx.borrow_and_update().clone();

        if !view.reminder.is_empty() && view.reminder != last_reminder {
            info!("{}", view.reminder);
        }
        if !view.countdown_text.is_empty() && view.countdown_text != last_text {
            info!("[{}] {}", view.phase, view.countdown_text);
        }
        if let Some(error) = &view.validation_error {
            debug!("Display shows error on {}: {}", error.field, error.message);
        }

        last_text = view.countdown_text;
        last_reminder = view.reminder;
    }

    debug!("Display channel closed, stopping display log task");
}

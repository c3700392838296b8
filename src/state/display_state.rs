//! Display state published to clients, and the channel-backed UI that maintains it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use crate::workout::{controller::COMPLETE_TITLE, InputField, PhaseKind, WorkoutUi};

/// A progress indicator counting down from `max` to 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub max: u32,
    pub value: u32,
}

impl Progress {
    fn set(&mut self, value: u32, max: u32) {
        self.max = max;
        self.value = value;
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Inline error attached to one input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: InputField,
    pub message: String,
}

/// Everything the workout screen shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    pub phase: PhaseKind,
    pub countdown_text: String,
    pub work_progress: Progress,
    pub rest_progress: Progress,
    pub reminder: String,
    pub validation_error: Option<FieldError>,
}

impl DisplayState {
    pub fn new() -> Self {
        Self {
            phase: PhaseKind::Idle,
            countdown_text: String::new(),
            work_progress: Progress::default(),
            rest_progress: Progress::default(),
            reminder: String::new(),
            validation_error: None,
        }
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

/// A notification raised by the workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

/// [`WorkoutUi`] that keeps a [`DisplayState`] and publishes it over channels
#[derive(Debug)]
pub struct ChannelUi {
    display: DisplayState,
    notifications_sent: usize,
    last_notification: Option<Notification>,
    display_tx: watch::Sender<DisplayState>,
    notification_tx: broadcast::Sender<Notification>,
}

impl ChannelUi {
    pub fn new(
        display_tx: watch::Sender<DisplayState>,
        notification_tx: broadcast::Sender<Notification>,
    ) -> Self {
        Self {
            display: DisplayState::new(),
            notifications_sent: 0,
            last_notification: None,
            display_tx,
            notification_tx,
        }
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Number of notifications sent since startup
    pub fn notifications_sent(&self) -> usize {
        self.notifications_sent
    }

    pub fn last_notification(&self) -> Option<&Notification> {
        self.last_notification.as_ref()
    }

    fn publish(&self) {
        // send_replace never fails, even with no subscribers left
        self.display_tx.send_replace(self.display.clone());
    }
}

impl WorkoutUi for ChannelUi {
    fn display_progress(&mut self, phase: PhaseKind, remaining_seconds: u32, total_seconds: u32) {
        let display = &mut self.display;
        display.phase = phase;

        match phase {
            PhaseKind::Working | PhaseKind::Paused => {
                display.validation_error = None;
                display.work_progress.set(remaining_seconds, total_seconds);
                display.countdown_text = format!("{} seconds remaining", remaining_seconds);
            }
            PhaseKind::Resting => {
                display.rest_progress.set(remaining_seconds, total_seconds);
                display.countdown_text = format!("{} seconds remaining", remaining_seconds);
            }
            PhaseKind::Complete => {
                display.work_progress.value = 0;
                display.rest_progress.value = 0;
                display.countdown_text = COMPLETE_TITLE.to_string();
            }
            PhaseKind::Idle => {
                display.work_progress.clear();
                display.rest_progress.clear();
                display.countdown_text.clear();
                display.validation_error = None;
            }
        }

        self.publish();
    }

    fn show_notification(&mut self, title: &str, body: &str) {
        info!("Notification: {} - {}", title, body);

        let notification = Notification {
            title: title.to_string(),
            body: body.to_string(),
            sent_at: Utc::now(),
        };
        self.notifications_sent += 1;
        self.last_notification = Some(notification.clone());

        if let Err(e) = self.notification_tx.send(notification) {
            warn!("No notification listeners, dropping: {}", e);
        }
    }

    fn report_validation_error(&mut self, field: InputField, message: &str) {
        warn!("Validation error on {}: {}", field, message);
        self.display.validation_error = Some(FieldError {
            field,
            message: message.to_string(),
        });
        self.publish();
    }

    fn show_reminder(&mut self, text: &str) {
        self.display.reminder = text.to_string();
        self.publish();
    }
}

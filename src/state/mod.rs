//! State management module
//!
//! Shared application state and the display the workout reports into.

pub mod app_state;
pub mod display_state;

// Re-export main types
pub use app_state::{AppError, AppState};
pub use display_state::{ChannelUi, DisplayState, FieldError, Notification, Progress};

//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod display_log;
pub mod notifier;
pub mod ticker;

// Re-export main functions
pub use display_log::display_log_task;
pub use notifier::notification_task;
pub use ticker::tick_task;

//! Interval Timer - An HTTP-controlled interval workout timer
//!
//! This library provides an interval countdown that alternates work and rest
//! phases for a number of intervals and notifies the user when the workout
//! is complete.

pub mod config;
pub mod workout;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;

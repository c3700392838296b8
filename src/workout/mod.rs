//! Workout module
//!
//! The platform-free interval countdown: input validation, the controller
//! state machine and the UI capability it reports through.

pub mod controller;
pub mod error;
pub mod input;
pub mod ui;

// Re-export main types
pub use controller::{IntervalController, PhaseKind, RunSnapshot, RunState};
pub use error::ControlError;
pub use input::{FieldValue, InputField, WorkoutConfig, WorkoutInput};
pub use ui::WorkoutUi;

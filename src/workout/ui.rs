//! Capability interface between the controller and whatever presents it

use super::{controller::PhaseKind, input::InputField};

/// Presentation side of a workout: progress display, notifications and
/// field-level errors. The controller only talks to this trait.
pub trait WorkoutUi {
    /// Show the countdown for `phase`; `total_seconds` is the full length of
    /// the phase and bounds the matching progress indicator.
    fn display_progress(&mut self, phase: PhaseKind, remaining_seconds: u32, total_seconds: u32);

    /// One-shot user notification
    fn show_notification(&mut self, title: &str, body: &str);

    fn report_validation_error(&mut self, field: InputField, message: &str);

    /// Phase reminder label; an empty string clears it
    fn show_reminder(&mut self, _text: &str) {}
}

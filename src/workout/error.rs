//! Errors raised by workout control actions

use thiserror::Error;

use super::{controller::PhaseKind, input::InputField};

/// Rejected control action. The run state is left untouched in every case.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    /// A required field was left empty
    #[error("{}", .0.prompt())]
    MissingInput(InputField),

    /// A field holds something other than a positive whole number
    #[error("{field} must be a positive whole number, got {value:?}")]
    InvalidInput { field: InputField, value: String },

    #[error("cannot start a workout while {0}")]
    NotStartable(PhaseKind),

    /// Only the work phase can be paused
    #[error("cannot pause while {0}")]
    NotPausable(PhaseKind),
}

impl ControlError {
    /// The input field this error refers to, if any
    pub fn field(&self) -> Option<InputField> {
        match self {
            ControlError::MissingInput(field) => Some(*field),
            ControlError::InvalidInput { field, .. } => Some(*field),
            ControlError::NotStartable(_) | ControlError::NotPausable(_) => None,
        }
    }
}

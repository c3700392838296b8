//! Workout input fields and their validation

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ControlError;

/// The three user-entered fields of a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputField {
    NumberOfIntervals,
    WorkoutDuration,
    RestDuration,
}

impl InputField {
    /// Key used for the field in requests and error responses
    pub fn key(&self) -> &'static str {
        match self {
            InputField::NumberOfIntervals => "numberOfIntervals",
            InputField::WorkoutDuration => "workoutDuration",
            InputField::RestDuration => "restDuration",
        }
    }

    /// Message shown next to the field when it is left empty
    pub fn prompt(&self) -> &'static str {
        match self {
            InputField::NumberOfIntervals => "Please enter the number of intervals",
            InputField::WorkoutDuration => "Please enter the workout duration",
            InputField::RestDuration => "Please enter the rest duration",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw content of an input field: a JSON scalar or text as typed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(i64),
    Fraction(f64),
    Flag(bool),
    Text(String),
}

/// Unvalidated workout form, as submitted by the client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutInput {
    #[serde(default)]
    pub number_of_intervals: Option<FieldValue>,
    #[serde(default)]
    pub workout_duration: Option<FieldValue>,
    #[serde(default)]
    pub rest_duration: Option<FieldValue>,
}

impl WorkoutInput {
    /// Build an input from already-numeric values
    pub fn new(intervals: u32, work_seconds: u32, rest_seconds: u32) -> Self {
        Self {
            number_of_intervals: Some(FieldValue::Number(intervals.into())),
            workout_duration: Some(FieldValue::Number(work_seconds.into())),
            rest_duration: Some(FieldValue::Number(rest_seconds.into())),
        }
    }

    /// Validate every field in form order and capture the workout configuration.
    ///
    /// The first empty field wins, matching the order the form is read in.
    pub fn validate(&self) -> Result<WorkoutConfig, ControlError> {
        let interval_count = parse_field(InputField::NumberOfIntervals, &self.number_of_intervals)?;
        let work_duration_seconds = parse_field(InputField::WorkoutDuration, &self.workout_duration)?;
        let rest_duration_seconds = parse_field(InputField::RestDuration, &self.rest_duration)?;

        Ok(WorkoutConfig {
            interval_count,
            work_duration_seconds,
            rest_duration_seconds,
        })
    }
}

fn parse_field(field: InputField, value: &Option<FieldValue>) -> Result<u32, ControlError> {
    let invalid = |raw: String| ControlError::InvalidInput { field, value: raw };

    match value {
        None => Err(ControlError::MissingInput(field)),
        Some(FieldValue::Text(text)) if text.trim().is_empty() => {
            Err(ControlError::MissingInput(field))
        }
        Some(FieldValue::Text(text)) => {
            let trimmed = text.trim();
            match trimmed.parse::<u32>() {
                Ok(n) if n > 0 => Ok(n),
                _ => Err(invalid(trimmed.to_string())),
            }
        }
        Some(FieldValue::Number(n)) => match u32::try_from(*n) {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(invalid(n.to_string())),
        },
        Some(FieldValue::Fraction(x)) => Err(invalid(x.to_string())),
        Some(FieldValue::Flag(b)) => Err(invalid(b.to_string())),
    }
}

/// Validated workout parameters, fixed for the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutConfig {
    pub interval_count: u32,
    pub work_duration_seconds: u32,
    pub rest_duration_seconds: u32,
}

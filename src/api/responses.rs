//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    state::DisplayState,
    workout::RunSnapshot,
};

/// API response structure for control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub run: Option<RunSnapshot>,
    /// Input field the error refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, run: Option<RunSnapshot>) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            run,
            field: None,
        }
    }

    /// Create a response reporting the phase the workout is now in
    pub fn phase(message: String, run: RunSnapshot) -> Self {
        Self::new(run.phase.to_string(), message, Some(run))
    }

    /// Create an error response
    pub fn error(message: String, run: Option<RunSnapshot>) -> Self {
        Self::new("error".to_string(), message, run)
    }

    /// Attach the offending input field
    pub fn with_field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }
}

/// Status response with the full display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub run: RunSnapshot,
    pub display: DisplayState,
    pub notifications_sent: usize,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

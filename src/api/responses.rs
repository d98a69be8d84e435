//! API response structures

use axum::{http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{calc::ValidationError, state::TimerState};

/// Response for timer operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerResponse {
    pub status: String,
    pub message: String,
    /// Whether the operation changed the timer's run state
    pub accepted: bool,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerState,
}

impl TimerResponse {
    /// Create a new timer response
    pub fn new(accepted: bool, message: String, timer: TimerState) -> Self {
        Self {
            status: if accepted { "accepted" } else { "ignored" }.to_string(),
            message,
            accepted,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Create a response for an operation that always applies
    pub fn applied(message: String, timer: TimerState) -> Self {
        Self::new(true, message, timer)
    }
}

/// Overall server and timer status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub stopwatch: TimerState,
    pub backwash: TimerState,
    pub backwash_pause_enabled: bool,
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

/// Error body returned with non-2xx statuses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: String, fields: Vec<String>) -> Self {
        Self {
            status: "error".to_string(),
            message,
            fields,
            timestamp: Utc::now(),
        }
    }
}

/// Status code plus JSON error body
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(code: StatusCode, message: impl Into<String>) -> ApiError {
    (code, Json(ErrorResponse::new(message.into(), Vec::new())))
}

impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        Self::new(err.message, err.fields)
    }
}

/// Map calculator rejections to 422
pub fn validation_error(err: ValidationError) -> ApiError {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(err.into()))
}

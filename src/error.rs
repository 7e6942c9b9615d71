// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::track::TrackError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    ValidationError {
        message: String,
        detail: Option<Value>,
    },
    InvalidJson(String),

    // 500 Internal Server Error (upstream detail passed through when known)
    InternalServerError {
        message: String,
        detail: Option<Value>,
    },
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::ValidationError { .. } => 400,
            ApiError::InvalidJson(_) => 400,
            ApiError::InternalServerError { .. } => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::ValidationError { message, .. } => message,
            ApiError::InvalidJson(msg) => msg,
            ApiError::InternalServerError { message, .. } => message,
        }
    }

    pub fn detail(&self) -> Option<&Value> {
        match self {
            ApiError::ValidationError { detail, .. } => detail.as_ref(),
            ApiError::InternalServerError { detail, .. } => detail.as_ref(),
            ApiError::InvalidJson(_) => None,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::InternalServerError { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Convert to JSON response body: `{ error, code, detail? }`
    pub fn to_json(&self) -> Value {
        let mut response = json!({
            "error": self.message(),
            "code": self.error_code()
        });

        if let Some(detail) = self.detail() {
            response["detail"] = detail.clone();
        }

        response
    }
}

// Static constructor methods
impl ApiError {
    pub fn validation_error(message: impl Into<String>, detail: Option<Value>) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            detail,
        }
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>, detail: Option<Value>) -> Self {
        ApiError::InternalServerError {
            message: message.into(),
            detail,
        }
    }
}

impl From<TrackError> for ApiError {
    fn from(err: TrackError) -> Self {
        match err {
            TrackError::InvalidDomain(msg) => ApiError::validation_error(msg, None),
            TrackError::Status { status, body } => {
                tracing::error!(status, "Track API error");
                let message = format!("Track API returned HTTP {}", status);
                ApiError::internal_server_error(message, Some(json!({ "status": status, "body": body })))
            }
            TrackError::Transport(e) => {
                tracing::error!("Track request failed: {}", e);
                let detail = e.status().map(|s| json!({ "status": s.as_u16() }));
                ApiError::internal_server_error(format!("Track API request failed: {}", e), detail)
            }
            err @ TrackError::Decode(_) => {
                tracing::error!("{}", err);
                ApiError::internal_server_error(err.to_string(), None)
            }
            err @ TrackError::InvalidUrl(_) => {
                tracing::error!("{}", err);
                ApiError::internal_server_error("Track API base URL is misconfigured", None)
            }
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        ApiError::invalid_json(rejection.body_text())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

use serde_json::Value;
use thiserror::Error;

/// Failures talking to the Track PMS API
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Track API returned HTTP {status}")]
    Status { status: u16, body: Option<Value> },

    #[error("Track API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Track API response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TrackError {
    /// Build a status error from a non-success response, keeping its payload
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let body = if text.trim().is_empty() {
            None
        } else {
            Some(serde_json::from_str(&text).unwrap_or(Value::String(text)))
        };
        TrackError::Status { status, body }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            TrackError::Status { status, .. } => Some(*status),
            TrackError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

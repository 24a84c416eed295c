//! Errors raised while talking to the Sheets API

use reqwest::StatusCode;
use thiserror::Error;

use super::models::GoogleErrorBody;

/// Failure of a single call against the remote spreadsheet service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The service answered with a non-success status code
    #[error("remote returned {status}: {reason}")]
    Status { status: u16, reason: String },

    /// No access token could be obtained
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The request never produced a response (connect, TLS, timeout)
    #[error("transport error: {0}")]
    Transport(String),

    /// A success response carried a body we could not parse
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Build a `Status` error from a raw response status and body.
    ///
    /// Google wraps failures as `{"error": {"message": ...}}`; when the body
    /// is something else the canonical reason phrase is used.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let reason = serde_json::from_str::<GoogleErrorBody>(body)
            .ok()
            .map(|b| b.error.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown Error")
                    .to_string()
            });

        ClientError::Status {
            status: status.as_u16(),
            reason,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

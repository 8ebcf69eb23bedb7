//! Server-side failure reported by a console endpoint.
//!
//! The console never interprets the failure: whatever the server sent back is
//! what the user sees.

use std::fmt;

/// Non-success response from a console endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code of the response
    pub status: reqwest::StatusCode,
    /// Raw response body, untouched
    pub body: String,
}

impl ApiError {
    pub fn new(status: reqwest::StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Raw body when the server sent one, otherwise the status line.
    pub fn user_message(&self) -> String {
        if self.body.trim().is_empty() {
            let reason = self.status.canonical_reason().unwrap_or("error");
            format!("DOH: {} {}", self.status.as_u16(), reason)
        } else {
            self.body.clone()
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {}

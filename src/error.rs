// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for the Google login flow.

/// Failure of a token exchange, user-info fetch or record reconstruction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OAuthError {
    /// Google answered with something other than `200 OK`.
    #[error("Invalid response code, expected 200 received {0}")]
    UpstreamStatus(u16),

    /// The response body was empty, not JSON, or not shaped as expected.
    #[error("Unable to decode response: {0}")]
    MalformedResponse(String),

    /// A required key was absent from a response body or stored map.
    #[error("Missing required key of \"{0}\"")]
    MissingField(String),

    /// A key was present but its value could not be used.
    #[error("Invalid value for \"{field}\": {reason}")]
    InvalidField { field: String, reason: String },

    /// The request never produced a usable response.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl OAuthError {
    /// Transport failures are logged as critical, everything else as an error.
    pub fn is_critical(&self) -> bool {
        matches!(self, OAuthError::Transport(_))
    }

    pub(crate) fn invalid_field(field: &str, reason: impl ToString) -> Self {
        OAuthError::InvalidField {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<reqwest::Error> for OAuthError {
    fn from(err: reqwest::Error) -> Self {
        OAuthError::Transport(err.to_string())
    }
}

/// Result type alias for the service and record operations.
pub type Result<T> = std::result::Result<T, OAuthError>;

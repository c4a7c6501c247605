//! Client error types.

use std::time::Duration;

use http::StatusCode;
use thiserror::Error;

/// Convenience alias for client return types.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by the client.
///
/// `Clone` so a single renewal failure can be delivered to every request
/// that was queued behind it.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Refresh credential rejected: {message}")]
    RefreshRejected { message: String },

    #[error("Session renewal timed out after {0:?}")]
    RefreshTimedOut(Duration),

    /// Renewal failed for any reason other than a refused credential or a
    /// timeout; `source` is what the renewal call itself returned.
    #[error("Session renewal failed: {source}")]
    RenewalFailed {
        #[source]
        source: Box<ClientError>,
    },

    #[error("Request rejected by backend: {0}")]
    Rejected(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// HTTP status carried by the error, if the backend answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::RefreshRejected { .. } => Some(StatusCode::FORBIDDEN),
            ClientError::RenewalFailed { source } => source.status(),
            _ => None,
        }
    }

    /// True for a 401 that reached the caller (an already-retried request).
    /// A renewal call answering 401 is terminal instead.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED) && !self.is_session_terminal()
    }

    /// True when this error ended the session: the renewal was refused, timed
    /// out or failed, and a logout was forced.
    pub fn is_session_terminal(&self) -> bool {
        matches!(
            self,
            ClientError::RefreshRejected { .. }
                | ClientError::RefreshTimedOut(_)
                | ClientError::RenewalFailed { .. }
        )
    }

    /// Wrap an error returned by the renewal call so callers can tell it
    /// apart from an ordinary failure of their own request.
    pub(crate) fn renewal(self) -> Self {
        match self {
            terminal @ (ClientError::RefreshRejected { .. }
            | ClientError::RefreshTimedOut(_)
            | ClientError::RenewalFailed { .. }) => terminal,
            other => ClientError::RenewalFailed {
                source: Box::new(other),
            },
        }
    }

    /// Backend-provided message when present, otherwise `fallback`.
    ///
    /// Mirrors what the resource layer shows to an operator: the server's own
    /// wording for status failures, a generic line for everything else.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Status { message, .. }
            | ClientError::RefreshRejected { message }
            | ClientError::Rejected(message)
                if !message.is_empty() =>
            {
                message.clone()
            }
            ClientError::RenewalFailed { source } => source.user_message(fallback),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(e: url::ParseError) -> Self {
        ClientError::Config(e.to_string())
    }
}

//! Error types for reconciliation and the remote API seam

use thiserror::Error;

/// A constraint violated locally, before any network call is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {message}")]
pub struct ValidationError {
    /// The attribute or input the error refers to (e.g. "name", "id")
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Error from the remote management API or the transport beneath it
///
/// NotFound is never represented here; the seam reports it through
/// `Option` / `DeleteOutcome` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The caller cancelled while the call was in flight
    #[error("operation cancelled")]
    Cancelled,

    /// Failure establishing or completing the HTTP exchange
    #[error("transport error: {0}")]
    Transport(String),

    /// Token acquisition failed
    #[error("authentication error: {0}")]
    Auth(String),

    /// The API answered with a non-success status
    #[error("remote API returned {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// The response body did not match the expected shape
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Result type for seam operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Top-level error for reconciler operations
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A remote call failed; carries the operation being attempted
    #[error("{context}: {source}")]
    Remote {
        context: String,
        #[source]
        source: ApiError,
    },

    #[error("operation cancelled")]
    Cancelled,
}

impl ReconcileError {
    /// Wrap an API error with operation context, keeping cancellation distinct
    pub fn remote(context: impl Into<String>, source: ApiError) -> Self {
        match source {
            ApiError::Cancelled => Self::Cancelled,
            source => Self::Remote {
                context: context.into(),
                source,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_wrapper_keeps_cancellation_distinct() {
        let err = ReconcileError::remote("error reading account", ApiError::Cancelled);
        assert!(matches!(err, ReconcileError::Cancelled));
    }

    #[test]
    fn remote_wrapper_prefixes_context() {
        let err = ReconcileError::remote(
            "error creating media services account \"ams-2\"",
            ApiError::Api {
                status: 500,
                code: "InternalServerError".to_string(),
                message: "boom".to_string(),
            },
        );
        let rendered = err.to_string();
        assert!(rendered.starts_with("error creating media services account"));
        assert!(rendered.contains("500"));
    }
}

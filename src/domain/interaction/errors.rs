//! Errors for interactions, follows, and channel read models.

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised by the interaction engine, relationship graph, and
/// channel aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngagementError {
    /// Malformed id, unknown kind tag, or self-follow.
    InvalidArgument { field: String, message: String },

    /// Target, followee, or channel does not exist.
    NotFound(String),

    /// Store or content catalog failed.
    Upstream(String),
}

impl EngagementError {
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngagementError::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        EngagementError::NotFound(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            EngagementError::InvalidArgument { .. } => ErrorCode::InvalidArgument,
            EngagementError::NotFound(_) => ErrorCode::NotFound,
            EngagementError::Upstream(_) => ErrorCode::Upstream,
        }
    }

    pub fn message(&self) -> String {
        match self {
            EngagementError::InvalidArgument { field, message } => {
                format!("Invalid '{}': {}", field, message)
            }
            EngagementError::NotFound(message) => message.clone(),
            EngagementError::Upstream(_) => "A backing service failed".to_string(),
        }
    }
}

impl std::fmt::Display for EngagementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngagementError::Upstream(detail) => write!(f, "Upstream failure: {}", detail),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for EngagementError {}

impl From<DomainError> for EngagementError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidArgument => EngagementError::InvalidArgument {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::NotFound => EngagementError::NotFound(err.message),
            // Conflicts are absorbed by toggles before they get here; anything
            // else reaching this point is a store failure.
            ErrorCode::Conflict | ErrorCode::Unauthenticated | ErrorCode::Upstream => {
                EngagementError::Upstream(err.message)
            }
        }
    }
}

impl From<EngagementError> for DomainError {
    fn from(err: EngagementError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

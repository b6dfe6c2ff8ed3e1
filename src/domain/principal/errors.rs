//! Identity-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ValidationFailed | 400 |
//! | PasswordUnchanged | 400 |
//! | MediaRequired | 400 |
//! | Conflict | 409 |
//! | NotFound | 404 |
//! | InvalidCredentials | 401 |
//! | Unauthenticated | 401 (503 when transient) |
//! | Upstream | 503 |

use crate::domain::foundation::{AuthError, DomainError, ErrorCode, ValidationError};

/// Errors raised by registration, login, session and account operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// An input failed validation.
    ValidationFailed { field: String, message: String },

    /// New password equals the current one.
    PasswordUnchanged,

    /// A required media upload (avatar) was not supplied or failed.
    MediaRequired(String),

    /// Username or email already belongs to another principal.
    Conflict(String),

    /// No principal matched the lookup.
    NotFound(String),

    /// Password did not verify.
    InvalidCredentials,

    /// Token or session failure.
    Unauthenticated(AuthError),

    /// Store, hasher, signer or media collaborator failed.
    Upstream(String),
}

impl IdentityError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        IdentityError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn media_required(field: impl Into<String>) -> Self {
        IdentityError::MediaRequired(field.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        IdentityError::NotFound(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        IdentityError::Upstream(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            IdentityError::ValidationFailed { .. }
            | IdentityError::PasswordUnchanged
            | IdentityError::MediaRequired(_) => ErrorCode::InvalidArgument,
            IdentityError::Conflict(_) => ErrorCode::Conflict,
            IdentityError::NotFound(_) => ErrorCode::NotFound,
            IdentityError::InvalidCredentials => ErrorCode::Unauthenticated,
            IdentityError::Unauthenticated(err) => err.code(),
            IdentityError::Upstream(_) => ErrorCode::Upstream,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            IdentityError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            IdentityError::PasswordUnchanged => {
                "New password must differ from the current password".to_string()
            }
            IdentityError::MediaRequired(field) => format!("{} file is required", field),
            IdentityError::Conflict(message) => message.clone(),
            IdentityError::NotFound(message) => message.clone(),
            IdentityError::InvalidCredentials => "Invalid credentials".to_string(),
            IdentityError::Unauthenticated(err) => err.to_string(),
            IdentityError::Upstream(_) => "A backing service failed".to_string(),
        }
    }
}

impl std::fmt::Display for IdentityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentityError::Upstream(detail) => write!(f, "Upstream failure: {}", detail),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for IdentityError {}

impl From<DomainError> for IdentityError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidArgument => IdentityError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::Unauthenticated => IdentityError::Unauthenticated(AuthError::InvalidToken),
            ErrorCode::NotFound => IdentityError::NotFound(err.message),
            ErrorCode::Conflict => IdentityError::Conflict(err.message),
            ErrorCode::Upstream => IdentityError::Upstream(err.message),
        }
    }
}

impl From<ValidationError> for IdentityError {
    fn from(err: ValidationError) -> Self {
        IdentityError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<AuthError> for IdentityError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::ServiceUnavailable(detail) => IdentityError::Upstream(detail),
            AuthError::InvalidCredentials => IdentityError::InvalidCredentials,
            other => IdentityError::Unauthenticated(other),
        }
    }
}

impl From<IdentityError> for DomainError {
    fn from(err: IdentityError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_from_store_keeps_message() {
        let err: IdentityError = DomainError::conflict("Username already taken").into();
        assert_eq!(err, IdentityError::Conflict("Username already taken".to_string()));
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[test]
    fn validation_domain_error_keeps_field() {
        let err: IdentityError = DomainError::validation("email", "bad").into();
        assert_eq!(
            err,
            IdentityError::ValidationFailed {
                field: "email".to_string(),
                message: "bad".to_string()
            }
        );
    }

    #[test]
    fn value_object_error_converts_with_field() {
        let err: IdentityError = ValidationError::empty_field("username").into();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
        assert!(err.message().contains("username"));
    }

    #[test]
    fn auth_errors_map_to_unauthenticated_except_transient() {
        let err: IdentityError = AuthError::RefreshTokenReused.into();
        assert_eq!(err.code(), ErrorCode::Unauthenticated);

        let err: IdentityError = AuthError::service_unavailable("db down").into();
        assert_eq!(err.code(), ErrorCode::Upstream);
    }

    #[test]
    fn upstream_message_hides_detail_but_display_keeps_it() {
        let err = IdentityError::upstream("connection reset");
        assert_eq!(err.message(), "A backing service failed");
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn password_unchanged_is_invalid_argument() {
        assert_eq!(
            IdentityError::PasswordUnchanged.code(),
            ErrorCode::InvalidArgument
        );
    }
}

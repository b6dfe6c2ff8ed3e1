//! Authentication types for the domain layer.
//!
//! `AuthenticatedPrincipal` is what the session gate hands to a protected
//! operation once an access token has been verified and its principal
//! resolved. `AuthError` describes every way that can fail, plus the
//! refresh-rotation failures, in terms the rest of the application
//! understands. Neither type knows anything about JWT or HTTP.

use super::{DomainError, ErrorCode, PrincipalId};
use thiserror::Error;

/// Principal resolved from a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    pub id: PrincipalId,
    pub username: String,
    pub email: String,
    pub full_name: String,
}

impl AuthenticatedPrincipal {
    pub fn new(
        id: PrincipalId,
        username: impl Into<String>,
        email: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            full_name: full_name.into(),
        }
    }
}

/// Authentication and session errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No token was presented.
    #[error("Authentication token missing")]
    MissingToken,

    /// The token is malformed or has an invalid signature.
    #[error("Invalid token")]
    InvalidToken,

    /// The token's expiry has passed.
    #[error("Token expired")]
    TokenExpired,

    /// A refresh token verified but is not the one currently stored.
    #[error("Refresh token has been superseded")]
    RefreshTokenReused,

    /// The principal has no active session (logged out).
    #[error("Session has been revoked")]
    SessionRevoked,

    /// Token is valid but the principal no longer exists.
    #[error("Principal not found")]
    PrincipalNotFound,

    /// Login or password change presented a wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A store or signer failed while checking the token.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the caller should log in again.
    pub fn requires_reauthentication(&self) -> bool {
        !self.is_transient()
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }

    /// Stable snake_case name for clients that branch on the failure.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "missing_token",
            AuthError::InvalidToken => "invalid_token",
            AuthError::TokenExpired => "token_expired",
            AuthError::RefreshTokenReused => "refresh_token_reused",
            AuthError::SessionRevoked => "session_revoked",
            AuthError::PrincipalNotFound => "principal_not_found",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::ServiceUnavailable(_) => "service_unavailable",
        }
    }

    pub fn code(&self) -> ErrorCode {
        if self.is_transient() {
            ErrorCode::Upstream
        } else {
            ErrorCode::Unauthenticated
        }
    }
}

impl From<AuthError> for DomainError {
    fn from(err: AuthError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

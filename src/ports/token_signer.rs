//! Token signing port.
//!
//! Access and refresh tokens are signed claim bundles. They are never
//! stored; only a fingerprint of the current refresh token lives on the
//! principal.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, DomainError, PrincipalId};

/// Claims carried by a short-lived access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Principal id.
    pub sub: PrincipalId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    /// Issued at (unix seconds).
    pub iat: i64,
    /// Expires at (unix seconds).
    pub exp: i64,
}

/// Claims carried by a long-lived refresh token.
///
/// `jti` makes every refresh token distinct, even two minted for the same
/// principal in the same second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: PrincipalId,
    pub jti: uuid::Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies access and refresh tokens.
///
/// # Contract
///
/// Implementations must:
/// - Use distinct keys for access and refresh tokens, so neither verifies
///   as the other
/// - Return `AuthError::TokenExpired` when `exp` has passed
/// - Return `AuthError::InvalidToken` for malformed tokens and bad signatures
/// - Return `DomainError` with `ErrorCode::Upstream` only when signing fails
pub trait TokenSigner: Send + Sync {
    fn sign_access(&self, claims: &AccessClaims) -> Result<String, DomainError>;

    fn verify_access(&self, token: &str) -> Result<AccessClaims, AuthError>;

    fn sign_refresh(&self, claims: &RefreshClaims) -> Result<String, DomainError>;

    fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, AuthError>;
}

//! Token service: mints, rotates and revokes session tokens.
//!
//! Each principal has at most one valid refresh token, identified by the
//! fingerprint stored on the principal. Minting overwrites the fingerprint;
//! rotation replaces it with a compare-and-swap against the presented
//! token's fingerprint, so of two concurrent rotations with the same token
//! exactly one wins.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, DomainError, ErrorCode, PrincipalId, Timestamp};
use crate::domain::principal::{Principal, RefreshFingerprint};
use crate::ports::{AccessClaims, PrincipalRepository, RefreshClaims, TokenSigner};

/// A freshly issued access/refresh pair.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: Timestamp,
    pub refresh_expires_at: Timestamp,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("access_expires_at", &self.access_expires_at)
            .field("refresh_expires_at", &self.refresh_expires_at)
            .finish()
    }
}

/// Token lifetimes in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access_secs: u64,
    pub refresh_secs: u64,
}

impl TokenLifetimes {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            access_secs: config.access_token_ttl_secs,
            refresh_secs: config.refresh_token_ttl_secs,
        }
    }
}

fn store_failure(err: DomainError) -> AuthError {
    match err.code {
        ErrorCode::NotFound => AuthError::PrincipalNotFound,
        _ => AuthError::service_unavailable(err.message),
    }
}

pub struct TokenService {
    principals: Arc<dyn PrincipalRepository>,
    signer: Arc<dyn TokenSigner>,
    lifetimes: TokenLifetimes,
}

impl TokenService {
    pub fn new(
        principals: Arc<dyn PrincipalRepository>,
        signer: Arc<dyn TokenSigner>,
        lifetimes: TokenLifetimes,
    ) -> Self {
        Self {
            principals,
            signer,
            lifetimes,
        }
    }

    fn issue(&self, principal: &Principal) -> Result<(TokenPair, RefreshFingerprint), AuthError> {
        let now = Timestamp::now();
        let access_expires_at = now.plus_secs(self.lifetimes.access_secs);
        let refresh_expires_at = now.plus_secs(self.lifetimes.refresh_secs);

        let access_token = self
            .signer
            .sign_access(&AccessClaims {
                sub: principal.id,
                username: principal.username.as_str().to_string(),
                email: principal.email.as_str().to_string(),
                full_name: principal.full_name.as_str().to_string(),
                iat: now.as_unix_secs(),
                exp: access_expires_at.as_unix_secs(),
            })
            .map_err(store_failure)?;

        let refresh_token = self
            .signer
            .sign_refresh(&RefreshClaims {
                sub: principal.id,
                jti: uuid::Uuid::new_v4(),
                iat: now.as_unix_secs(),
                exp: refresh_expires_at.as_unix_secs(),
            })
            .map_err(store_failure)?;

        let fingerprint = RefreshFingerprint::of(&refresh_token);
        Ok((
            TokenPair {
                access_token,
                refresh_token,
                access_expires_at,
                refresh_expires_at,
            },
            fingerprint,
        ))
    }

    /// Issue a new pair, replacing any refresh token the principal held.
    pub async fn mint(&self, principal: &Principal) -> Result<TokenPair, AuthError> {
        let (pair, fingerprint) = self.issue(principal)?;
        self.principals
            .set_refresh_fingerprint(&principal.id, Some(&fingerprint))
            .await
            .map_err(store_failure)?;

        tracing::debug!(principal_id = %principal.id, "Minted session tokens");
        Ok(pair)
    }

    /// Exchange the presented refresh token for a new pair.
    pub async fn rotate(&self, presented: Option<&str>) -> Result<TokenPair, AuthError> {
        let token = presented
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = self.signer.verify_refresh(token)?;
        let principal = self
            .principals
            .find_by_id(&claims.sub)
            .await
            .map_err(store_failure)?
            .ok_or(AuthError::PrincipalNotFound)?;

        let stored = principal
            .refresh_fingerprint()
            .ok_or(AuthError::SessionRevoked)?;
        let presented_fingerprint = RefreshFingerprint::of(token);
        if !stored.matches(&presented_fingerprint) {
            tracing::warn!(
                principal_id = %principal.id,
                "Refresh token does not match the stored session"
            );
            return Err(AuthError::RefreshTokenReused);
        }

        let (pair, next) = self.issue(&principal)?;
        let swapped = self
            .principals
            .replace_refresh_fingerprint(&principal.id, &presented_fingerprint, &next)
            .await
            .map_err(store_failure)?;
        if !swapped {
            tracing::warn!(
                principal_id = %principal.id,
                "Refresh token was rotated concurrently"
            );
            return Err(AuthError::RefreshTokenReused);
        }

        tracing::debug!(principal_id = %principal.id, "Rotated session tokens");
        Ok(pair)
    }

    /// Clear the stored refresh fingerprint (logout).
    pub async fn revoke(&self, principal_id: &PrincipalId) -> Result<(), AuthError> {
        self.principals
            .set_refresh_fingerprint(principal_id, None)
            .await
            .map_err(store_failure)?;

        tracing::debug!(principal_id = %principal_id, "Revoked session");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::JwtTokenSigner;
    use crate::adapters::memory::InMemoryPrincipalRepository;
    use crate::domain::principal::test_support;
    use secrecy::SecretString;

    const LIFETIMES: TokenLifetimes = TokenLifetimes {
        access_secs: 900,
        refresh_secs: 864_000,
    };

    fn signer() -> Arc<dyn TokenSigner> {
        Arc::new(JwtTokenSigner::new(
            &SecretString::new("access-secret-for-tests".to_string()),
            &SecretString::new("refresh-secret-for-tests".to_string()),
            0,
        ))
    }

    async fn setup() -> (TokenService, Arc<InMemoryPrincipalRepository>, Principal) {
        let repo = Arc::new(InMemoryPrincipalRepository::new());
        let principal = test_support::principal("dave");
        repo.insert(&principal).await.unwrap();
        let service = TokenService::new(repo.clone(), signer(), LIFETIMES);
        (service, repo, principal)
    }

    #[tokio::test]
    async fn mint_stores_fingerprint_of_refresh_token() {
        let (service, repo, principal) = setup().await;

        let pair = service.mint(&principal).await.unwrap();

        let stored = repo.find_by_id(&principal.id).await.unwrap().unwrap();
        assert!(stored
            .refresh_fingerprint()
            .unwrap()
            .matches(&RefreshFingerprint::of(&pair.refresh_token)));
        assert!(pair.access_expires_at.is_before(&pair.refresh_expires_at));
    }

    #[tokio::test]
    async fn second_mint_invalidates_first_refresh_token() {
        let (service, _repo, principal) = setup().await;

        let first = service.mint(&principal).await.unwrap();
        let _second = service.mint(&principal).await.unwrap();

        let err = service.rotate(Some(&first.refresh_token)).await.unwrap_err();
        assert_eq!(err, AuthError::RefreshTokenReused);
    }

    #[tokio::test]
    async fn rotate_replaces_token_and_rejects_the_old_one() {
        let (service, _repo, principal) = setup().await;
        let pair = service.mint(&principal).await.unwrap();

        let rotated = service.rotate(Some(&pair.refresh_token)).await.unwrap();
        assert_ne!(rotated.refresh_token, pair.refresh_token);

        let err = service.rotate(Some(&pair.refresh_token)).await.unwrap_err();
        assert_eq!(err, AuthError::RefreshTokenReused);

        assert!(service.rotate(Some(&rotated.refresh_token)).await.is_ok());
    }

    #[tokio::test]
    async fn rotate_without_token_is_missing() {
        let (service, _repo, _principal) = setup().await;
        assert_eq!(service.rotate(None).await.unwrap_err(), AuthError::MissingToken);
        assert_eq!(service.rotate(Some("  ")).await.unwrap_err(), AuthError::MissingToken);
    }

    #[tokio::test]
    async fn rotate_after_revoke_is_session_revoked() {
        let (service, _repo, principal) = setup().await;
        let pair = service.mint(&principal).await.unwrap();

        service.revoke(&principal.id).await.unwrap();

        let err = service.rotate(Some(&pair.refresh_token)).await.unwrap_err();
        assert_eq!(err, AuthError::SessionRevoked);
    }

    #[tokio::test]
    async fn access_token_is_not_a_refresh_token() {
        let (service, _repo, principal) = setup().await;
        let pair = service.mint(&principal).await.unwrap();

        let err = service.rotate(Some(&pair.access_token)).await.unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn rotate_for_unknown_principal_fails() {
        let repo = Arc::new(InMemoryPrincipalRepository::new());
        let service = TokenService::new(repo, signer(), LIFETIMES);
        let ghost = test_support::principal("ghost");

        // Sign for a principal the store has never seen
        let (pair, _) = service.issue(&ghost).unwrap();
        let err = service.rotate(Some(&pair.refresh_token)).await.unwrap_err();
        assert_eq!(err, AuthError::PrincipalNotFound);
    }

    #[test]
    fn token_pair_debug_redacts_tokens() {
        let pair = TokenPair {
            access_token: "secret-access".to_string(),
            refresh_token: "secret-refresh".to_string(),
            access_expires_at: Timestamp::now(),
            refresh_expires_at: Timestamp::now(),
        };
        let debug = format!("{:?}", pair);
        assert!(!debug.contains("secret-access"));
        assert!(!debug.contains("secret-refresh"));
    }
}

//! HS256 JWT adapter for the `TokenSigner` port.
//!
//! Access and refresh tokens are signed with separate HMAC keys. A refresh
//! token presented where an access token is expected (or the other way
//! round) fails signature verification before its claims are looked at.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, DomainError};
use crate::ports::{AccessClaims, RefreshClaims, TokenSigner};

struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyPair {
    fn from_secret(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        }
    }
}

pub struct JwtTokenSigner {
    access: KeyPair,
    refresh: KeyPair,
    validation: Validation,
}

impl JwtTokenSigner {
    pub fn new(access_secret: &SecretString, refresh_secret: &SecretString, leeway_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_secs;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            access: KeyPair::from_secret(access_secret),
            refresh: KeyPair::from_secret(refresh_secret),
            validation,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            &config.access_token_secret,
            &config.refresh_token_secret,
            config.token_leeway_secs,
        )
    }

    fn sign<C: Serialize>(&self, keys: &KeyPair, claims: &C) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &keys.encoding)
            .map_err(|e| DomainError::upstream(format!("Failed to sign token: {}", e)))
    }

    fn verify<C: DeserializeOwned>(&self, keys: &KeyPair, token: &str) -> Result<C, AuthError> {
        decode::<C>(token, &keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidSignature => {
                    tracing::debug!("Token signature mismatch");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::debug!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            })
    }
}

impl TokenSigner for JwtTokenSigner {
    fn sign_access(&self, claims: &AccessClaims) -> Result<String, DomainError> {
        self.sign(&self.access, claims)
    }

    fn verify_access(&self, token: &str) -> Result<AccessClaims, AuthError> {
        self.verify(&self.access, token)
    }

    fn sign_refresh(&self, claims: &RefreshClaims) -> Result<String, DomainError> {
        self.sign(&self.refresh, claims)
    }

    fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, AuthError> {
        self.verify(&self.refresh, token)
    }
}

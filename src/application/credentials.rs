//! Credential store and verifier.
//!
//! Enforces the password policy and moves hashing onto tokio's blocking
//! pool so a slow Argon2 run never stalls the executor.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::domain::principal::{CredentialHash, IdentityError, Principal};
use crate::ports::CredentialHasher;

/// Upper bound on password length, in characters.
pub const MAX_PASSWORD_LENGTH: usize = 128;

pub struct CredentialService {
    hasher: Arc<dyn CredentialHasher>,
    min_length: usize,
}

impl CredentialService {
    pub fn new(hasher: Arc<dyn CredentialHasher>, min_length: usize) -> Self {
        Self { hasher, min_length }
    }

    /// Rejects passwords outside the length policy or made only of whitespace.
    pub fn check_policy(&self, plaintext: &SecretString) -> Result<(), IdentityError> {
        let secret = plaintext.expose_secret();
        let length = secret.chars().count();

        if secret.trim().is_empty() {
            return Err(IdentityError::validation("password", "Password is required"));
        }
        if length < self.min_length {
            return Err(IdentityError::validation(
                "password",
                format!("Password must be at least {} characters", self.min_length),
            ));
        }
        if length > MAX_PASSWORD_LENGTH {
            return Err(IdentityError::validation(
                "password",
                format!("Password must be at most {} characters", MAX_PASSWORD_LENGTH),
            ));
        }
        Ok(())
    }

    /// Checks the policy and hashes `plaintext`.
    pub async fn hash(&self, plaintext: SecretString) -> Result<CredentialHash, IdentityError> {
        self.check_policy(&plaintext)?;

        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| IdentityError::upstream(format!("Hashing task failed: {}", e)))?
            .map_err(IdentityError::from)
    }

    /// Hashes `plaintext` and installs it as the principal's credential.
    pub async fn set_credential(
        &self,
        principal: &mut Principal,
        plaintext: SecretString,
    ) -> Result<(), IdentityError> {
        let credential = self.hash(plaintext).await?;
        principal.set_credential(credential);
        Ok(())
    }

    /// True if `plaintext` matches the principal's stored credential.
    pub async fn verify(
        &self,
        principal: &Principal,
        plaintext: SecretString,
    ) -> Result<bool, IdentityError> {
        let hasher = self.hasher.clone();
        let stored = principal.credential().clone();
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &stored))
            .await
            .map_err(|e| IdentityError::upstream(format!("Verification task failed: {}", e)))?
            .map_err(IdentityError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::Argon2CredentialHasher;
    use crate::config::Argon2Settings;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::principal::test_support;

    fn service() -> CredentialService {
        let hasher = Argon2CredentialHasher::new(&Argon2Settings::testing()).unwrap();
        CredentialService::new(Arc::new(hasher), 8)
    }

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string())
    }

    #[test]
    fn short_password_is_rejected() {
        let err = service().check_policy(&secret("short")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
        assert!(err.message().contains("at least 8"));
    }

    #[test]
    fn whitespace_password_is_rejected() {
        assert!(service().check_policy(&secret("          ")).is_err());
    }

    #[test]
    fn overlong_password_is_rejected() {
        let long = "x".repeat(MAX_PASSWORD_LENGTH + 1);
        assert!(service().check_policy(&secret(&long)).is_err());
    }

    #[tokio::test]
    async fn set_then_verify() {
        let service = service();
        let mut principal = test_support::principal("carol");

        service
            .set_credential(&mut principal, secret("correct horse"))
            .await
            .unwrap();

        assert!(service.verify(&principal, secret("correct horse")).await.unwrap());
        assert!(!service.verify(&principal, secret("wrong horse")).await.unwrap());
    }

    #[tokio::test]
    async fn hash_never_contains_plaintext() {
        let hash = service().hash(secret("plaintext-password")).await.unwrap();
        assert!(!hash.as_str().contains("plaintext-password"));
    }
}

//! Argon2id adapter for the `CredentialHasher` port.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use secrecy::{ExposeSecret, SecretString};

use crate::config::Argon2Settings;
use crate::domain::foundation::DomainError;
use crate::domain::principal::CredentialHash;
use crate::ports::CredentialHasher;

const OUTPUT_LEN: usize = 32;

/// Salted Argon2id hashing with PHC-encoded output.
pub struct Argon2CredentialHasher {
    argon2: Argon2<'static>,
}

impl Argon2CredentialHasher {
    pub fn new(settings: &Argon2Settings) -> Result<Self, DomainError> {
        let params = Params::new(
            settings.memory_kib,
            settings.time_cost,
            settings.parallelism,
            Some(OUTPUT_LEN),
        )
        .map_err(|e| DomainError::upstream(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, plaintext: &SecretString) -> Result<CredentialHash, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plaintext.expose_secret().as_bytes(), &salt)
            .map_err(|e| DomainError::upstream(format!("Failed to hash credential: {}", e)))?;

        Ok(CredentialHash::from_encoded(hash.to_string()))
    }

    fn verify(&self, plaintext: &SecretString, hash: &CredentialHash) -> Result<bool, DomainError> {
        let parsed = PasswordHash::new(hash.as_str())
            .map_err(|e| DomainError::upstream(format!("Malformed credential hash: {}", e)))?;

        // Parameters embedded in the hash win over this hasher's own, so
        // hashes made under older settings keep verifying.
        match self
            .argon2
            .verify_password(plaintext.expose_secret().as_bytes(), &parsed)
        {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(DomainError::upstream(format!(
                "Credential verification failed: {}",
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn hasher() -> Argon2CredentialHasher {
        Argon2CredentialHasher::new(&Argon2Settings::testing()).unwrap()
    }

    fn secret(value: &str) -> SecretString {
        SecretString::new(value.to_string())
    }

    #[test]
    fn hash_is_phc_argon2id_and_hides_plaintext() {
        let hash = hasher().hash(&secret("correct horse")).unwrap();
        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(!hash.as_str().contains("correct horse"));
    }

    #[test]
    fn verify_accepts_correct_and_rejects_wrong_password() {
        let hasher = hasher();
        let hash = hasher.hash(&secret("correct horse")).unwrap();

        assert!(hasher.verify(&secret("correct horse"), &hash).unwrap());
        assert!(!hasher.verify(&secret("battery staple"), &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let hasher = hasher();
        let a = hasher.hash(&secret("repeatable")).unwrap();
        let b = hasher.hash(&secret("repeatable")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_is_upstream_error() {
        let err = hasher()
            .verify(&secret("x"), &CredentialHash::from_encoded("not-a-phc-string"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Upstream);
    }

    #[test]
    fn invalid_params_are_rejected_at_construction() {
        let settings = Argon2Settings {
            memory_kib: 1,
            time_cost: 1,
            parallelism: 1,
        };
        assert!(Argon2CredentialHasher::new(&settings).is_err());
    }
}

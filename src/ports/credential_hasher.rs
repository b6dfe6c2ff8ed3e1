//! Credential hashing port.
//!
//! Hashing is deliberately slow and CPU-bound, so the trait is synchronous;
//! callers on the async path are expected to move calls onto a blocking
//! worker.

use secrecy::SecretString;

use crate::domain::foundation::DomainError;
use crate::domain::principal::CredentialHash;

/// One-way, salted credential hashing.
///
/// # Contract
///
/// Implementations must:
/// - Generate a fresh random salt for every `hash` call
/// - Encode algorithm, parameters and salt into the returned hash
/// - Return `Ok(false)` from `verify` on a wrong password, reserving `Err`
///   for malformed hashes or internal failures
/// - Never log or retain the plaintext
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &SecretString) -> Result<CredentialHash, DomainError>;

    fn verify(&self, plaintext: &SecretString, hash: &CredentialHash) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    /// Reversible stand-in, good enough to exercise the trait shape.
    struct PrefixHasher;

    impl CredentialHasher for PrefixHasher {
        fn hash(&self, plaintext: &SecretString) -> Result<CredentialHash, DomainError> {
            Ok(CredentialHash::from_encoded(format!(
                "plain${}",
                plaintext.expose_secret()
            )))
        }

        fn verify(
            &self,
            plaintext: &SecretString,
            hash: &CredentialHash,
        ) -> Result<bool, DomainError> {
            Ok(hash.as_str() == format!("plain${}", plaintext.expose_secret()))
        }
    }

    #[test]
    fn hasher_verifies_its_own_output() {
        let hasher = PrefixHasher;
        let secret = SecretString::new("hunter22".to_string());
        let hash = hasher.hash(&secret).unwrap();

        assert!(hasher.verify(&secret, &hash).unwrap());
        assert!(!hasher
            .verify(&SecretString::new("other".to_string()), &hash)
            .unwrap());
    }

    #[test]
    fn credential_hasher_is_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn CredentialHasher>();
        let _boxed: Box<dyn CredentialHasher> = Box::new(PrefixHasher);
    }
}

//! Secret-bearing values stored on a principal.

use sha2::{Digest, Sha256};
use std::fmt;
use subtle::ConstantTimeEq;

/// One-way credential hash in PHC string format.
///
/// Only a `CredentialHasher` produces these; the plaintext never lives on
/// the principal.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialHash(String);

impl CredentialHash {
    /// Wraps an encoded hash produced by a hasher or loaded from storage.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CredentialHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialHash([REDACTED])")
    }
}

/// SHA-256 fingerprint of the principal's current refresh token.
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshFingerprint(String);

impl RefreshFingerprint {
    /// Fingerprints a raw refresh token.
    pub fn of(token: &str) -> Self {
        Self(hex::encode(Sha256::digest(token.as_bytes())))
    }

    /// Wraps a hex fingerprint loaded from storage.
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-time comparison.
    pub fn matches(&self, other: &RefreshFingerprint) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl fmt::Debug for RefreshFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(8).collect();
        write!(f, "RefreshFingerprint({}…)", prefix)
    }
}

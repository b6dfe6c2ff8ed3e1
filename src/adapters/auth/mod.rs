//! Authentication adapters.
//!
//! Implementations of the `CredentialHasher` and `TokenSigner` ports:
//!
//! - `argon2_hasher` - Argon2id credential hashing
//! - `jwt_signer` - HS256 access/refresh tokens with separate keys

mod argon2_hasher;
mod jwt_signer;

pub use argon2_hasher::Argon2CredentialHasher;
pub use jwt_signer::JwtTokenSigner;

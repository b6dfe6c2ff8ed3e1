//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Identity Ports
//!
//! - `CredentialHasher` - One-way password hashing
//! - `TokenSigner` - Access/refresh token signing and verification
//! - `PrincipalRepository` - Principal persistence with refresh-token CAS
//!
//! ## Engagement Ports
//!
//! - `InteractionRepository` - Likes keyed by (principal, target, kind)
//! - `FollowRepository` - Directed follow edges
//! - `ContentCatalog` - Existence and ownership of content owned elsewhere
//! - `MediaStorage` - Durable storage for uploaded media

mod content_catalog;
mod credential_hasher;
mod follow_repository;
mod interaction_repository;
mod media_storage;
mod principal_repository;
mod token_signer;

pub use content_catalog::ContentCatalog;
pub use credential_hasher::CredentialHasher;
pub use follow_repository::FollowRepository;
pub use interaction_repository::InteractionRepository;
pub use media_storage::{media_public_id, MediaStorage, StoredMedia};
pub use principal_repository::PrincipalRepository;
pub use token_signer::{AccessClaims, RefreshClaims, TokenSigner};

//! In-memory adapters for tests and single-process development.
//!
//! Each store serialises writes behind a `tokio::sync::RwLock`, which is how
//! they emulate the unique indexes and conditional updates of the
//! PostgreSQL adapters.

mod content_catalog;
mod follow_repository;
mod interaction_repository;
mod media_storage;
mod principal_repository;

pub use content_catalog::InMemoryContentCatalog;
pub use follow_repository::InMemoryFollowRepository;
pub use interaction_repository::InMemoryInteractionRepository;
pub use media_storage::InMemoryMediaStorage;
pub use principal_repository::InMemoryPrincipalRepository;

//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresPrincipalRepository` - Accounts, credentials, refresh fingerprints
//! - `PostgresInteractionRepository` - Like records keyed by principal and target
//! - `PostgresFollowRepository` - The follow graph
//! - `PostgresContentCatalog` - Read-only view of content tables
//!
//! Uniqueness is always left to the database. A violated unique constraint
//! surfaces as `ErrorCode::Conflict` with the constraint name in the error
//! details; every other failure is `ErrorCode::Upstream`.

mod content_catalog;
mod follow_repository;
mod interaction_repository;
mod principal_repository;

pub use content_catalog::PostgresContentCatalog;
pub use follow_repository::PostgresFollowRepository;
pub use interaction_repository::PostgresInteractionRepository;
pub use principal_repository::PostgresPrincipalRepository;

use crate::domain::foundation::DomainError;

/// Postgres `unique_violation` SQLSTATE.
const UNIQUE_VIOLATION: &str = "23505";

/// Name of the unique constraint `e` violated, if that is what happened.
pub(crate) fn unique_violation(e: &sqlx::Error) -> Option<String> {
    if let sqlx::Error::Database(db_err) = e {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return db_err.constraint().map(str::to_string);
        }
    }
    None
}

pub(crate) fn storage_error(action: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "Failed to {}", action);
    DomainError::upstream(format!("Failed to {}: {}", action, e))
}

//! Interaction persistence port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, InteractionId, PrincipalId, TargetId};
use crate::domain::interaction::{Interaction, InteractionKey, TargetKind};

/// Repository port for interaction records.
///
/// # Contract
///
/// Implementations must:
/// - Enforce uniqueness on (principal, target, kind) and report a violated
///   key from `insert` as `ErrorCode::Conflict`
/// - Treat `delete` of an already-deleted record as success
/// - Return listings newest first
#[async_trait]
pub trait InteractionRepository: Send + Sync {
    async fn find(&self, key: &InteractionKey) -> Result<Option<Interaction>, DomainError>;

    async fn insert(&self, interaction: &Interaction) -> Result<(), DomainError>;

    async fn delete(&self, id: &InteractionId) -> Result<(), DomainError>;

    async fn list_by_principal(
        &self,
        principal_id: &PrincipalId,
        kind: TargetKind,
    ) -> Result<Vec<Interaction>, DomainError>;

    /// Number of interactions of `kind` across all of `target_ids`.
    async fn count_for_targets(
        &self,
        kind: TargetKind,
        target_ids: &[TargetId],
    ) -> Result<u64, DomainError>;
}

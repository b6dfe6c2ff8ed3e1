//! Follow-edge persistence port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, FollowEdgeId, PrincipalId};
use crate::domain::relationship::{FollowEdge, FollowKey};

/// Repository port for the directed follow graph.
///
/// # Contract
///
/// Implementations must:
/// - Enforce uniqueness on (follower, followee) and report a violated pair
///   from `insert` as `ErrorCode::Conflict`
/// - Treat `delete` of an already-deleted edge as success
/// - Return listings newest first
/// - Compute counts from the edges themselves; nothing is cached
#[async_trait]
pub trait FollowRepository: Send + Sync {
    async fn find(&self, key: &FollowKey) -> Result<Option<FollowEdge>, DomainError>;

    async fn insert(&self, edge: &FollowEdge) -> Result<(), DomainError>;

    async fn delete(&self, id: &FollowEdgeId) -> Result<(), DomainError>;

    /// Edges pointing at `channel_id`.
    async fn list_followers(&self, channel_id: &PrincipalId) -> Result<Vec<FollowEdge>, DomainError>;

    /// Edges leaving `follower_id`.
    async fn list_following(&self, follower_id: &PrincipalId)
        -> Result<Vec<FollowEdge>, DomainError>;

    async fn count_followers(&self, channel_id: &PrincipalId) -> Result<u64, DomainError>;

    async fn count_following(&self, follower_id: &PrincipalId) -> Result<u64, DomainError>;
}

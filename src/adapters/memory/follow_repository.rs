//! In-memory follow graph.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, FollowEdgeId, PrincipalId};
use crate::domain::relationship::{FollowEdge, FollowKey};
use crate::ports::FollowRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryFollowRepository {
    edges: Arc<RwLock<HashMap<FollowKey, FollowEdge>>>,
}

impl InMemoryFollowRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn collect_sorted<F>(&self, predicate: F) -> Vec<FollowEdge>
    where
        F: Fn(&FollowEdge) -> bool,
    {
        let mut list: Vec<FollowEdge> = self
            .edges
            .read()
            .await
            .values()
            .filter(|edge| predicate(edge))
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    }
}

#[async_trait]
impl FollowRepository for InMemoryFollowRepository {
    async fn find(&self, key: &FollowKey) -> Result<Option<FollowEdge>, DomainError> {
        Ok(self.edges.read().await.get(key).cloned())
    }

    async fn insert(&self, edge: &FollowEdge) -> Result<(), DomainError> {
        let mut edges = self.edges.write().await;
        let key = edge.key();
        if edges.contains_key(&key) {
            return Err(DomainError::conflict("Already following")
                .with_detail("constraint", "follow_edges_pair_key"));
        }
        edges.insert(key, edge.clone());
        Ok(())
    }

    async fn delete(&self, id: &FollowEdgeId) -> Result<(), DomainError> {
        self.edges.write().await.retain(|_, edge| &edge.id != id);
        Ok(())
    }

    async fn list_followers(&self, channel_id: &PrincipalId) -> Result<Vec<FollowEdge>, DomainError> {
        Ok(self.collect_sorted(|edge| &edge.followee_id == channel_id).await)
    }

    async fn list_following(
        &self,
        follower_id: &PrincipalId,
    ) -> Result<Vec<FollowEdge>, DomainError> {
        Ok(self.collect_sorted(|edge| &edge.follower_id == follower_id).await)
    }

    async fn count_followers(&self, channel_id: &PrincipalId) -> Result<u64, DomainError> {
        Ok(self
            .edges
            .read()
            .await
            .values()
            .filter(|edge| &edge.followee_id == channel_id)
            .count() as u64)
    }

    async fn count_following(&self, follower_id: &PrincipalId) -> Result<u64, DomainError> {
        Ok(self
            .edges
            .read()
            .await
            .values()
            .filter(|edge| &edge.follower_id == follower_id)
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn counts_follow_direction() {
        let repo = InMemoryFollowRepository::new();
        let channel = PrincipalId::new();
        let a = PrincipalId::new();
        let b = PrincipalId::new();

        repo.insert(&FollowEdge::new(FollowKey::new(a, channel).unwrap())).await.unwrap();
        repo.insert(&FollowEdge::new(FollowKey::new(b, channel).unwrap())).await.unwrap();
        repo.insert(&FollowEdge::new(FollowKey::new(channel, a).unwrap())).await.unwrap();

        assert_eq!(repo.count_followers(&channel).await.unwrap(), 2);
        assert_eq!(repo.count_following(&channel).await.unwrap(), 1);
        assert_eq!(repo.list_followers(&channel).await.unwrap().len(), 2);
        assert_eq!(repo.list_following(&a).await.unwrap()[0].followee_id, channel);
    }

    #[tokio::test]
    async fn duplicate_pair_is_conflict() {
        let repo = InMemoryFollowRepository::new();
        let key = FollowKey::new(PrincipalId::new(), PrincipalId::new()).unwrap();
        repo.insert(&FollowEdge::new(key)).await.unwrap();

        let err = repo.insert(&FollowEdge::new(key)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
    }
}

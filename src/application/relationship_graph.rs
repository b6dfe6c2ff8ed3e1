//! Relationship graph: directed follow edges between principals.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::toggle::{toggle, ToggleStore};
use crate::domain::foundation::{DomainError, PrincipalId};
use crate::domain::interaction::{EngagementError, ToggleOutcome};
use crate::domain::principal::PrincipalSummary;
use crate::domain::relationship::{FollowEdge, FollowKey, MemberSummary};
use crate::ports::{FollowRepository, PrincipalRepository};

struct FollowToggle<'a> {
    follows: &'a dyn FollowRepository,
}

#[async_trait]
impl<'a> ToggleStore for FollowToggle<'a> {
    type Key = FollowKey;
    type Record = FollowEdge;

    async fn find(&self, key: &FollowKey) -> Result<Option<FollowEdge>, DomainError> {
        self.follows.find(key).await
    }

    async fn create(&self, key: &FollowKey) -> Result<FollowEdge, DomainError> {
        let edge = FollowEdge::new(*key);
        self.follows.insert(&edge).await?;
        Ok(edge)
    }

    async fn remove(&self, edge: &FollowEdge) -> Result<(), DomainError> {
        self.follows.delete(&edge.id).await
    }
}

pub struct RelationshipGraph {
    principals: Arc<dyn PrincipalRepository>,
    follows: Arc<dyn FollowRepository>,
}

impl RelationshipGraph {
    pub fn new(principals: Arc<dyn PrincipalRepository>, follows: Arc<dyn FollowRepository>) -> Self {
        Self {
            principals,
            follows,
        }
    }

    /// Follow `followee_id` if not already following, unfollow otherwise.
    pub async fn follow(
        &self,
        follower_id: PrincipalId,
        followee_id: PrincipalId,
    ) -> Result<ToggleOutcome<FollowEdge>, EngagementError> {
        let key = FollowKey::new(follower_id, followee_id)?;

        if self.principals.find_by_id(&followee_id).await?.is_none() {
            return Err(EngagementError::not_found(format!(
                "Channel {} not found",
                followee_id
            )));
        }

        let store = FollowToggle {
            follows: self.follows.as_ref(),
        };
        let outcome = toggle(&store, &key).await?;

        tracing::debug!(
            follower_id = %follower_id,
            followee_id = %followee_id,
            state = ?outcome.state,
            "Toggled follow"
        );
        Ok(outcome)
    }

    /// Principals following `channel_id`, newest first.
    pub async fn list_followers(
        &self,
        channel_id: PrincipalId,
    ) -> Result<Vec<MemberSummary>, EngagementError> {
        let edges = self.follows.list_followers(&channel_id).await?;
        self.summarize(edges, |edge| edge.follower_id).await
    }

    /// Principals that `principal_id` follows, newest first.
    pub async fn list_following(
        &self,
        principal_id: PrincipalId,
    ) -> Result<Vec<MemberSummary>, EngagementError> {
        let edges = self.follows.list_following(&principal_id).await?;
        self.summarize(edges, |edge| edge.followee_id).await
    }

    pub async fn is_following(
        &self,
        viewer_id: PrincipalId,
        channel_id: PrincipalId,
    ) -> Result<bool, EngagementError> {
        // A principal never follows itself
        let Ok(key) = FollowKey::new(viewer_id, channel_id) else {
            return Ok(false);
        };
        Ok(self.follows.find(&key).await?.is_some())
    }

    pub async fn count_followers(&self, channel_id: PrincipalId) -> Result<u64, EngagementError> {
        Ok(self.follows.count_followers(&channel_id).await?)
    }

    pub async fn count_following(&self, principal_id: PrincipalId) -> Result<u64, EngagementError> {
        Ok(self.follows.count_following(&principal_id).await?)
    }

    /// Join edges with the summaries of the principals on the `other` end,
    /// keeping edge order. Edges whose principal is gone are skipped.
    async fn summarize(
        &self,
        edges: Vec<FollowEdge>,
        other: impl Fn(&FollowEdge) -> PrincipalId,
    ) -> Result<Vec<MemberSummary>, EngagementError> {
        let ids: Vec<PrincipalId> = edges.iter().map(&other).collect();
        let summaries: HashMap<PrincipalId, PrincipalSummary> = self
            .principals
            .find_summaries(&ids)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        Ok(edges
            .iter()
            .filter_map(|edge| {
                summaries.get(&other(edge)).map(|s| MemberSummary {
                    id: s.id,
                    username: s.username.clone(),
                    full_name: s.full_name.clone(),
                    avatar_url: s.avatar_url.clone(),
                    followed_at: edge.created_at,
                })
            })
            .collect())
    }
}

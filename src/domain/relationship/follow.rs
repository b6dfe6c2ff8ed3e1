//! Directed follow edges between principals.

use serde::Serialize;

use crate::domain::foundation::{FollowEdgeId, PrincipalId, Timestamp};
use crate::domain::interaction::EngagementError;

/// Ordered (follower, followee) pair. Construction rejects self-follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FollowKey {
    follower_id: PrincipalId,
    followee_id: PrincipalId,
}

impl FollowKey {
    pub fn new(follower_id: PrincipalId, followee_id: PrincipalId) -> Result<Self, EngagementError> {
        if follower_id == followee_id {
            return Err(EngagementError::invalid_argument(
                "channel_id",
                "A principal cannot follow itself",
            ));
        }
        Ok(Self {
            follower_id,
            followee_id,
        })
    }

    pub fn follower_id(&self) -> PrincipalId {
        self.follower_id
    }

    pub fn followee_id(&self) -> PrincipalId {
        self.followee_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowEdge {
    pub id: FollowEdgeId,
    pub follower_id: PrincipalId,
    pub followee_id: PrincipalId,
    pub created_at: Timestamp,
}

impl FollowEdge {
    pub fn new(key: FollowKey) -> Self {
        Self {
            id: FollowEdgeId::new(),
            follower_id: key.follower_id,
            followee_id: key.followee_id,
            created_at: Timestamp::now(),
        }
    }

    pub fn key(&self) -> FollowKey {
        FollowKey {
            follower_id: self.follower_id,
            followee_id: self.followee_id,
        }
    }
}

/// A principal on the other end of a follow edge, as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberSummary {
    pub id: PrincipalId,
    pub username: String,
    pub full_name: String,
    pub avatar_url: String,
    pub followed_at: Timestamp,
}

//! Channel module - read-model snapshot of a principal as a channel.

use serde::Serialize;

use crate::domain::foundation::{PrincipalId, TargetId};

/// Content owned by a channel, as reported by the content catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelContent {
    pub item_ids: Vec<TargetId>,
    pub total_views: u64,
}

/// Aggregated channel statistics.
///
/// Each count is individually accurate as of some instant during the read;
/// they are not a single transactional snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelSnapshot {
    pub channel_id: PrincipalId,
    pub username: String,
    pub full_name: String,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
    pub follower_count: u64,
    pub following_count: u64,
    pub is_following: bool,
    pub content_count: u64,
    pub total_views: u64,
    pub like_count: u64,
}

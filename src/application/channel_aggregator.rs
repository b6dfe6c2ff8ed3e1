//! Channel aggregator: composes a channel snapshot from independent reads.
//!
//! There is no cross-entity transaction. Each figure is accurate as of some
//! instant during the call.

use std::sync::Arc;

use super::RelationshipGraph;
use crate::domain::channel::ChannelSnapshot;
use crate::domain::foundation::PrincipalId;
use crate::domain::interaction::{EngagementError, TargetKind};
use crate::domain::principal::{Principal, Username};
use crate::ports::{ContentCatalog, InteractionRepository, PrincipalRepository};

pub struct ChannelAggregator {
    principals: Arc<dyn PrincipalRepository>,
    interactions: Arc<dyn InteractionRepository>,
    catalog: Arc<dyn ContentCatalog>,
    graph: Arc<RelationshipGraph>,
}

impl ChannelAggregator {
    pub fn new(
        principals: Arc<dyn PrincipalRepository>,
        interactions: Arc<dyn InteractionRepository>,
        catalog: Arc<dyn ContentCatalog>,
        graph: Arc<RelationshipGraph>,
    ) -> Self {
        Self {
            principals,
            interactions,
            catalog,
            graph,
        }
    }

    pub async fn snapshot(
        &self,
        channel_id: PrincipalId,
        viewer_id: Option<PrincipalId>,
    ) -> Result<ChannelSnapshot, EngagementError> {
        let channel = self
            .principals
            .find_by_id(&channel_id)
            .await?
            .ok_or_else(|| EngagementError::not_found(format!("Channel {} not found", channel_id)))?;

        self.compose(&channel, viewer_id).await
    }

    /// Snapshot of the channel whose username normalises to `username`.
    pub async fn snapshot_by_username(
        &self,
        username: &str,
        viewer_id: Option<PrincipalId>,
    ) -> Result<ChannelSnapshot, EngagementError> {
        let not_found = || EngagementError::not_found("Channel does not exist");

        // A malformed name cannot belong to any channel
        let username = Username::new(username).map_err(|_| not_found())?;
        let channel = self
            .principals
            .find_by_username(&username)
            .await?
            .ok_or_else(not_found)?;

        self.compose(&channel, viewer_id).await
    }

    async fn compose(
        &self,
        channel: &Principal,
        viewer_id: Option<PrincipalId>,
    ) -> Result<ChannelSnapshot, EngagementError> {
        let channel_id = channel.id;

        let (content, follower_count, following_count, is_following) = tokio::try_join!(
            async {
                self.catalog
                    .channel_content(&channel_id)
                    .await
                    .map_err(EngagementError::from)
            },
            self.graph.count_followers(channel_id),
            self.graph.count_following(channel_id),
            async {
                match viewer_id {
                    Some(viewer_id) => self.graph.is_following(viewer_id, channel_id).await,
                    None => Ok(false),
                }
            },
        )?;

        let like_count = self
            .interactions
            .count_for_targets(TargetKind::ContentItem, &content.item_ids)
            .await?;

        Ok(ChannelSnapshot {
            channel_id,
            username: channel.username.as_str().to_string(),
            full_name: channel.full_name.as_str().to_string(),
            avatar_url: channel.avatar_url.clone(),
            cover_image_url: channel.cover_image_url.clone(),
            follower_count,
            following_count,
            is_following,
            content_count: content.item_ids.len() as u64,
            total_views: content.total_views,
            like_count,
        })
    }
}

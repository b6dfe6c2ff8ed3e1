//! Content catalog port.
//!
//! Content items, comments and posts are owned by other subsystems. The
//! engagement core only needs to know whether a target exists and what a
//! channel owns.

use async_trait::async_trait;

use crate::domain::channel::ChannelContent;
use crate::domain::foundation::{DomainError, PrincipalId, TargetId};
use crate::domain::interaction::TargetKind;

/// Read-only view of content owned elsewhere.
///
/// # Contract
///
/// - `target_exists` answers for exactly the given kind; a comment id asked
///   about as a post does not exist
/// - `channel_content` returns an empty `ChannelContent` for a principal
///   that owns nothing
#[async_trait]
pub trait ContentCatalog: Send + Sync {
    async fn target_exists(&self, kind: TargetKind, id: &TargetId) -> Result<bool, DomainError>;

    async fn channel_content(&self, owner_id: &PrincipalId) -> Result<ChannelContent, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptyCatalog;

    #[async_trait]
    impl ContentCatalog for EmptyCatalog {
        async fn target_exists(&self, _kind: TargetKind, _id: &TargetId) -> Result<bool, DomainError> {
            Ok(false)
        }

        async fn channel_content(&self, _owner_id: &PrincipalId) -> Result<ChannelContent, DomainError> {
            Ok(ChannelContent::default())
        }
    }

    #[tokio::test]
    async fn empty_catalog_reports_nothing_owned() {
        let catalog: Box<dyn ContentCatalog> = Box::new(EmptyCatalog);
        let content = catalog.channel_content(&PrincipalId::new()).await.unwrap();
        assert!(content.item_ids.is_empty());
        assert_eq!(content.total_views, 0);
    }
}

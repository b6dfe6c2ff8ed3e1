//! In-memory content catalog for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::channel::ChannelContent;
use crate::domain::foundation::{DomainError, PrincipalId, TargetId};
use crate::domain::interaction::TargetKind;
use crate::ports::ContentCatalog;

#[derive(Debug, Clone)]
struct CatalogEntry {
    owner_id: PrincipalId,
    views: u64,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryContentCatalog {
    entries: Arc<RwLock<HashMap<(TargetKind, TargetId), CatalogEntry>>>,
}

impl InMemoryContentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target and return its id.
    pub async fn add(&self, kind: TargetKind, owner_id: PrincipalId, views: u64) -> TargetId {
        let id = TargetId::new();
        self.entries
            .write()
            .await
            .insert((kind, id), CatalogEntry { owner_id, views });
        id
    }
}

#[async_trait]
impl ContentCatalog for InMemoryContentCatalog {
    async fn target_exists(&self, kind: TargetKind, id: &TargetId) -> Result<bool, DomainError> {
        Ok(self.entries.read().await.contains_key(&(kind, *id)))
    }

    async fn channel_content(&self, owner_id: &PrincipalId) -> Result<ChannelContent, DomainError> {
        let entries = self.entries.read().await;
        let mut content = ChannelContent::default();
        for ((kind, id), entry) in entries.iter() {
            if *kind == TargetKind::ContentItem && &entry.owner_id == owner_id {
                content.item_ids.push(*id);
                content.total_views += entry.views;
            }
        }
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn target_exists_is_kind_specific() {
        let catalog = InMemoryContentCatalog::new();
        let id = catalog.add(TargetKind::Comment, PrincipalId::new(), 0).await;

        assert!(catalog.target_exists(TargetKind::Comment, &id).await.unwrap());
        assert!(!catalog.target_exists(TargetKind::Post, &id).await.unwrap());
    }

    #[tokio::test]
    async fn channel_content_sums_views_of_owned_items_only() {
        let catalog = InMemoryContentCatalog::new();
        let owner = PrincipalId::new();
        catalog.add(TargetKind::ContentItem, owner, 10).await;
        catalog.add(TargetKind::ContentItem, owner, 32).await;
        catalog.add(TargetKind::Post, owner, 99).await;
        catalog.add(TargetKind::ContentItem, PrincipalId::new(), 1000).await;

        let content = catalog.channel_content(&owner).await.unwrap();
        assert_eq!(content.item_ids.len(), 2);
        assert_eq!(content.total_views, 42);
    }
}

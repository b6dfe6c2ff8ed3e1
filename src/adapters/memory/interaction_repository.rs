//! In-memory interaction store keyed by (principal, target, kind).

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, InteractionId, PrincipalId, TargetId};
use crate::domain::interaction::{Interaction, InteractionKey, TargetKind};
use crate::ports::InteractionRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryInteractionRepository {
    rows: Arc<RwLock<HashMap<InteractionKey, Interaction>>>,
}

impl InMemoryInteractionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored interactions for a key; never more than one.
    pub async fn count_key(&self, key: &InteractionKey) -> usize {
        usize::from(self.rows.read().await.contains_key(key))
    }
}

#[async_trait]
impl InteractionRepository for InMemoryInteractionRepository {
    async fn find(&self, key: &InteractionKey) -> Result<Option<Interaction>, DomainError> {
        Ok(self.rows.read().await.get(key).cloned())
    }

    async fn insert(&self, interaction: &Interaction) -> Result<(), DomainError> {
        let mut rows = self.rows.write().await;
        let key = interaction.key();
        if rows.contains_key(&key) {
            return Err(DomainError::conflict("Interaction already exists")
                .with_detail("constraint", "interactions_principal_target_kind_key"));
        }
        rows.insert(key, interaction.clone());
        Ok(())
    }

    async fn delete(&self, id: &InteractionId) -> Result<(), DomainError> {
        self.rows.write().await.retain(|_, row| &row.id != id);
        Ok(())
    }

    async fn list_by_principal(
        &self,
        principal_id: &PrincipalId,
        kind: TargetKind,
    ) -> Result<Vec<Interaction>, DomainError> {
        let mut list: Vec<Interaction> = self
            .rows
            .read()
            .await
            .values()
            .filter(|row| &row.principal_id == principal_id && row.target_kind == kind)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn count_for_targets(
        &self,
        kind: TargetKind,
        target_ids: &[TargetId],
    ) -> Result<u64, DomainError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .filter(|row| row.target_kind == kind && target_ids.contains(&row.target_id))
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn list_is_filtered_by_kind_and_newest_first() {
        let repo = InMemoryInteractionRepository::new();
        let principal = PrincipalId::new();

        let older = Interaction::new(InteractionKey::new(principal, TargetId::new(), TargetKind::ContentItem));
        let mut newer = Interaction::new(InteractionKey::new(principal, TargetId::new(), TargetKind::ContentItem));
        newer.created_at = older.created_at.plus_secs(5);
        let comment = Interaction::new(InteractionKey::new(principal, TargetId::new(), TargetKind::Comment));

        for row in [&older, &newer, &comment] {
            repo.insert(row).await.unwrap();
        }

        let list = repo.list_by_principal(&principal, TargetKind::ContentItem).await.unwrap();
        assert_eq!(list, vec![newer, older]);
    }

    #[tokio::test]
    async fn count_for_targets_only_counts_matching_kind() {
        let repo = InMemoryInteractionRepository::new();
        let target = TargetId::new();

        repo.insert(&Interaction::new(InteractionKey::new(PrincipalId::new(), target, TargetKind::ContentItem)))
            .await
            .unwrap();
        repo.insert(&Interaction::new(InteractionKey::new(PrincipalId::new(), target, TargetKind::ContentItem)))
            .await
            .unwrap();
        repo.insert(&Interaction::new(InteractionKey::new(PrincipalId::new(), target, TargetKind::Post)))
            .await
            .unwrap();

        assert_eq!(repo.count_for_targets(TargetKind::ContentItem, &[target]).await.unwrap(), 2);
        assert_eq!(repo.count_for_targets(TargetKind::ContentItem, &[]).await.unwrap(), 0);
    }
}

//! Interaction engine: toggles likes on content items, comments and posts.

use std::sync::Arc;

use async_trait::async_trait;

use super::toggle::{toggle, ToggleStore};
use crate::domain::foundation::{DomainError, PrincipalId, TargetId};
use crate::domain::interaction::{
    EngagementError, Interaction, InteractionKey, TargetKind, ToggleOutcome,
};
use crate::ports::{ContentCatalog, InteractionRepository};

struct InteractionToggle<'a> {
    interactions: &'a dyn InteractionRepository,
}

#[async_trait]
impl<'a> ToggleStore for InteractionToggle<'a> {
    type Key = InteractionKey;
    type Record = Interaction;

    async fn find(&self, key: &InteractionKey) -> Result<Option<Interaction>, DomainError> {
        self.interactions.find(key).await
    }

    async fn create(&self, key: &InteractionKey) -> Result<Interaction, DomainError> {
        let record = Interaction::new(*key);
        self.interactions.insert(&record).await?;
        Ok(record)
    }

    async fn remove(&self, record: &Interaction) -> Result<(), DomainError> {
        self.interactions.delete(&record.id).await
    }
}

pub struct InteractionEngine {
    interactions: Arc<dyn InteractionRepository>,
    catalog: Arc<dyn ContentCatalog>,
}

impl InteractionEngine {
    pub fn new(
        interactions: Arc<dyn InteractionRepository>,
        catalog: Arc<dyn ContentCatalog>,
    ) -> Self {
        Self {
            interactions,
            catalog,
        }
    }

    /// Add the principal's interaction with the target if absent, remove it
    /// if present.
    pub async fn toggle(
        &self,
        principal_id: PrincipalId,
        target_id: TargetId,
        kind: TargetKind,
    ) -> Result<ToggleOutcome<Interaction>, EngagementError> {
        if !self.catalog.target_exists(kind, &target_id).await? {
            return Err(EngagementError::not_found(format!(
                "No {} with id {}",
                kind, target_id
            )));
        }

        let store = InteractionToggle {
            interactions: self.interactions.as_ref(),
        };
        let key = InteractionKey::new(principal_id, target_id, kind);
        let outcome = toggle(&store, &key).await?;

        tracing::debug!(
            principal_id = %principal_id,
            target_id = %target_id,
            kind = kind.as_str(),
            state = ?outcome.state,
            "Toggled interaction"
        );
        Ok(outcome)
    }

    /// Same as `toggle`, with the kind given as its wire tag.
    pub async fn toggle_tagged(
        &self,
        principal_id: PrincipalId,
        target_id: TargetId,
        kind_tag: &str,
    ) -> Result<ToggleOutcome<Interaction>, EngagementError> {
        let kind: TargetKind = kind_tag.parse()?;
        self.toggle(principal_id, target_id, kind).await
    }

    /// The principal's interactions of one kind, newest first.
    pub async fn list_for_principal(
        &self,
        principal_id: PrincipalId,
        kind: TargetKind,
    ) -> Result<Vec<Interaction>, EngagementError> {
        Ok(self
            .interactions
            .list_by_principal(&principal_id, kind)
            .await?)
    }
}

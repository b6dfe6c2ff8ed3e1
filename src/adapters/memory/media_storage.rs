//! In-memory media storage that records uploads and deletions.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::ports::{MediaStorage, StoredMedia};

#[derive(Debug, Clone, Default)]
pub struct InMemoryMediaStorage {
    stored: Arc<RwLock<HashSet<String>>>,
    deleted: Arc<RwLock<Vec<String>>>,
    fail_uploads: bool,
}

impl InMemoryMediaStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every upload fails with an upstream error.
    pub fn failing() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub async fn contains(&self, public_id: &str) -> bool {
        self.stored.read().await.contains(public_id)
    }

    pub async fn deleted(&self) -> Vec<String> {
        self.deleted.read().await.clone()
    }
}

#[async_trait]
impl MediaStorage for InMemoryMediaStorage {
    async fn upload(&self, staged: &Path) -> Result<StoredMedia, DomainError> {
        // The staged file is consumed regardless of outcome
        let _ = tokio::fs::remove_file(staged).await;

        if self.fail_uploads {
            return Err(DomainError::upstream("Media upload failed"));
        }

        let public_id = uuid::Uuid::new_v4().simple().to_string();
        let extension = staged
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("bin");
        self.stored.write().await.insert(public_id.clone());

        Ok(StoredMedia {
            url: format!("memory://media/{}.{}", public_id, extension),
            public_id,
            duration_secs: None,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), DomainError> {
        self.stored.write().await.remove(public_id);
        self.deleted.write().await.push(public_id.to_string());
        Ok(())
    }
}

//! Local filesystem adapter for the `MediaStorage` port.
//!
//! Stored objects live flat under one directory as `{public_id}.{ext}` and
//! are served from `{public_base_url}/{public_id}.{ext}`.
//!
//! # Atomic Writes
//!
//! The staged upload is copied to `{public_id}.{ext}.tmp` and renamed into
//! place, so a reader never sees a half-written object.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::config::MediaConfig;
use crate::domain::foundation::DomainError;
use crate::ports::{MediaStorage, StoredMedia};

/// Maximum accepted upload size (50 MB).
const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct LocalMediaStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalMediaStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &MediaConfig) -> Self {
        Self::new(config.root_dir.clone(), config.public_base_url.clone())
    }

    /// Lower-cased alphanumeric extension of the staged file, or `bin`.
    fn extension_of(staged: &Path) -> String {
        staged
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .filter(|ext| {
                !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .unwrap_or_else(|| "bin".to_string())
    }

    /// Public ids are 32 lowercase hex characters; anything else cannot name
    /// one of our files.
    fn is_valid_public_id(public_id: &str) -> bool {
        public_id.len() == 32 && public_id.chars().all(|c| c.is_ascii_hexdigit())
    }

    async fn store(&self, staged: &Path) -> Result<StoredMedia, DomainError> {
        let meta = fs::metadata(staged).await.map_err(|e| {
            DomainError::validation("file", format!("Staged upload is not readable: {}", e))
        })?;
        if !meta.is_file() {
            return Err(DomainError::validation("file", "Staged upload is not a file"));
        }
        if meta.len() > MAX_UPLOAD_BYTES {
            return Err(DomainError::validation(
                "file",
                format!("Upload exceeds {} bytes", MAX_UPLOAD_BYTES),
            ));
        }

        fs::create_dir_all(&self.root).await.map_err(|e| {
            DomainError::upstream(format!(
                "Failed to create media directory {}: {}",
                self.root.display(),
                e
            ))
        })?;

        let public_id = uuid::Uuid::new_v4().simple().to_string();
        let file_name = format!("{}.{}", public_id, Self::extension_of(staged));
        let target = self.root.join(&file_name);
        let temp = self.root.join(format!("{}.tmp", file_name));

        fs::copy(staged, &temp)
            .await
            .map_err(|e| DomainError::upstream(format!("Failed to copy upload: {}", e)))?;
        if let Err(e) = fs::rename(&temp, &target).await {
            let _ = fs::remove_file(&temp).await;
            return Err(DomainError::upstream(format!("Failed to store upload: {}", e)));
        }

        tracing::debug!(public_id = %public_id, bytes = meta.len(), "Stored media");

        Ok(StoredMedia {
            url: format!("{}/{}", self.public_base_url, file_name),
            public_id,
            duration_secs: None,
        })
    }
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn upload(&self, staged: &Path) -> Result<StoredMedia, DomainError> {
        let result = self.store(staged).await;
        if let Err(e) = fs::remove_file(staged).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %staged.display(), error = %e, "Failed to remove staged upload");
            }
        }
        result
    }

    async fn delete(&self, public_id: &str) -> Result<(), DomainError> {
        if !Self::is_valid_public_id(public_id) {
            return Ok(());
        }

        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(DomainError::upstream(format!(
                    "Failed to read media directory: {}",
                    e
                )))
            }
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DomainError::upstream(format!("Failed to read media directory: {}", e)))?
        {
            let path = entry.path();
            let matches = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .map(|stem| stem == public_id)
                .unwrap_or(false);
            if matches {
                fs::remove_file(&path).await.map_err(|e| {
                    DomainError::upstream(format!("Failed to delete media {}: {}", public_id, e))
                })?;
                tracing::debug!(public_id = %public_id, "Deleted media");
            }
        }

        Ok(())
    }
}

//! UpdateCoverImageHandler - Sets or replaces the channel cover image.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::foundation::PrincipalId;
use crate::domain::principal::{IdentityError, Principal};
use crate::ports::{media_public_id, MediaStorage, PrincipalRepository};

#[derive(Debug, Clone)]
pub struct UpdateCoverImageCommand {
    pub principal_id: PrincipalId,
    /// Staged upload. Required.
    pub cover_image: Option<PathBuf>,
}

/// Handler for cover image replacement.
///
/// Same ordering as the avatar: upload, swap the column, then delete the
/// object that was replaced, if the principal had one.
pub struct UpdateCoverImageHandler {
    principals: Arc<dyn PrincipalRepository>,
    media: Arc<dyn MediaStorage>,
}

impl UpdateCoverImageHandler {
    pub fn new(principals: Arc<dyn PrincipalRepository>, media: Arc<dyn MediaStorage>) -> Self {
        Self { principals, media }
    }

    pub async fn handle(&self, cmd: UpdateCoverImageCommand) -> Result<Principal, IdentityError> {
        let staged = cmd
            .cover_image
            .ok_or_else(|| IdentityError::media_required("Cover image"))?;

        self.load(&cmd.principal_id).await?;

        let stored = self.media.upload(&staged).await?;
        let previous = match self
            .principals
            .swap_cover_image(&cmd.principal_id, &stored.url)
            .await
        {
            Ok(previous) => previous,
            Err(err) => {
                self.delete_quietly(&stored.public_id).await;
                return Err(err.into());
            }
        };

        if let Some(public_id) = previous.as_deref().and_then(media_public_id) {
            self.delete_quietly(&public_id).await;
        }

        tracing::debug!(principal_id = %cmd.principal_id, "Cover image replaced");
        self.load(&cmd.principal_id).await
    }

    async fn load(&self, id: &PrincipalId) -> Result<Principal, IdentityError> {
        self.principals
            .find_by_id(id)
            .await?
            .ok_or_else(|| IdentityError::not_found("Principal does not exist"))
    }

    async fn delete_quietly(&self, public_id: &str) {
        if let Err(err) = self.media.delete(public_id).await {
            tracing::warn!(public_id = %public_id, error = %err, "Failed to delete media object");
        }
    }
}

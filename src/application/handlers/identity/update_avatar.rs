//! UpdateAvatarHandler - Replaces the avatar and deletes the old object.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::foundation::PrincipalId;
use crate::domain::principal::{IdentityError, Principal};
use crate::ports::{media_public_id, MediaStorage, PrincipalRepository};

#[derive(Debug, Clone)]
pub struct UpdateAvatarCommand {
    pub principal_id: PrincipalId,
    /// Staged upload. Required.
    pub avatar: Option<PathBuf>,
}

/// Handler for avatar replacement.
///
/// The store swaps the avatar column alone and hands back the URL it
/// replaced, so a concurrent account update cannot restore a stale avatar.
/// The previous media object is deleted only after the swap. A failed
/// delete leaves an orphan, which is logged but does not fail the request.
pub struct UpdateAvatarHandler {
    principals: Arc<dyn PrincipalRepository>,
    media: Arc<dyn MediaStorage>,
}

impl UpdateAvatarHandler {
    pub fn new(principals: Arc<dyn PrincipalRepository>, media: Arc<dyn MediaStorage>) -> Self {
        Self { principals, media }
    }

    pub async fn handle(&self, cmd: UpdateAvatarCommand) -> Result<Principal, IdentityError> {
        let staged = cmd
            .avatar
            .ok_or_else(|| IdentityError::media_required("Avatar"))?;

        self.load(&cmd.principal_id).await?;

        let stored = self.media.upload(&staged).await?;
        let previous = match self.principals.swap_avatar(&cmd.principal_id, &stored.url).await {
            Ok(previous) => previous,
            Err(err) => {
                self.delete_quietly(&stored.public_id).await;
                return Err(err.into());
            }
        };

        if let Some(public_id) = media_public_id(&previous) {
            self.delete_quietly(&public_id).await;
        }

        tracing::debug!(principal_id = %cmd.principal_id, "Avatar replaced");
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

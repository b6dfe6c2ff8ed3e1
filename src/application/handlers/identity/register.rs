//! RegisterHandler - Command handler for creating a principal.

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;

use crate::application::CredentialService;
use crate::domain::principal::{Email, FullName, IdentityError, NewPrincipal, Principal, Username};
use crate::ports::{media_public_id, MediaStorage, PrincipalRepository};

/// Command to register a new principal.
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: SecretString,
    /// Staged avatar upload. Required.
    pub avatar: Option<PathBuf>,
    /// Staged cover image upload.
    pub cover_image: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct RegisterResult {
    pub principal: Principal,
}

/// Handler for registration.
///
/// Inputs are validated and the password hashed before anything is
/// uploaded. If the insert fails (most often a username or email
/// conflict) the uploaded media is deleted again.
pub struct RegisterHandler {
    principals: Arc<dyn PrincipalRepository>,
    credentials: Arc<CredentialService>,
    media: Arc<dyn MediaStorage>,
}

impl RegisterHandler {
    pub fn new(
        principals: Arc<dyn PrincipalRepository>,
        credentials: Arc<CredentialService>,
        media: Arc<dyn MediaStorage>,
    ) -> Self {
        Self {
            principals,
            credentials,
            media,
        }
    }

    pub async fn handle(&self, cmd: RegisterCommand) -> Result<RegisterResult, IdentityError> {
        // 1. Validate display attributes
        let username = Username::new(&cmd.username)?;
        let email = Email::new(&cmd.email)?;
        let full_name = FullName::new(&cmd.full_name)?;
        let avatar = cmd
            .avatar
            .ok_or_else(|| IdentityError::media_required("Avatar"))?;

        // 2. Hash the credential (checks the password policy)
        let credential = self.credentials.hash(cmd.password).await?;

        // 3. Upload media
        let avatar = self.media.upload(&avatar).await?;
        let cover_image = match cmd.cover_image {
            Some(path) => match self.media.upload(&path).await {
                Ok(stored) => Some(stored),
                Err(err) => {
                    self.discard(&avatar.url).await;
                    return Err(err.into());
                }
            },
            None => None,
        };

        // 4. Persist; the store enforces username and email uniqueness
        let principal = Principal::register(
            NewPrincipal {
                username,
                email,
                full_name,
                avatar_url: avatar.url.clone(),
                cover_image_url: cover_image.as_ref().map(|c| c.url.clone()),
            },
            credential,
        );

        if let Err(err) = self.principals.insert(&principal).await {
            self.discard(&avatar.url).await;
            if let Some(cover) = &cover_image {
                self.discard(&cover.url).await;
            }
            return Err(err.into());
        }

        tracing::info!(
            principal_id = %principal.id,
            username = %principal.username.as_str(),
            "Registered principal"
        );

        Ok(RegisterResult { principal })
    }

    async fn discard(&self, url: &str) {
        if let Some(public_id) = media_public_id(url) {
            if let Err(err) = self.media.delete(&public_id).await {
                tracing::warn!(error = %err, "Failed to delete orphaned upload");
            }
        }
    }
}

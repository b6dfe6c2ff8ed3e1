//! ChangePasswordHandler - Replaces a principal's credential.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::application::CredentialService;
use crate::domain::foundation::PrincipalId;
use crate::domain::principal::IdentityError;
use crate::ports::PrincipalRepository;

#[derive(Debug)]
pub struct ChangePasswordCommand {
    pub principal_id: PrincipalId,
    pub old_password: SecretString,
    pub new_password: SecretString,
}

/// Handler for password changes.
///
/// The current session is left alone; the principal keeps its refresh token.
pub struct ChangePasswordHandler {
    principals: Arc<dyn PrincipalRepository>,
    credentials: Arc<CredentialService>,
}

impl ChangePasswordHandler {
    pub fn new(principals: Arc<dyn PrincipalRepository>, credentials: Arc<CredentialService>) -> Self {
        Self {
            principals,
            credentials,
        }
    }

    pub async fn handle(&self, cmd: ChangePasswordCommand) -> Result<(), IdentityError> {
        let mut principal = self
            .principals
            .find_by_id(&cmd.principal_id)
            .await?
            .ok_or_else(|| IdentityError::not_found("Principal does not exist"))?;

        if !self
            .credentials
            .verify(&principal, cmd.old_password.clone())
            .await?
        {
            return Err(IdentityError::InvalidCredentials);
        }

        if cmd.old_password.expose_secret() == cmd.new_password.expose_secret() {
            return Err(IdentityError::PasswordUnchanged);
        }

        self.credentials
            .set_credential(&mut principal, cmd.new_password)
            .await?;
        self.principals
            .update_credential(&principal.id, principal.credential())
            .await?;

        tracing::info!(principal_id = %principal.id, "Password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::Argon2CredentialHasher;
    use crate::adapters::memory::InMemoryPrincipalRepository;
    use crate::config::Argon2Settings;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::principal::{test_support, Principal, RefreshFingerprint};

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string())
    }

    async fn setup() -> (ChangePasswordHandler, Arc<CredentialService>, InMemoryPrincipalRepository, Principal) {
        let principals = InMemoryPrincipalRepository::new();
        let hasher = Argon2CredentialHasher::new(&Argon2Settings::testing()).unwrap();
        let credentials = Arc::new(CredentialService::new(Arc::new(hasher), 8));

        let mut principal = test_support::principal("ivan");
        credentials
            .set_credential(&mut principal, secret("first-password"))
            .await
            .unwrap();
        principals.insert(&principal).await.unwrap();

        let handler = ChangePasswordHandler::new(Arc::new(principals.clone()), credentials.clone());
        (handler, credentials, principals, principal)
    }

    fn cmd(id: PrincipalId, old: &str, new: &str) -> ChangePasswordCommand {
        ChangePasswordCommand {
            principal_id: id,
            old_password: secret(old),
            new_password: secret(new),
        }
    }

    #[tokio::test]
    async fn new_password_verifies_afterwards() {
        let (handler, credentials, principals, principal) = setup().await;

        handler
            .handle(cmd(principal.id, "first-password", "second-password"))
            .await
            .unwrap();

        let stored = principals.find_by_id(&principal.id).await.unwrap().unwrap();
        assert!(credentials.verify(&stored, secret("second-password")).await.unwrap());
        assert!(!credentials.verify(&stored, secret("first-password")).await.unwrap());
    }

    #[tokio::test]
    async fn wrong_old_password_is_invalid_credentials() {
        let (handler, _, _, principal) = setup().await;
        let err = handler
            .handle(cmd(principal.id, "not-the-password", "second-password"))
            .await
            .unwrap_err();
        assert_eq!(err, IdentityError::InvalidCredentials);
    }

    #[tokio::test]
    async fn unchanged_password_is_rejected() {
        let (handler, _, _, principal) = setup().await;
        let err = handler
            .handle(cmd(principal.id, "first-password", "first-password"))
            .await
            .unwrap_err();
        assert_eq!(err, IdentityError::PasswordUnchanged);
    }

    #[tokio::test]
    async fn session_survives_password_change() {
        let (handler, _, principals, principal) = setup().await;
        let fingerprint = RefreshFingerprint::of("some-refresh-token");
        principals
            .set_refresh_fingerprint(&principal.id, Some(&fingerprint))
            .await
            .unwrap();

        handler
            .handle(cmd(principal.id, "first-password", "second-password"))
            .await
            .unwrap();

        let stored = principals.find_by_id(&principal.id).await.unwrap().unwrap();
        assert!(stored.refresh_fingerprint().unwrap().matches(&fingerprint));
    }

    #[tokio::test]
    async fn unknown_principal_is_not_found() {
        let (handler, _, _, _) = setup().await;
        let err = handler
            .handle(cmd(PrincipalId::new(), "first-password", "second-password"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}

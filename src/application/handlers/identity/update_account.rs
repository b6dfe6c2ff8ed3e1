//! UpdateAccountHandler - Changes email and full name.

use std::sync::Arc;

use crate::domain::foundation::PrincipalId;
use crate::domain::principal::{Email, FullName, IdentityError, Principal};
use crate::ports::PrincipalRepository;

#[derive(Debug, Clone)]
pub struct UpdateAccountCommand {
    pub principal_id: PrincipalId,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

pub struct UpdateAccountHandler {
    principals: Arc<dyn PrincipalRepository>,
}

impl UpdateAccountHandler {
    pub fn new(principals: Arc<dyn PrincipalRepository>) -> Self {
        Self { principals }
    }

    pub async fn handle(&self, cmd: UpdateAccountCommand) -> Result<Principal, IdentityError> {
        if cmd.email.is_none() && cmd.full_name.is_none() {
            return Err(IdentityError::validation(
                "account",
                "At least one of email or full name is required",
            ));
        }

        let email = cmd.email.as_deref().map(Email::new).transpose()?;
        let full_name = cmd.full_name.as_deref().map(FullName::new).transpose()?;

        // Email uniqueness is enforced by the store
        let principal = self
            .principals
            .update_account_details(&cmd.principal_id, email.as_ref(), full_name.as_ref())
            .await?;

        tracing::debug!(principal_id = %principal.id, "Account details updated");
        Ok(principal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPrincipalRepository;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::principal::test_support;

    async fn setup() -> (UpdateAccountHandler, InMemoryPrincipalRepository) {
        let principals = InMemoryPrincipalRepository::new();
        principals.insert(&test_support::principal("judy")).await.unwrap();
        principals.insert(&test_support::principal("kim")).await.unwrap();
        (UpdateAccountHandler::new(Arc::new(principals.clone())), principals)
    }

    async fn id_of(principals: &InMemoryPrincipalRepository, login: &str) -> PrincipalId {
        principals.find_by_login(login).await.unwrap().unwrap().id
    }

    #[tokio::test]
    async fn updates_only_supplied_fields() {
        let (handler, principals) = setup().await;
        let judy = id_of(&principals, "judy").await;

        let updated = handler
            .handle(UpdateAccountCommand {
                principal_id: judy,
                email: None,
                full_name: Some("Judy Hopps".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(updated.full_name.as_str(), "Judy Hopps");
        assert_eq!(updated.email.as_str(), "judy@example.com");
    }

    #[tokio::test]
    async fn leaves_a_concurrently_swapped_avatar_in_place() {
        let (handler, principals) = setup().await;
        let judy = id_of(&principals, "judy").await;

        principals.swap_avatar(&judy, "/media/fresh.png").await.unwrap();
        handler
            .handle(UpdateAccountCommand {
                principal_id: judy,
                email: Some("judy.h@example.com".to_string()),
                full_name: None,
            })
            .await
            .unwrap();

        let stored = principals.find_by_id(&judy).await.unwrap().unwrap();
        assert_eq!(stored.avatar_url, "/media/fresh.png");
        assert_eq!(stored.email.as_str(), "judy.h@example.com");
    }

    #[tokio::test]
    async fn unknown_principal_is_not_found() {
        let (handler, _) = setup().await;
        let err = handler
            .handle(UpdateAccountCommand {
                principal_id: PrincipalId::new(),
                email: None,
                full_name: Some("Nobody".to_string()),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn taken_email_is_conflict() {
        let (handler, principals) = setup().await;
        let judy = id_of(&principals, "judy").await;

        let err = handler
            .handle(UpdateAccountCommand {
                principal_id: judy,
                email: Some("KIM@example.com".to_string()),
                full_name: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn empty_update_is_invalid_argument() {
        let (handler, principals) = setup().await;
        let judy = id_of(&principals, "judy").await;

        let err = handler
            .handle(UpdateAccountCommand {
                principal_id: judy,
                email: None,
                full_name: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
    }

    #[tokio::test]
    async fn malformed_email_is_invalid_argument() {
        let (handler, principals) = setup().await;
        let judy = id_of(&principals, "judy").await;

        let err = handler
            .handle(UpdateAccountCommand {
                principal_id: judy,
                email: Some("not-an-email".to_string()),
                full_name: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
    }
}

//! LoginHandler - Verifies a credential and starts a session.

use std::sync::Arc;

use secrecy::SecretString;

use crate::application::{CredentialService, TokenPair, TokenService};
use crate::domain::principal::{IdentityError, Principal};
use crate::ports::PrincipalRepository;

/// Command to log in by username or email.
#[derive(Debug)]
pub struct LoginCommand {
    pub login: String,
    pub password: SecretString,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub principal: Principal,
    pub tokens: TokenPair,
}

pub struct LoginHandler {
    principals: Arc<dyn PrincipalRepository>,
    credentials: Arc<CredentialService>,
    tokens: Arc<TokenService>,
}

impl LoginHandler {
    pub fn new(
        principals: Arc<dyn PrincipalRepository>,
        credentials: Arc<CredentialService>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            principals,
            credentials,
            tokens,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, IdentityError> {
        let login = cmd.login.trim().to_lowercase();
        if login.is_empty() {
            return Err(IdentityError::validation("login", "Username or email is required"));
        }

        let principal = self
            .principals
            .find_by_login(&login)
            .await?
            .ok_or_else(|| IdentityError::not_found("Principal does not exist"))?;

        if !self.credentials.verify(&principal, cmd.password).await? {
            tracing::debug!(principal_id = %principal.id, "Login rejected: bad password");
            return Err(IdentityError::InvalidCredentials);
        }

        let tokens = self.tokens.mint(&principal).await?;
        tracing::info!(principal_id = %principal.id, "Principal logged in");

        Ok(LoginResult { principal, tokens })
    }
}

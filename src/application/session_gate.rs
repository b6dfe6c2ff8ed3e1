//! Session gate: resolves the principal behind an access token.

use std::sync::Arc;

use crate::domain::foundation::{AuthError, AuthenticatedPrincipal};
use crate::ports::{PrincipalRepository, TokenSigner};

/// Verifies access tokens at the start of protected operations.
///
/// The gate never rotates tokens and never writes.
pub struct SessionGate {
    principals: Arc<dyn PrincipalRepository>,
    signer: Arc<dyn TokenSigner>,
}

impl SessionGate {
    pub fn new(principals: Arc<dyn PrincipalRepository>, signer: Arc<dyn TokenSigner>) -> Self {
        Self { principals, signer }
    }

    pub async fn authenticate(
        &self,
        access_token: Option<&str>,
    ) -> Result<AuthenticatedPrincipal, AuthError> {
        let token = access_token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = self.signer.verify_access(token)?;

        let principal = self
            .principals
            .find_by_id(&claims.sub)
            .await
            .map_err(|e| AuthError::service_unavailable(e.message))?
            .ok_or(AuthError::PrincipalNotFound)?;

        Ok(principal.to_authenticated())
    }
}

//! GetCurrentPrincipalHandler - Query handler for the caller's own profile.

use std::sync::Arc;

use crate::domain::foundation::PrincipalId;
use crate::domain::principal::{IdentityError, Principal};
use crate::ports::PrincipalRepository;

#[derive(Debug, Clone)]
pub struct GetCurrentPrincipalQuery {
    pub principal_id: PrincipalId,
}

pub struct GetCurrentPrincipalHandler {
    principals: Arc<dyn PrincipalRepository>,
}

impl GetCurrentPrincipalHandler {
    pub fn new(principals: Arc<dyn PrincipalRepository>) -> Self {
        Self { principals }
    }

    pub async fn handle(&self, query: GetCurrentPrincipalQuery) -> Result<Principal, IdentityError> {
        self.principals
            .find_by_id(&query.principal_id)
            .await?
            .ok_or_else(|| IdentityError::not_found("Principal does not exist"))
    }
}

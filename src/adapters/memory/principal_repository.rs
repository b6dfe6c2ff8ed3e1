//! In-memory principal store.
//!
//! Unique keys and the refresh-fingerprint compare-and-swap are checked
//! under a single write lock, which gives the same atomicity a database
//! unique index and conditional `UPDATE` would.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, PrincipalId, Timestamp};
use crate::domain::principal::{
    CredentialHash, Email, FullName, Principal, PrincipalSummary, RefreshFingerprint, Username,
};
use crate::ports::PrincipalRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryPrincipalRepository {
    rows: Arc<RwLock<HashMap<PrincipalId, Principal>>>,
}

impl InMemoryPrincipalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored principals.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

fn duplicate_username() -> DomainError {
    DomainError::conflict("Username is already taken")
        .with_detail("constraint", "principals_username_key")
}

fn duplicate_email() -> DomainError {
    DomainError::conflict("Email is already registered")
        .with_detail("constraint", "principals_email_key")
}

fn missing(id: &PrincipalId) -> DomainError {
    DomainError::not_found(format!("Principal {} not found", id))
}

#[async_trait]
impl PrincipalRepository for InMemoryPrincipalRepository {
    async fn insert(&self, principal: &Principal) -> Result<(), DomainError> {
        let mut rows = self.rows.write().await;
        if rows.values().any(|p| p.username == principal.username) {
            return Err(duplicate_username());
        }
        if rows.values().any(|p| p.email == principal.email) {
            return Err(duplicate_email());
        }
        rows.insert(principal.id, principal.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PrincipalId) -> Result<Option<Principal>, DomainError> {
        Ok(self.rows.read().await.get(id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Principal>, DomainError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|p| &p.username == username)
            .cloned())
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<Principal>, DomainError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|p| p.username.as_str() == login || p.email.as_str() == login)
            .cloned())
    }

    async fn find_summaries(
        &self,
        ids: &[PrincipalId],
    ) -> Result<Vec<PrincipalSummary>, DomainError> {
        let rows = self.rows.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| rows.get(id))
            .map(Principal::summary)
            .collect())
    }

    async fn update_account_details(
        &self,
        id: &PrincipalId,
        email: Option<&Email>,
        full_name: Option<&FullName>,
    ) -> Result<Principal, DomainError> {
        let mut rows = self.rows.write().await;
        if let Some(email) = email {
            if rows.values().any(|p| &p.id != id && &p.email == email) {
                return Err(duplicate_email());
            }
        }
        let row = rows.get_mut(id).ok_or_else(|| missing(id))?;
        row.update_account(email.cloned(), full_name.cloned());
        Ok(row.clone())
    }

    async fn swap_avatar(&self, id: &PrincipalId, url: &str) -> Result<String, DomainError> {
        let mut rows = self.rows.write().await;
        let row = rows.get_mut(id).ok_or_else(|| missing(id))?;
        Ok(row.replace_avatar(url))
    }

    async fn swap_cover_image(
        &self,
        id: &PrincipalId,
        url: &str,
    ) -> Result<Option<String>, DomainError> {
        let mut rows = self.rows.write().await;
        let row = rows.get_mut(id).ok_or_else(|| missing(id))?;
        Ok(row.replace_cover_image(url))
    }

    async fn update_credential(
        &self,
        id: &PrincipalId,
        credential: &CredentialHash,
    ) -> Result<(), DomainError> {
        let mut rows = self.rows.write().await;
        let row = rows.get_mut(id).ok_or_else(|| missing(id))?;
        row.credential = credential.clone();
        row.updated_at = Timestamp::now();
        Ok(())
    }

    async fn set_refresh_fingerprint(
        &self,
        id: &PrincipalId,
        fingerprint: Option<&RefreshFingerprint>,
    ) -> Result<(), DomainError> {
        let mut rows = self.rows.write().await;
        let row = rows.get_mut(id).ok_or_else(|| missing(id))?;
        row.refresh_fingerprint = fingerprint.cloned();
        Ok(())
    }

    async fn replace_refresh_fingerprint(
        &self,
        id: &PrincipalId,
        expected: &RefreshFingerprint,
        next: &RefreshFingerprint,
    ) -> Result<bool, DomainError> {
        let mut rows = self.rows.write().await;
        let row = rows.get_mut(id).ok_or_else(|| missing(id))?;
        match &row.refresh_fingerprint {
            Some(current) if current.matches(expected) => {
                row.refresh_fingerprint = Some(next.clone());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

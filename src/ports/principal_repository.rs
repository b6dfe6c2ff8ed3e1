//! Principal persistence port.
//!
//! Username and email uniqueness is enforced by the store, not by a
//! check-then-insert in the caller. The refresh fingerprint has its own
//! compare-and-swap operation so that concurrent rotations are arbitrated
//! by the store.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PrincipalId};
use crate::domain::principal::{
    CredentialHash, Email, FullName, Principal, PrincipalSummary, RefreshFingerprint, Username,
};

/// Repository port for Principal aggregates.
///
/// # Contract
///
/// Implementations must:
/// - Return `ErrorCode::Conflict` from `insert` and
///   `update_account_details` when a username or email is already taken
/// - Write only the columns an update names, in one statement, so that
///   concurrent updates of different columns never overwrite each other
/// - Return `ErrorCode::NotFound` from updates addressed to a missing id
/// - Apply `replace_refresh_fingerprint` atomically: it succeeds only when
///   the stored fingerprint equals `expected` at the instant of the write
/// - Return `ErrorCode::Upstream` for storage failures
#[async_trait]
pub trait PrincipalRepository: Send + Sync {
    /// Persist a newly registered principal.
    async fn insert(&self, principal: &Principal) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &PrincipalId) -> Result<Option<Principal>, DomainError>;

    async fn find_by_username(&self, username: &Username)
        -> Result<Option<Principal>, DomainError>;

    /// Find by username or email. `login` is already trimmed and lower-cased.
    async fn find_by_login(&self, login: &str) -> Result<Option<Principal>, DomainError>;

    /// Summaries for the given ids, in no particular order. Unknown ids are
    /// skipped.
    async fn find_summaries(&self, ids: &[PrincipalId])
        -> Result<Vec<PrincipalSummary>, DomainError>;

    /// Set email and/or full name and return the stored principal. `None`
    /// leaves a column unchanged.
    async fn update_account_details(
        &self,
        id: &PrincipalId,
        email: Option<&Email>,
        full_name: Option<&FullName>,
    ) -> Result<Principal, DomainError>;

    /// Point the avatar at `url`, returning the URL it replaced.
    async fn swap_avatar(&self, id: &PrincipalId, url: &str) -> Result<String, DomainError>;

    /// Point the cover image at `url`, returning the URL it replaced, if any.
    async fn swap_cover_image(
        &self,
        id: &PrincipalId,
        url: &str,
    ) -> Result<Option<String>, DomainError>;

    async fn update_credential(
        &self,
        id: &PrincipalId,
        credential: &CredentialHash,
    ) -> Result<(), DomainError>;

    /// Unconditionally set (or clear, with `None`) the refresh fingerprint.
    async fn set_refresh_fingerprint(
        &self,
        id: &PrincipalId,
        fingerprint: Option<&RefreshFingerprint>,
    ) -> Result<(), DomainError>;

    /// Replace the refresh fingerprint only if it still equals `expected`.
    ///
    /// Returns `Ok(false)` when another writer got there first.
    async fn replace_refresh_fingerprint(
        &self,
        id: &PrincipalId,
        expected: &RefreshFingerprint,
        next: &RefreshFingerprint,
    ) -> Result<bool, DomainError>;
}

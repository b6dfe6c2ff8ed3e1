//! Principal aggregate.
//!
//! A principal is an account and, at the same time, a channel other
//! principals can follow. It owns its credential hash and a fingerprint of
//! the single refresh token that is currently valid for it. Principals are
//! never hard-deleted.

use serde::Serialize;

use super::{CredentialHash, Email, FullName, RefreshFingerprint, Username};
use crate::domain::foundation::{AuthenticatedPrincipal, PrincipalId, Timestamp};

/// Attributes supplied at registration.
#[derive(Debug, Clone)]
pub struct NewPrincipal {
    pub username: Username,
    pub email: Email,
    pub full_name: FullName,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Principal {
    pub id: PrincipalId,
    pub username: Username,
    pub email: Email,
    pub full_name: FullName,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
    pub(crate) credential: CredentialHash,
    pub(crate) refresh_fingerprint: Option<RefreshFingerprint>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Principal {
    /// Creates a freshly registered principal with no active session.
    pub fn register(attrs: NewPrincipal, credential: CredentialHash) -> Self {
        let now = Timestamp::now();
        Self {
            id: PrincipalId::new(),
            username: attrs.username,
            email: attrs.email,
            full_name: attrs.full_name,
            avatar_url: attrs.avatar_url,
            cover_image_url: attrs.cover_image_url,
            credential,
            refresh_fingerprint: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn credential(&self) -> &CredentialHash {
        &self.credential
    }

    pub fn refresh_fingerprint(&self) -> Option<&RefreshFingerprint> {
        self.refresh_fingerprint.as_ref()
    }

    /// True while a refresh token is outstanding.
    pub fn has_active_session(&self) -> bool {
        self.refresh_fingerprint.is_some()
    }

    /// Replaces the credential hash. The only way a credential changes.
    pub fn set_credential(&mut self, credential: CredentialHash) {
        self.credential = credential;
        self.touch();
    }

    /// Applies an account details update; `None` leaves a field unchanged.
    pub fn update_account(&mut self, email: Option<Email>, full_name: Option<FullName>) {
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(full_name) = full_name {
            self.full_name = full_name;
        }
        self.touch();
    }

    /// Swaps the avatar, returning the previous URL.
    pub fn replace_avatar(&mut self, url: impl Into<String>) -> String {
        let previous = std::mem::replace(&mut self.avatar_url, url.into());
        self.touch();
        previous
    }

    /// Swaps the cover image, returning the previous URL if there was one.
    pub fn replace_cover_image(&mut self, url: impl Into<String>) -> Option<String> {
        let previous = self.cover_image_url.replace(url.into());
        self.touch();
        previous
    }

    pub fn summary(&self) -> PrincipalSummary {
        PrincipalSummary {
            id: self.id,
            username: self.username.as_str().to_string(),
            full_name: self.full_name.as_str().to_string(),
            avatar_url: self.avatar_url.clone(),
        }
    }

    pub fn to_authenticated(&self) -> AuthenticatedPrincipal {
        AuthenticatedPrincipal::new(
            self.id,
            self.username.as_str(),
            self.email.as_str(),
            self.full_name.as_str(),
        )
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

/// Public view of a principal used in follower listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrincipalSummary {
    pub id: PrincipalId,
    pub username: String,
    pub full_name: String,
    pub avatar_url: String,
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn principal(username: &str) -> Principal {
        Principal::register(
            NewPrincipal {
                username: Username::new(username).unwrap(),
                email: Email::new(format!("{username}@example.com")).unwrap(),
                full_name: FullName::new(format!("{username} tester")).unwrap(),
                avatar_url: format!("/media/{username}.png"),
                cover_image_url: None,
            },
            CredentialHash::from_encoded("$argon2id$test"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::principal;
    use super::*;

    #[test]
    fn registered_principal_has_no_session() {
        let p = principal("alice");
        assert!(!p.has_active_session());
        assert_eq!(p.created_at, p.updated_at);
    }

    #[test]
    fn update_account_only_touches_supplied_fields() {
        let mut p = principal("alice");
        let original_name = p.full_name.clone();

        p.update_account(Some(Email::new("new@example.com").unwrap()), None);

        assert_eq!(p.email.as_str(), "new@example.com");
        assert_eq!(p.full_name, original_name);
    }

    #[test]
    fn replace_avatar_returns_previous_url() {
        let mut p = principal("alice");
        let old = p.replace_avatar("/media/new.png");
        assert_eq!(old, "/media/alice.png");
        assert_eq!(p.avatar_url, "/media/new.png");
    }

    #[test]
    fn replace_cover_image_returns_none_first_time() {
        let mut p = principal("alice");
        assert_eq!(p.replace_cover_image("/media/cover.png"), None);
        assert_eq!(
            p.replace_cover_image("/media/cover2.png"),
            Some("/media/cover.png".to_string())
        );
    }

    #[test]
    fn set_credential_replaces_hash() {
        let mut p = principal("alice");
        p.set_credential(CredentialHash::from_encoded("$argon2id$other"));
        assert_eq!(p.credential().as_str(), "$argon2id$other");
    }

    #[test]
    fn summary_and_authenticated_view_share_identity() {
        let p = principal("alice");
        assert_eq!(p.summary().id, p.id);
        assert_eq!(p.to_authenticated().username, "alice");
        assert_eq!(p.to_authenticated().email, "alice@example.com");
    }
}

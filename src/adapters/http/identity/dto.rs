//! HTTP DTOs for the user endpoints.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::application::TokenPair;
use crate::domain::foundation::{PrincipalId, Timestamp};
use crate::domain::principal::Principal;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Registration request. Media fields name files in the staging directory.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: SecretString,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
}

/// Login by username or email.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub password: SecretString,
}

impl LoginRequest {
    /// The username if given, otherwise the email.
    pub fn login(&self) -> String {
        self.username
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or_default()
            .to_string()
    }
}

/// Refresh request body, for clients that cannot send cookies.
#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: SecretString,
    pub new_password: SecretString,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAccountRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAvatarRequest {
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCoverImageRequest {
    #[serde(default)]
    pub cover_image: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A principal as the API shows it. Never includes the credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrincipalResponse {
    pub id: PrincipalId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Principal> for PrincipalResponse {
    fn from(p: &Principal) -> Self {
        Self {
            id: p.id,
            username: p.username.as_str().to_string(),
            email: p.email.as_str().to_string(),
            full_name: p.full_name.as_str().to_string(),
            avatar_url: p.avatar_url.clone(),
            cover_image_url: p.cover_image_url.clone(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: Timestamp,
    pub refresh_expires_at: Timestamp,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            access_expires_at: pair.access_expires_at,
            refresh_expires_at: pair.refresh_expires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub principal: PrincipalResponse,
    #[serde(flatten)]
    pub tokens: TokenResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::principal::test_support;
    use serde_json::json;

    #[test]
    fn principal_response_omits_credential() {
        let principal = test_support::principal("olga");
        let json = serde_json::to_value(PrincipalResponse::from(&principal)).unwrap();

        assert_eq!(json["username"], "olga");
        assert!(json.get("credential").is_none());
        assert!(json.get("refresh_fingerprint").is_none());
    }

    #[test]
    fn login_prefers_username_then_email() {
        let req: LoginRequest =
            serde_json::from_value(json!({"email": "a@b.co", "password": "pw"})).unwrap();
        assert_eq!(req.login(), "a@b.co");

        let req: LoginRequest = serde_json::from_value(
            json!({"username": "alice", "email": "a@b.co", "password": "pw"}),
        )
        .unwrap();
        assert_eq!(req.login(), "alice");
    }

    #[test]
    fn register_request_media_is_optional() {
        let req: RegisterRequest = serde_json::from_value(json!({
            "username": "u", "email": "e@x.io", "full_name": "F", "password": "p"
        }))
        .unwrap();
        assert!(req.avatar.is_none());
        assert!(req.cover_image.is_none());
    }
}

//! Shared fixture: the application wired over in-memory adapters.

#![allow(dead_code)]

use std::sync::Arc;

use secrecy::SecretString;
use tempfile::TempDir;

use viewpoint::adapters::auth::{Argon2CredentialHasher, JwtTokenSigner};
use viewpoint::adapters::http::{Adapters, AppState, SessionSettings};
use viewpoint::adapters::memory::{
    InMemoryContentCatalog, InMemoryFollowRepository, InMemoryInteractionRepository,
    InMemoryMediaStorage, InMemoryPrincipalRepository,
};
use viewpoint::application::handlers::identity::{LoginCommand, LoginResult, RegisterCommand};
use viewpoint::application::TokenLifetimes;
use viewpoint::config::Argon2Settings;
use viewpoint::domain::principal::Principal;

pub const PASSWORD: &str = "correct horse battery";

pub struct TestApp {
    pub state: AppState,
    pub principals: Arc<InMemoryPrincipalRepository>,
    pub interactions: Arc<InMemoryInteractionRepository>,
    pub catalog: Arc<InMemoryContentCatalog>,
    pub media: Arc<InMemoryMediaStorage>,
    staging: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let staging = TempDir::new().unwrap();
        let principals = Arc::new(InMemoryPrincipalRepository::new());
        let interactions = Arc::new(InMemoryInteractionRepository::new());
        let catalog = Arc::new(InMemoryContentCatalog::new());
        let media = Arc::new(InMemoryMediaStorage::new());

        let adapters = Adapters {
            principals: principals.clone(),
            interactions: interactions.clone(),
            follows: Arc::new(InMemoryFollowRepository::new()),
            catalog: catalog.clone(),
            media: media.clone(),
            hasher: Arc::new(Argon2CredentialHasher::new(&Argon2Settings::testing()).unwrap()),
            signer: Arc::new(JwtTokenSigner::new(
                &SecretString::new("integration-access-secret".to_string()),
                &SecretString::new("integration-refresh-secret".to_string()),
                0,
            )),
        };
        let settings = SessionSettings {
            lifetimes: TokenLifetimes {
                access_secs: 900,
                refresh_secs: 86_400,
            },
            password_min_length: 8,
            cookie_secure: false,
            staging_dir: staging.path().to_path_buf(),
        };

        Self {
            state: AppState::new(adapters, settings),
            principals,
            interactions,
            catalog,
            media,
            staging,
        }
    }

    pub async fn register(&self, username: &str) -> Principal {
        let cmd = RegisterCommand {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            full_name: format!("{} Example", username),
            password: SecretString::new(PASSWORD.to_string()),
            avatar: Some(self.staging.path().join(format!("{}.png", username))),
            cover_image: None,
        };
        self.state.register_handler().handle(cmd).await.unwrap().principal
    }

    pub async fn login(&self, login: &str) -> LoginResult {
        self.state
            .login_handler()
            .handle(LoginCommand {
                login: login.to_string(),
                password: SecretString::new(PASSWORD.to_string()),
            })
            .await
            .unwrap()
    }
}

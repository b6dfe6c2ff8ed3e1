//! Shared application state for the HTTP router.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::FromRef;

use crate::application::handlers::identity::{
    ChangePasswordHandler, GetCurrentPrincipalHandler, LoginHandler, RegisterHandler,
    UpdateAccountHandler, UpdateAvatarHandler, UpdateCoverImageHandler,
};
use crate::application::{
    ChannelAggregator, CredentialService, InteractionEngine, RelationshipGraph, SessionGate,
    TokenLifetimes, TokenService,
};
use crate::config::{AuthConfig, MediaConfig};
use crate::ports::{
    ContentCatalog, CredentialHasher, FollowRepository, InteractionRepository, MediaStorage,
    PrincipalRepository, TokenSigner,
};

/// Port implementations the application is assembled from.
#[derive(Clone)]
pub struct Adapters {
    pub principals: Arc<dyn PrincipalRepository>,
    pub interactions: Arc<dyn InteractionRepository>,
    pub follows: Arc<dyn FollowRepository>,
    pub catalog: Arc<dyn ContentCatalog>,
    pub media: Arc<dyn MediaStorage>,
    pub hasher: Arc<dyn CredentialHasher>,
    pub signer: Arc<dyn TokenSigner>,
}

/// Session and upload settings the HTTP layer needs.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub lifetimes: TokenLifetimes,
    pub password_min_length: usize,
    pub cookie_secure: bool,
    /// Directory staged uploads are resolved against.
    pub staging_dir: PathBuf,
}

impl SessionSettings {
    pub fn from_config(auth: &AuthConfig, media: &MediaConfig) -> Self {
        Self {
            lifetimes: TokenLifetimes::from_config(auth),
            password_min_length: auth.password_min_length,
            cookie_secure: auth.cookie_secure,
            staging_dir: media.staging_dir.clone(),
        }
    }
}

/// Shared application state.
///
/// Cloned per request; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub principals: Arc<dyn PrincipalRepository>,
    pub media: Arc<dyn MediaStorage>,
    pub credentials: Arc<CredentialService>,
    pub tokens: Arc<TokenService>,
    pub gate: Arc<SessionGate>,
    pub interactions: Arc<InteractionEngine>,
    pub graph: Arc<RelationshipGraph>,
    pub channels: Arc<ChannelAggregator>,
    pub settings: Arc<SessionSettings>,
}

impl AppState {
    pub fn new(adapters: Adapters, settings: SessionSettings) -> Self {
        let credentials = Arc::new(CredentialService::new(
            adapters.hasher.clone(),
            settings.password_min_length,
        ));
        let tokens = Arc::new(TokenService::new(
            adapters.principals.clone(),
            adapters.signer.clone(),
            settings.lifetimes,
        ));
        let gate = Arc::new(SessionGate::new(
            adapters.principals.clone(),
            adapters.signer.clone(),
        ));
        let interactions = Arc::new(InteractionEngine::new(
            adapters.interactions.clone(),
            adapters.catalog.clone(),
        ));
        let graph = Arc::new(RelationshipGraph::new(
            adapters.principals.clone(),
            adapters.follows.clone(),
        ));
        let channels = Arc::new(ChannelAggregator::new(
            adapters.principals.clone(),
            adapters.interactions.clone(),
            adapters.catalog.clone(),
            graph.clone(),
        ));

        Self {
            principals: adapters.principals,
            media: adapters.media,
            credentials,
            tokens,
            gate,
            interactions,
            graph,
            channels,
            settings: Arc::new(settings),
        }
    }

    pub fn register_handler(&self) -> RegisterHandler {
        RegisterHandler::new(
            self.principals.clone(),
            self.credentials.clone(),
            self.media.clone(),
        )
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(
            self.principals.clone(),
            self.credentials.clone(),
            self.tokens.clone(),
        )
    }

    pub fn change_password_handler(&self) -> ChangePasswordHandler {
        ChangePasswordHandler::new(self.principals.clone(), self.credentials.clone())
    }

    pub fn update_account_handler(&self) -> UpdateAccountHandler {
        UpdateAccountHandler::new(self.principals.clone())
    }

    pub fn update_avatar_handler(&self) -> UpdateAvatarHandler {
        UpdateAvatarHandler::new(self.principals.clone(), self.media.clone())
    }

    pub fn update_cover_image_handler(&self) -> UpdateCoverImageHandler {
        UpdateCoverImageHandler::new(self.principals.clone(), self.media.clone())
    }

    pub fn current_principal_handler(&self) -> GetCurrentPrincipalHandler {
        GetCurrentPrincipalHandler::new(self.principals.clone())
    }
}

impl FromRef<AppState> for Arc<SessionGate> {
    fn from_ref(state: &AppState) -> Self {
        state.gate.clone()
    }
}

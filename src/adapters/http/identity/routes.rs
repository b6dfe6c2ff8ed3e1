//! Axum router for user endpoints.

use axum::routing::{get, patch, post};
use axum::Router;

use super::handlers::{
    change_password, current_principal, login, logout, refresh_token, register, update_account,
    update_avatar, update_cover_image,
};
use crate::adapters::http::engagement::handlers::channel_profile;
use crate::adapters::http::state::AppState;

/// Create the user API router.
///
/// # Routes
///
/// ## Public
/// - `POST /register` - Create a principal
/// - `POST /login` - Start a session
/// - `POST /refresh-token` - Rotate the refresh token
///
/// ## Authenticated
/// - `POST /logout` - Revoke the session
/// - `POST /change-password` - Replace the password
/// - `GET /me` - Current principal
/// - `PATCH /account` - Update email and full name
/// - `PATCH /avatar` - Replace the avatar
/// - `PATCH /cover-image` - Set or replace the cover image
/// - `GET /c/:username` - Channel snapshot by username
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh-token", post(refresh_token))
        .route("/logout", post(logout))
        .route("/change-password", post(change_password))
        .route("/me", get(current_principal))
        .route("/account", patch(update_account))
        .route("/avatar", patch(update_avatar))
        .route("/cover-image", patch(update_cover_image))
        .route("/c/:username", get(channel_profile))
}

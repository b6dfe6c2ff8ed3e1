//! Axum routers for likes, subscriptions and the dashboard.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    channel_stats, list_followers, list_following, list_likes, own_channel_stats,
    toggle_like, toggle_subscription,
};
use crate::adapters::http::state::AppState;

/// - `POST /:kind/:target_id` - Toggle a like
/// - `GET /:kind` - List own likes of one kind
pub fn like_routes() -> Router<AppState> {
    Router::new()
        .route("/:kind/:target_id", post(toggle_like))
        .route("/:kind", get(list_likes))
}

/// - `POST /c/:channel_id` - Toggle following a channel
/// - `GET /c/:channel_id/followers` - List a channel's followers
/// - `GET /following` - List channels the caller follows
pub fn subscription_routes() -> Router<AppState> {
    Router::new()
        .route("/c/:channel_id", post(toggle_subscription))
        .route("/c/:channel_id/followers", get(list_followers))
        .route("/following", get(list_following))
}

/// - `GET /stats` - Caller's own channel snapshot
/// - `GET /stats/:channel_id` - Any channel's snapshot
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(own_channel_stats))
        .route("/stats/:channel_id", get(channel_stats))
}

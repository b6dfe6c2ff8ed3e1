//! HTTP handlers for likes, subscriptions and the dashboard.

use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;

use super::dto::{InteractionListResponse, MemberListResponse, ToggleResponse};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::extractors::RequirePrincipal;
use crate::adapters::http::state::AppState;
use crate::domain::foundation::{PrincipalId, TargetId};
use crate::domain::interaction::{EngagementError, TargetKind};

fn parse_id<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_argument(field, format!("'{}' is not a valid id", raw)))
}

fn parse_kind(raw: &str) -> Result<TargetKind, ApiError> {
    raw.parse::<TargetKind>()
        .map_err(|e| ApiError::from(EngagementError::from(e)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Likes
// ════════════════════════════════════════════════════════════════════════════════

/// POST /likes/:kind/:target_id
pub async fn toggle_like(
    State(state): State<AppState>,
    RequirePrincipal(principal): RequirePrincipal,
    Path((kind, target_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let target_id: TargetId = parse_id("target_id", &target_id)?;
    let outcome = state
        .interactions
        .toggle_tagged(principal.id, target_id, &kind)
        .await?;
    Ok(Json(ToggleResponse::from(outcome)))
}

/// GET /likes/:kind
pub async fn list_likes(
    State(state): State<AppState>,
    RequirePrincipal(principal): RequirePrincipal,
    Path(kind): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = parse_kind(&kind)?;
    let items = state
        .interactions
        .list_for_principal(principal.id, kind)
        .await?;
    Ok(Json(InteractionListResponse::from(items)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Subscriptions
// ════════════════════════════════════════════════════════════════════════════════

/// POST /subscriptions/c/:channel_id
pub async fn toggle_subscription(
    State(state): State<AppState>,
    RequirePrincipal(principal): RequirePrincipal,
    Path(channel_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let channel_id: PrincipalId = parse_id("channel_id", &channel_id)?;
    let outcome = state.graph.follow(principal.id, channel_id).await?;
    Ok(Json(ToggleResponse::from(outcome)))
}

/// GET /subscriptions/c/:channel_id/followers
pub async fn list_followers(
    State(state): State<AppState>,
    RequirePrincipal(_principal): RequirePrincipal,
    Path(channel_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let channel_id: PrincipalId = parse_id("channel_id", &channel_id)?;
    let members = state.graph.list_followers(channel_id).await?;
    Ok(Json(MemberListResponse::from(members)))
}

/// GET /subscriptions/following
pub async fn list_following(
    State(state): State<AppState>,
    RequirePrincipal(principal): RequirePrincipal,
) -> Result<impl IntoResponse, ApiError> {
    let members = state.graph.list_following(principal.id).await?;
    Ok(Json(MemberListResponse::from(members)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Channel statistics
// ════════════════════════════════════════════════════════════════════════════════

/// GET /dashboard/stats
pub async fn own_channel_stats(
    State(state): State<AppState>,
    RequirePrincipal(principal): RequirePrincipal,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state.channels.snapshot(principal.id, None).await?;
    Ok(Json(snapshot))
}

/// GET /dashboard/stats/:channel_id
pub async fn channel_stats(
    State(state): State<AppState>,
    RequirePrincipal(principal): RequirePrincipal,
    Path(channel_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let channel_id: PrincipalId = parse_id("channel_id", &channel_id)?;
    let snapshot = state
        .channels
        .snapshot(channel_id, Some(principal.id))
        .await?;
    Ok(Json(snapshot))
}

/// GET /users/c/:username
pub async fn channel_profile(
    State(state): State<AppState>,
    RequirePrincipal(principal): RequirePrincipal,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state
        .channels
        .snapshot_by_username(&username, Some(principal.id))
        .await?;
    Ok(Json(snapshot))
}

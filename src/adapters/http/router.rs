//! Top-level router and the middleware stack around it.

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::engagement::{dashboard_routes, like_routes, subscription_routes};
use super::identity::user_routes;
use super::state::AppState;
use crate::config::ServerConfig;

/// All API routes under `/api/v1`, plus `/health`.
pub fn api_router(state: AppState) -> Router {
    let v1 = Router::new()
        .nest("/users", user_routes())
        .nest("/likes", like_routes())
        .nest("/subscriptions", subscription_routes())
        .nest("/dashboard", dashboard_routes());

    Router::new()
        .nest("/api/v1", v1)
        .route("/health", get(health))
        .with_state(state)
}

/// Wrap the router in tracing, request ids, timeout and CORS.
pub fn with_middleware(router: Router, server: &ServerConfig) -> Router {
    let router = router
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    match cors_layer(&server.cors_origins) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

/// Credentialed CORS for the configured origins. Browsers refuse wildcard
/// origins with credentials, so no origins means no CORS layer at all.
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
            .allow_credentials(true),
    )
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_origins_means_no_cors_layer() {
        assert!(cors_layer(&[]).is_none());
    }

    #[test]
    fn invalid_origins_are_skipped() {
        assert!(cors_layer(&["bad\norigin".to_string()]).is_none());
        assert!(cors_layer(&[
            "bad\norigin".to_string(),
            "https://app.example.com".to_string()
        ])
        .is_some());
    }
}

//! Request extractors.
//!
//! `RequirePrincipal` runs the session gate at the start of a protected
//! handler. The access token comes from an `Authorization: Bearer` header
//! or, failing that, the `accessToken` cookie.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use super::error::ApiError;
use crate::application::SessionGate;
use crate::domain::foundation::AuthenticatedPrincipal;

pub const ACCESS_COOKIE: &str = "accessToken";
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Access token presented with the request, if any.
pub fn access_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .or_else(|| {
            CookieJar::from_headers(&parts.headers)
                .get(ACCESS_COOKIE)
                .map(|c| c.value().to_string())
        })
}

/// The authenticated caller. Rejects with 401 when the gate refuses.
#[derive(Debug, Clone)]
pub struct RequirePrincipal(pub AuthenticatedPrincipal);

#[async_trait]
impl<S> FromRequestParts<S> for RequirePrincipal
where
    Arc<SessionGate>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let gate = Arc::<SessionGate>::from_ref(state);
        let token = access_token(parts);

        gate.authenticate(token.as_deref())
            .await
            .map(RequirePrincipal)
            .map_err(ApiError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(builder: axum::http::request::Builder) -> Parts {
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn bearer_header_wins_over_cookie() {
        let parts = parts(
            Request::builder()
                .header(AUTHORIZATION, "Bearer header-token")
                .header("cookie", "accessToken=cookie-token"),
        );
        assert_eq!(access_token(&parts).as_deref(), Some("header-token"));
    }

    #[test]
    fn cookie_is_used_without_header() {
        let parts = parts(Request::builder().header("cookie", "accessToken=cookie-token; other=1"));
        assert_eq!(access_token(&parts).as_deref(), Some("cookie-token"));
    }

    #[test]
    fn no_token_is_none() {
        let parts = parts(Request::builder().header(AUTHORIZATION, "Basic abc"));
        assert!(access_token(&parts).is_none());
    }
}

//! HTTP handlers for user endpoints.
//!
//! Login and refresh set the `accessToken` and `refreshToken` cookies and
//! also return both tokens in the body. Logout clears both cookies.

use std::path::{Path, PathBuf};

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::dto::{
    ChangePasswordRequest, LoginRequest, MessageResponse, PrincipalResponse, RefreshRequest,
    RegisterRequest, SessionResponse, TokenResponse, UpdateAccountRequest, UpdateAvatarRequest,
    UpdateCoverImageRequest,
};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::extractors::{RequirePrincipal, ACCESS_COOKIE, REFRESH_COOKIE};
use crate::adapters::http::state::AppState;
use crate::application::handlers::identity::{
    ChangePasswordCommand, GetCurrentPrincipalQuery, LoginCommand, RegisterCommand,
    UpdateAccountCommand, UpdateAvatarCommand, UpdateCoverImageCommand,
};
use crate::application::TokenPair;

// ════════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════════

/// Resolve a staged upload name against the staging directory.
///
/// Only bare file names are accepted.
fn staged_upload(
    staging_dir: &Path,
    field: &str,
    name: Option<String>,
) -> Result<Option<PathBuf>, ApiError> {
    let Some(name) = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(ApiError::invalid_argument(
            field,
            "Upload must be a bare file name",
        ));
    }
    Ok(Some(staging_dir.join(name)))
}

fn session_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

fn with_session_cookies(jar: CookieJar, tokens: &TokenPair, secure: bool) -> CookieJar {
    jar.add(session_cookie(ACCESS_COOKIE, tokens.access_token.clone(), secure))
        .add(session_cookie(REFRESH_COOKIE, tokens.refresh_token.clone(), secure))
}

// ════════════════════════════════════════════════════════════════════════════════
// Session endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// POST /users/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let staging = &state.settings.staging_dir;
    let cmd = RegisterCommand {
        username: request.username,
        email: request.email,
        full_name: request.full_name,
        password: request.password,
        avatar: staged_upload(staging, "avatar", request.avatar)?,
        cover_image: staged_upload(staging, "cover_image", request.cover_image)?,
    };

    let result = state.register_handler().handle(cmd).await?;
    Ok((
        StatusCode::CREATED,
        Json(PrincipalResponse::from(&result.principal)),
    ))
}

/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = LoginCommand {
        login: request.login(),
        password: request.password,
    };

    let result = state.login_handler().handle(cmd).await?;
    let jar = with_session_cookies(jar, &result.tokens, state.settings.cookie_secure);

    let response = SessionResponse {
        principal: PrincipalResponse::from(&result.principal),
        tokens: TokenResponse::from(result.tokens),
    };
    Ok((jar, Json(response)))
}

/// POST /users/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    RequirePrincipal(principal): RequirePrincipal,
) -> Result<impl IntoResponse, ApiError> {
    state.tokens.revoke(&principal.id).await?;

    let jar = jar
        .remove(Cookie::build(ACCESS_COOKIE).path("/"))
        .remove(Cookie::build(REFRESH_COOKIE).path("/"));
    Ok((jar, Json(MessageResponse::new("Logged out"))))
}

/// POST /users/refresh-token
///
/// The refresh token is read from the `refreshToken` cookie, or from the
/// body when no cookie is present.
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<RefreshRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let presented = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .or_else(|| body.and_then(|Json(b)| b.refresh_token));

    let tokens = state.tokens.rotate(presented.as_deref()).await?;
    let jar = with_session_cookies(jar, &tokens, state.settings.cookie_secure);

    Ok((jar, Json(TokenResponse::from(tokens))))
}

// ════════════════════════════════════════════════════════════════════════════════
// Account endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// POST /users/change-password
pub async fn change_password(
    State(state): State<AppState>,
    RequirePrincipal(principal): RequirePrincipal,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = ChangePasswordCommand {
        principal_id: principal.id,
        old_password: request.old_password,
        new_password: request.new_password,
    };

    state.change_password_handler().handle(cmd).await?;
    Ok(Json(MessageResponse::new("Password changed")))
}

/// GET /users/me
pub async fn current_principal(
    State(state): State<AppState>,
    RequirePrincipal(principal): RequirePrincipal,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetCurrentPrincipalQuery {
        principal_id: principal.id,
    };
    let principal = state.current_principal_handler().handle(query).await?;
    Ok(Json(PrincipalResponse::from(&principal)))
}

/// PATCH /users/account
pub async fn update_account(
    State(state): State<AppState>,
    RequirePrincipal(principal): RequirePrincipal,
    Json(request): Json<UpdateAccountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateAccountCommand {
        principal_id: principal.id,
        email: request.email,
        full_name: request.full_name,
    };

    let updated = state.update_account_handler().handle(cmd).await?;
    Ok(Json(PrincipalResponse::from(&updated)))
}

/// PATCH /users/avatar
pub async fn update_avatar(
    State(state): State<AppState>,
    RequirePrincipal(principal): RequirePrincipal,
    Json(request): Json<UpdateAvatarRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateAvatarCommand {
        principal_id: principal.id,
        avatar: staged_upload(&state.settings.staging_dir, "avatar", request.avatar)?,
    };

    let updated = state.update_avatar_handler().handle(cmd).await?;
    Ok(Json(PrincipalResponse::from(&updated)))
}

/// PATCH /users/cover-image
pub async fn update_cover_image(
    State(state): State<AppState>,
    RequirePrincipal(principal): RequirePrincipal,
    Json(request): Json<UpdateCoverImageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateCoverImageCommand {
        principal_id: principal.id,
        cover_image: staged_upload(
            &state.settings.staging_dir,
            "cover_image",
            request.cover_image,
        )?,
    };

    let updated = state.update_cover_image_handler().handle(cmd).await?;
    Ok(Json(PrincipalResponse::from(&updated)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn staged_upload_joins_bare_names() {
        let path = staged_upload(Path::new("/staging"), "avatar", Some("me.png".to_string()))
            .unwrap()
            .unwrap();
        assert_eq!(path, PathBuf::from("/staging/me.png"));
    }

    #[test]
    fn staged_upload_rejects_traversal() {
        for name in ["../etc/passwd", "a/b.png", "..", "a\\b.png"] {
            let err = staged_upload(Path::new("/staging"), "avatar", Some(name.to_string()))
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidArgument);
            assert_eq!(err.field.as_deref(), Some("avatar"));
        }
    }

    #[test]
    fn blank_upload_is_absent() {
        assert!(staged_upload(Path::new("/s"), "avatar", Some("  ".to_string()))
            .unwrap()
            .is_none());
        assert!(staged_upload(Path::new("/s"), "avatar", None).unwrap().is_none());
    }

    #[test]
    fn session_cookies_are_http_only() {
        let cookie = session_cookie(ACCESS_COOKIE, "value".to_string(), true);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }
}

//! HTTP error mapping.
//!
//! Every failure leaves the API as an `ErrorResponse` with a status derived
//! from its `ErrorCode`:
//!
//! | ErrorCode | HTTP Status |
//! |-----------|-------------|
//! | InvalidArgument | 400 |
//! | Unauthenticated | 401 |
//! | NotFound | 404 |
//! | Conflict | 409 |
//! | Upstream | 503 |
//!
//! `details` carries `field` for a rejected input and `reason` for an
//! authentication failure, e.g. `{"reason": "refresh_token_reused"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, ErrorCode};
use crate::domain::interaction::EngagementError;
use crate::domain::principal::IdentityError;

/// JSON error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::Upstream => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Error returned by every API handler.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    pub field: Option<String>,
    pub reason: Option<&'static str>,
}

impl ApiError {
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvalidArgument,
            message: message.into(),
            field: Some(field.into()),
            reason: None,
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        let mut details = serde_json::Map::new();
        if let Some(field) = &self.field {
            details.insert("field".into(), field.clone().into());
        }
        if let Some(reason) = self.reason {
            details.insert("reason".into(), reason.into());
        }
        (!details.is_empty()).then_some(serde_json::Value::Object(details))
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        if err.code() == ErrorCode::Upstream {
            tracing::error!(error = %err, "Identity operation failed upstream");
        }
        let (field, reason) = match &err {
            IdentityError::ValidationFailed { field, .. } => (Some(field.clone()), None),
            IdentityError::InvalidCredentials => {
                (None, Some(AuthError::InvalidCredentials.reason()))
            }
            IdentityError::Unauthenticated(auth) => (None, Some(auth.reason())),
            _ => (None, None),
        };
        Self {
            code: err.code(),
            message: err.message(),
            field,
            reason,
        }
    }
}

impl From<EngagementError> for ApiError {
    fn from(err: EngagementError) -> Self {
        if err.code() == ErrorCode::Upstream {
            tracing::error!(error = %err, "Engagement operation failed upstream");
        }
        let field = match &err {
            EngagementError::InvalidArgument { field, .. } => Some(field.clone()),
            _ => None,
        };
        Self {
            code: err.code(),
            message: err.message(),
            field,
            reason: None,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let message = match &err {
            AuthError::ServiceUnavailable(detail) => {
                tracing::error!("Auth service unavailable: {}", detail);
                "Authentication service unavailable".to_string()
            }
            other => other.to_string(),
        };
        Self {
            code: err.code(),
            message,
            field: None,
            reason: Some(err.reason()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            code: self.code.to_string(),
            details: self.details(),
            message: self.message,
        };
        (status_for(self.code), Json(body)).into_response()
    }
}

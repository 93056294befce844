use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use serde_json::json;
use uuid::Uuid;

use crate::auth::jwt;
use crate::state::SharedState;

/// Identity of a caller that presented a valid bearer token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// Why the gate refused a request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthRejection {
    /// No `Authorization: Bearer ...` header at all.
    TokenRequired,
    /// A token was sent but is malformed, forged or expired.
    InvalidToken,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::TokenRequired => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Token required" })),
            )
                .into_response(),
            AuthRejection::InvalidToken => (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "Invalid or expired token" })),
            )
                .into_response(),
        }
    }
}

/// Resolve the caller from request headers without touching anything else.
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<AuthUser, AuthRejection> {
    let Some(Authorization(bearer)) = headers.typed_get::<Authorization<Bearer>>() else {
        return Err(AuthRejection::TokenRequired);
    };

    let claims = jwt::decode_token(bearer.token(), secret).map_err(|e| {
        tracing::debug!("Rejected bearer token: {e}");
        AuthRejection::InvalidToken
    })?;

    Ok(AuthUser {
        user_id: claims.user_id,
    })
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(&parts.headers, &state.config.jwt_secret)
    }
}

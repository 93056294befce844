use std::sync::LazyLock;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::auth::{jwt, password};
use crate::db;
use crate::error::{is_unique_violation, AppError, JsonBody};
use crate::models::UserProfile;
use crate::state::SharedState;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub(crate) fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub(crate) fn validate_email(email: &str) -> Result<(), AppError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(AppError::BadRequest("Invalid email address".to_string()))
    }
}

const EMAIL_TAKEN: &str = "User with this email already exists";

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub async fn register(
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let email = normalize_email(&req.email);
    if email.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }
    validate_email(&email)?;

    if db::users::exists_by_email(&state.pool, &email).await? {
        return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
    }

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    // A concurrent registration can still win the race; the unique index decides.
    let user = db::users::create(&state.pool, &email, &pw_hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict(EMAIL_TAKEN.to_string())
            } else {
                AppError::Database(e)
            }
        })?;

    let token = jwt::issue(user.id, &state.config.jwt_secret).map_err(AppError::Internal)?;

    tracing::info!("User {} registered", user.id);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            token,
            user: user.into(),
        }),
    ))
}

pub async fn login(
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let email = normalize_email(&req.email);

    if state.login_limiter.check(&email).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let user = db::users::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let valid = password::verify(&req.password, &user.password_hash).map_err(AppError::Internal)?;

    if !valid {
        state.login_limiter.record_failure(&email);
        tracing::warn!("Failed login for user {}", user.id);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    state.login_limiter.clear(&email);

    let token = jwt::issue(user.id, &state.config.jwt_secret).map_err(AppError::Internal)?;
    Ok(Json(TokenResponse { token }))
}

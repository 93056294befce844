use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};

use crate::auth::password;
use crate::auth::reset_code::{self, CodeCheck, MAX_ATTEMPTS};
use crate::db;
use crate::email;
use crate::error::{AppError, JsonBody};
use crate::routes::auth::normalize_email;
use crate::state::SharedState;

const INVALID_CODE: &str = "Invalid or expired code";

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub code: String,
    #[serde(default, rename = "newPassword")]
    pub new_password: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Clients send the code either as `"123456"` or `123456`.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(u64),
    }

    Ok(match Code::deserialize(deserializer)? {
        Code::Text(s) => s,
        Code::Number(n) => n.to_string(),
    })
}

pub async fn forgot_password(
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let email = normalize_email(&req.email);
    if email.is_empty() {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }

    if db::users::find_by_email(&state.pool, &email).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    let code = reset_code::generate();
    let expires_at = reset_code::expiry_from(Utc::now());
    db::password_reset_codes::upsert(&state.pool, &email, &code, expires_at).await?;

    // The stored code stays valid if delivery fails; the caller simply asks again.
    email::send_reset_code(state.mailer.as_ref(), &email, &code)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to send reset code: {e}")))?;

    tracing::info!("Password reset code issued");

    Ok(Json(MessageResponse {
        message: "Reset code sent to email".to_string(),
    }))
}

pub async fn reset_password(
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let email = normalize_email(&req.email);
    if req.new_password.is_empty() {
        return Err(AppError::BadRequest("New password is required".to_string()));
    }

    let record =
        db::password_reset_codes::reserve_attempt(&state.pool, &email, MAX_ATTEMPTS).await?;

    match reset_code::check(record.as_ref(), req.code.trim(), Utc::now()) {
        CodeCheck::Valid => {}
        CodeCheck::Unusable => return Err(AppError::BadRequest(INVALID_CODE.to_string())),
        CodeCheck::Mismatch => {
            if let Some(burned) = record.filter(|r| r.attempts >= MAX_ATTEMPTS) {
                tracing::warn!("Reset code burned after {MAX_ATTEMPTS} failed attempts");
                // A code issued since the reservation stays untouched
                db::password_reset_codes::consume(&state.pool, &email, &burned.code).await?;
            }
            return Err(AppError::BadRequest(INVALID_CODE.to_string()));
        }
    }

    // Consume before writing so concurrent requests with the same code get one winner.
    if !db::password_reset_codes::consume(&state.pool, &email, req.code.trim()).await? {
        return Err(AppError::BadRequest(INVALID_CODE.to_string()));
    }

    let pw_hash = password::hash(&req.new_password).map_err(AppError::Internal)?;
    let updated = db::users::update_password_by_email(&state.pool, &email, &pw_hash).await?;

    if updated == 0 {
        // Account was deleted after the code was issued.
        return Err(AppError::BadRequest(INVALID_CODE.to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Password updated successfully".to_string(),
    }))
}

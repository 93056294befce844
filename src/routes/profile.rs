use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::auth::extractor::AuthUser;
use crate::auth::password;
use crate::db;
use crate::error::{is_unique_violation, AppError, JsonBody};
use crate::models::UserProfile;
use crate::routes::auth::{normalize_email, validate_email};
use crate::routes::password_reset::MessageResponse;
use crate::state::SharedState;

#[derive(Deserialize, Default)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "oldPassword")]
    pub old_password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Empty strings are treated the same as an omitted field.
fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Passwords are taken verbatim: only the empty string counts as omitted.
fn supplied_password(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = db::users::find_profile(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(profile))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let email = supplied(req.email).map(|e| normalize_email(&e));
    if let Some(ref email) = email {
        validate_email(email)?;
    }

    let new_hash = match supplied_password(req.password) {
        Some(new_password) => {
            let old_password = supplied_password(req.old_password).ok_or_else(|| {
                AppError::BadRequest("Old password is required to set a new one".to_string())
            })?;

            let user = db::users::find_by_id(&state.pool, auth.user_id)
                .await?
                .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

            let valid = password::verify(&old_password, &user.password_hash)
                .map_err(AppError::Internal)?;
            if !valid {
                return Err(AppError::BadRequest("Invalid old password".to_string()));
            }

            Some(password::hash(&new_password).map_err(AppError::Internal)?)
        }
        None => None,
    };

    let first_name = supplied(req.first_name);
    let last_name = supplied(req.last_name);

    let profile = db::users::update_profile(
        &state.pool,
        auth.user_id,
        email.as_deref(),
        new_hash.as_deref(),
        first_name.as_deref(),
        last_name.as_deref(),
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("User with this email already exists".to_string())
        } else {
            AppError::Database(e)
        }
    })?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if new_hash.is_some() {
        tracing::info!("User {} changed password", auth.user_id);
    }

    Ok(Json(profile))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<MessageResponse>, AppError> {
    if !db::users::delete(&state.pool, auth.user_id).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    tracing::info!("User {} deleted their account", auth.user_id);

    Ok(Json(MessageResponse {
        message: "Profile deleted".to_string(),
    }))
}

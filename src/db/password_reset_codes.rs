use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::PasswordResetCode;

/// Insert or replace the live code for `email`; a new code starts with zero attempts.
pub async fn upsert(
    pool: &PgPool,
    email: &str,
    code: &str,
    expires_at: DateTime<Utc>,
) -> Result<PasswordResetCode, sqlx::Error> {
    sqlx::query_as::<_, PasswordResetCode>(
        "INSERT INTO password_reset_codes (email, code, expires_at)
         VALUES ($1, $2, $3)
         ON CONFLICT (email) DO UPDATE
         SET code = EXCLUDED.code,
             expires_at = EXCLUDED.expires_at,
             attempts = 0,
             created_at = now()
         RETURNING *",
    )
    .bind(email)
    .bind(code)
    .bind(expires_at)
    .fetch_one(pool)
    .await
}

/// Count one guess against the live code for `email` and return the record.
/// `None` once the code is expired, burned, or absent; at most `max_attempts`
/// callers ever see the code.
pub async fn reserve_attempt(
    pool: &PgPool,
    email: &str,
    max_attempts: i32,
) -> Result<Option<PasswordResetCode>, sqlx::Error> {
    sqlx::query_as::<_, PasswordResetCode>(
        "UPDATE password_reset_codes SET attempts = attempts + 1
         WHERE email = $1 AND attempts < $2 AND expires_at > now()
         RETURNING *",
    )
    .bind(email)
    .bind(max_attempts)
    .fetch_optional(pool)
    .await
}

/// Delete the record if it still holds `code`. Only one caller can win.
pub async fn consume(pool: &PgPool, email: &str, code: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(String,)> = sqlx::query_as(
        "DELETE FROM password_reset_codes
         WHERE email = $1 AND code = $2 AND expires_at > now()
         RETURNING email",
    )
    .bind(email)
    .bind(code)
    .fetch_optional(pool)
    .await?;
    Ok(row.is_some())
}

pub async fn purge_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM password_reset_codes WHERE expires_at < now()")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

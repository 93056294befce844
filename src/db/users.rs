use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{User, UserProfile};

pub async fn create(pool: &PgPool, email: &str, password_hash: &str) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING *",
    )
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn exists_by_email(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    let row: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
        .bind(email)
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

pub async fn find_profile(pool: &PgPool, id: Uuid) -> Result<Option<UserProfile>, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>(
        "SELECT id, email, first_name, last_name FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Returns the number of rows touched (0 when no such account).
pub async fn update_password_by_email(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE email = $1")
        .bind(email)
        .bind(password_hash)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Partial update: `None` keeps the stored value.
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    email: Option<&str>,
    password_hash: Option<&str>,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Result<Option<UserProfile>, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>(
        "UPDATE users
         SET email = COALESCE($2, email),
             password_hash = COALESCE($3, password_hash),
             first_name = COALESCE($4, first_name),
             last_name = COALESCE($5, last_name)
         WHERE id = $1
         RETURNING id, email, first_name, last_name",
    )
    .bind(id)
    .bind(email)
    .bind(password_hash)
    .bind(first_name)
    .bind(last_name)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

//! Queries shared by `news` and `promotions`. The table name comes from
//! `CatalogKind`, never from user input.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{CatalogItem, CatalogKind, ItemDraft};

/// An empty upload list means "keep the stored images".
pub(crate) fn images_or_keep(draft: &ItemDraft) -> Option<Vec<String>> {
    if draft.images.is_empty() {
        None
    } else {
        Some(draft.images.clone())
    }
}

pub async fn list(pool: &PgPool, kind: CatalogKind) -> Result<Vec<CatalogItem>, sqlx::Error> {
    let sql = format!("SELECT * FROM {} ORDER BY created_at DESC", kind.as_str());
    sqlx::query_as::<_, CatalogItem>(&sql).fetch_all(pool).await
}

pub async fn find_by_id(
    pool: &PgPool,
    kind: CatalogKind,
    id: Uuid,
) -> Result<Option<CatalogItem>, sqlx::Error> {
    let sql = format!("SELECT * FROM {} WHERE id = $1", kind.as_str());
    sqlx::query_as::<_, CatalogItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    kind: CatalogKind,
    draft: &ItemDraft,
) -> Result<CatalogItem, sqlx::Error> {
    let sql = format!(
        "INSERT INTO {} (name, short_description, description, price, discount_price, images)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        kind.as_str()
    );
    sqlx::query_as::<_, CatalogItem>(&sql)
        .bind(draft.name.clone())
        .bind(draft.short_description.clone())
        .bind(draft.description.clone())
        .bind(draft.price)
        .bind(draft.discount_price)
        .bind(draft.images.clone())
        .fetch_one(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    kind: CatalogKind,
    id: Uuid,
    draft: &ItemDraft,
) -> Result<Option<CatalogItem>, sqlx::Error> {
    let sql = format!(
        "UPDATE {}
         SET name = COALESCE($2, name),
             short_description = COALESCE($3, short_description),
             description = COALESCE($4, description),
             price = COALESCE($5, price),
             discount_price = COALESCE($6, discount_price),
             images = COALESCE($7, images)
         WHERE id = $1 RETURNING *",
        kind.as_str()
    );
    sqlx::query_as::<_, CatalogItem>(&sql)
        .bind(id)
        .bind(draft.name.clone())
        .bind(draft.short_description.clone())
        .bind(draft.description.clone())
        .bind(draft.price)
        .bind(draft.discount_price)
        .bind(images_or_keep(draft))
        .fetch_optional(pool)
        .await
}

pub async fn delete(
    pool: &PgPool,
    kind: CatalogKind,
    id: Uuid,
) -> Result<Option<CatalogItem>, sqlx::Error> {
    let sql = format!("DELETE FROM {} WHERE id = $1 RETURNING *", kind.as_str());
    sqlx::query_as::<_, CatalogItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::db::catalog::images_or_keep;
use crate::models::{ItemDraft, ProductSet};

/// Optional flag filters for listing sets. Each supplied flag adds one `AND` condition.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SetFilter {
    pub popular: Option<bool>,
    pub ready: Option<bool>,
    pub wedding: Option<bool>,
}

impl SetFilter {
    pub fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        let flags = [
            ("popular", self.popular),
            ("ready", self.ready),
            ("wedding", self.wedding),
        ];

        let mut first = true;
        for (column, value) in flags {
            let Some(value) = value else { continue };
            qb.push(if first { " WHERE " } else { " AND " });
            qb.push(column).push(" = ").push_bind(value);
            first = false;
        }
    }
}

pub async fn list(pool: &PgPool, filter: SetFilter) -> Result<Vec<ProductSet>, sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM sets");
    filter.push_conditions(&mut qb);
    qb.push(" ORDER BY created_at DESC");
    qb.build_query_as::<ProductSet>().fetch_all(pool).await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ProductSet>, sqlx::Error> {
    sqlx::query_as::<_, ProductSet>("SELECT * FROM sets WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &PgPool, draft: &ItemDraft) -> Result<ProductSet, sqlx::Error> {
    sqlx::query_as::<_, ProductSet>(
        "INSERT INTO sets
            (name, short_description, description, price, discount_price,
             popular, ready, wedding, images)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
    )
    .bind(draft.name.clone())
    .bind(draft.short_description.clone())
    .bind(draft.description.clone())
    .bind(draft.price)
    .bind(draft.discount_price)
    .bind(draft.popular.unwrap_or(false))
    .bind(draft.ready.unwrap_or(false))
    .bind(draft.wedding.unwrap_or(false))
    .bind(draft.images.clone())
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    draft: &ItemDraft,
) -> Result<Option<ProductSet>, sqlx::Error> {
    sqlx::query_as::<_, ProductSet>(
        "UPDATE sets
         SET name = COALESCE($2, name),
             short_description = COALESCE($3, short_description),
             description = COALESCE($4, description),
             price = COALESCE($5, price),
             discount_price = COALESCE($6, discount_price),
             popular = COALESCE($7, popular),
             ready = COALESCE($8, ready),
             wedding = COALESCE($9, wedding),
             images = COALESCE($10, images)
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(draft.name.clone())
    .bind(draft.short_description.clone())
    .bind(draft.description.clone())
    .bind(draft.price)
    .bind(draft.discount_price)
    .bind(draft.popular)
    .bind(draft.ready)
    .bind(draft.wedding)
    .bind(images_or_keep(draft))
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Option<ProductSet>, sqlx::Error> {
    sqlx::query_as::<_, ProductSet>("DELETE FROM sets WHERE id = $1 RETURNING *")
        .bind(id)
        .fetch_optional(pool)
        .await
}

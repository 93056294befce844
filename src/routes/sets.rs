use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::catalog::storage;
use crate::db;
use crate::db::sets::SetFilter;
use crate::error::{AppError, PathParam};
use crate::models::{CatalogKind, ProductSet};
use crate::routes::catalog::accept_submission;
use crate::state::SharedState;

/// `?popular=true&ready=false`: any value other than `true` counts as false.
#[derive(Deserialize, Default)]
pub struct SetQuery {
    pub popular: Option<String>,
    pub ready: Option<String>,
    pub wedding: Option<String>,
}

impl From<SetQuery> for SetFilter {
    fn from(q: SetQuery) -> Self {
        let is_true = |v: Option<String>| v.map(|v| v == "true");
        SetFilter {
            popular: is_true(q.popular),
            ready: is_true(q.ready),
            wedding: is_true(q.wedding),
        }
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Set not found".to_string())
}

pub async fn list(
    State(state): State<SharedState>,
    Query(query): Query<SetQuery>,
) -> Result<Json<Vec<ProductSet>>, AppError> {
    let sets = db::sets::list(&state.pool, query.into()).await?;
    Ok(Json(sets))
}

pub async fn get(
    State(state): State<SharedState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<ProductSet>, AppError> {
    let set = db::sets::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(set))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<ProductSet>), AppError> {
    let draft = accept_submission(&state, CatalogKind::Sets, &headers, body, true).await?;

    let set = match db::sets::create(&state.pool, &draft).await {
        Ok(set) => set,
        Err(e) => {
            storage::discard(&state.config.upload_dir, &draft.images).await;
            return Err(e.into());
        }
    };

    tracing::info!("User {} created set {}", auth.user_id, set.id);
    Ok((StatusCode::CREATED, Json(set)))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    PathParam(id): PathParam<Uuid>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ProductSet>, AppError> {
    let draft = accept_submission(&state, CatalogKind::Sets, &headers, body, false).await?;

    let set = match db::sets::update(&state.pool, id, &draft).await {
        Ok(Some(set)) => set,
        Ok(None) => {
            storage::discard(&state.config.upload_dir, &draft.images).await;
            return Err(not_found());
        }
        Err(e) => {
            storage::discard(&state.config.upload_dir, &draft.images).await;
            return Err(e.into());
        }
    };

    tracing::info!("User {} updated set {}", auth.user_id, set.id);
    Ok(Json(set))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<ProductSet>, AppError> {
    let set = db::sets::delete(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!("User {} deleted set {}", auth.user_id, set.id);
    Ok(Json(set))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_values_map_to_flags() {
        let filter: SetFilter = SetQuery {
            popular: Some("true".to_string()),
            ready: Some("yes".to_string()),
            wedding: None,
        }
        .into();
        assert_eq!(filter.popular, Some(true));
        assert_eq!(filter.ready, Some(false));
        assert_eq!(filter.wedding, None);
    }
}

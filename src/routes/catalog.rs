//! Handlers shared by `/api/news` and `/api/promotions`. The resource is
//! chosen by the `CatalogKind` extension set on each router.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::{Extension, Json};
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::catalog::storage::{self, MAX_IMAGES};
use crate::catalog::{self, form};
use crate::db;
use crate::error::{AppError, PathParam};
use crate::models::{CatalogItem, CatalogKind, ItemDraft};
use crate::state::SharedState;

/// Parse and validate a create/update body, then persist its images.
/// The returned draft carries the public image paths.
pub(crate) async fn accept_submission(
    state: &SharedState,
    kind: CatalogKind,
    headers: &HeaderMap,
    body: Bytes,
    creating: bool,
) -> Result<ItemDraft, AppError> {
    let form = form::parse(headers, body).await.map_err(AppError::BadRequest)?;
    let mut draft = catalog::draft_from_form(&form).map_err(AppError::BadRequest)?;
    if creating {
        catalog::ensure_creatable(&draft).map_err(AppError::BadRequest)?;
    }

    let images: Vec<_> = form.images().collect();
    if images.len() > MAX_IMAGES {
        return Err(AppError::BadRequest(format!(
            "At most {MAX_IMAGES} images are allowed"
        )));
    }

    draft.images = storage::store_images(&state.config.upload_dir, kind, &images)
        .await
        .map_err(AppError::Internal)?;
    Ok(draft)
}

fn not_found(kind: CatalogKind) -> AppError {
    AppError::NotFound(format!("{} item not found", kind.as_str()))
}

pub async fn list(
    State(state): State<SharedState>,
    Extension(kind): Extension<CatalogKind>,
) -> Result<Json<Vec<CatalogItem>>, AppError> {
    let items = db::catalog::list(&state.pool, kind).await?;
    Ok(Json(items))
}

pub async fn get(
    State(state): State<SharedState>,
    Extension(kind): Extension<CatalogKind>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<CatalogItem>, AppError> {
    let item = db::catalog::find_by_id(&state.pool, kind, id)
        .await?
        .ok_or_else(|| not_found(kind))?;
    Ok(Json(item))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Extension(kind): Extension<CatalogKind>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<CatalogItem>), AppError> {
    let draft = accept_submission(&state, kind, &headers, body, true).await?;

    let item = match db::catalog::create(&state.pool, kind, &draft).await {
        Ok(item) => item,
        Err(e) => {
            storage::discard(&state.config.upload_dir, &draft.images).await;
            return Err(e.into());
        }
    };

    tracing::info!("User {} created {} {}", auth.user_id, kind.as_str(), item.id);
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Extension(kind): Extension<CatalogKind>,
    PathParam(id): PathParam<Uuid>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CatalogItem>, AppError> {
    let draft = accept_submission(&state, kind, &headers, body, false).await?;

    let item = match db::catalog::update(&state.pool, kind, id, &draft).await {
        Ok(Some(item)) => item,
        Ok(None) => {
            storage::discard(&state.config.upload_dir, &draft.images).await;
            return Err(not_found(kind));
        }
        Err(e) => {
            storage::discard(&state.config.upload_dir, &draft.images).await;
            return Err(e.into());
        }
    };

    tracing::info!("User {} updated {} {}", auth.user_id, kind.as_str(), item.id);
    Ok(Json(item))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Extension(kind): Extension<CatalogKind>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<CatalogItem>, AppError> {
    let item = db::catalog::delete(&state.pool, kind, id)
        .await?
        .ok_or_else(|| not_found(kind))?;

    tracing::info!("User {} deleted {} {}", auth.user_id, kind.as_str(), item.id);
    Ok(Json(item))
}

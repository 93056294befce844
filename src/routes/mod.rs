pub mod auth;
pub mod catalog;
pub mod password_reset;
pub mod profile;
pub mod sets;

use axum::routing::{get, post};
use axum::{Extension, Router};

use crate::models::CatalogKind;
use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/forgot-password", post(password_reset::forgot_password))
        .route("/api/reset-password", post(password_reset::reset_password))
        // Profile
        .route(
            "/api/profile",
            get(profile::get)
                .put(profile::update)
                .delete(profile::delete),
        )
        // Catalog
        .nest("/api/news", catalog_routes(CatalogKind::News))
        .nest("/api/promotions", catalog_routes(CatalogKind::Promotions))
        .route("/api/sets", get(sets::list).post(sets::create))
        .route(
            "/api/sets/{id}",
            get(sets::get).put(sets::update).delete(sets::delete),
        )
}

fn catalog_routes(kind: CatalogKind) -> Router<SharedState> {
    Router::new()
        .route("/", get(catalog::list).post(catalog::create))
        .route(
            "/{id}",
            get(catalog::get)
                .put(catalog::update)
                .delete(catalog::delete),
        )
        .layer(Extension(kind))
}

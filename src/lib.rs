pub mod config;
pub mod error;
pub mod state;
pub mod auth;
pub mod db;
pub mod models;
pub mod routes;
pub mod catalog;
pub mod email;
pub mod rate_limit;
pub mod worker;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::Router;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::email::{LogMailer, Mailer, SmtpMailer};
use crate::rate_limit::LoginRateLimiter;
use crate::state::{AppState, SharedState};

/// Build the router with the mailer chosen from config: SMTP when configured, log otherwise.
pub fn build_app(pool: PgPool, config: Config) -> (Router, SharedState) {
    let mailer: Arc<dyn Mailer> = match config.smtp.as_ref().map(SmtpMailer::new) {
        Some(Ok(mailer)) => {
            tracing::info!("SMTP configured");
            Arc::new(mailer)
        }
        Some(Err(e)) => {
            tracing::warn!("SMTP not available: {e}");
            Arc::new(LogMailer)
        }
        None => {
            tracing::warn!("SMTP not configured, reset codes will only be logged");
            Arc::new(LogMailer)
        }
    };

    build_app_with_mailer(pool, config, mailer)
}

pub fn build_app_with_mailer(
    pool: PgPool,
    config: Config,
    mailer: Arc<dyn Mailer>,
) -> (Router, SharedState) {
    let state: SharedState = Arc::new(AppState {
        pool,
        config,
        mailer,
        login_limiter: LoginRateLimiter::new(),
    });

    (router(state.clone()), state)
}

pub fn router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(
            state
                .config
                .cors_origins
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok())
                .collect::<Vec<_>>(),
        )
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ])
        .allow_credentials(true);

    Router::new()
        .merge(routes::api_routes())
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        .route("/", axum::routing::get(root))
        .route("/health", axum::routing::get(health))
        .layer(DefaultBodyLimit::max(state.config.max_body_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

async fn root() -> &'static str {
    "Server is running"
}

async fn health() -> &'static str {
    "ok"
}

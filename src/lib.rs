pub mod auth;
pub mod config;
pub mod db;
pub mod directory;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod rate_limit;
pub mod routes;
pub mod seed;
pub mod state;
pub mod upload;
pub mod validate;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::rate_limit::LoginRateLimiter;
use crate::state::{AppState, SharedState};
use crate::upload::storage::{PUBLIC_PREFIX, UploadDir};

pub fn build_app(pool: PgPool, config: Config) -> Router {
    let companies = directory::build_store(config.company_store, pool.clone());
    tracing::info!(store = companies.kind(), "Company directory ready");

    let state: SharedState = Arc::new(AppState {
        uploads: UploadDir::new(config.upload_dir.clone()),
        pool,
        companies,
        login_limiter: LoginRateLimiter::new(),
        config,
    });

    let security_headers = ServiceBuilder::new()
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
        ));

    Router::new()
        .merge(routes::api_routes(&state))
        .nest_service(PUBLIC_PREFIX, ServeDir::new(state.uploads.root()))
        .route("/", get(index))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(state.config.max_upload_bytes))
        .layer(security_headers)
        .layer(cors_layer(&state.config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(600));

    if origins.iter().any(|o| o == "*") {
        return base.allow_origin(AllowOrigin::any());
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(allowed).allow_credentials(true)
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": "Job Portal API is running",
        "status": "OK",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health() -> &'static str {
    "ok"
}

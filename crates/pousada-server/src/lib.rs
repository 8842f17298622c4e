#![forbid(unsafe_code)]

//! HTTP server for the room catalog.
//!
//! One shared [`AppState`] carries the SQLite handle, the TTL-bounded search
//! cache and the runtime config through every handler.

pub const CRATE_NAME: &str = "pousada-server";

mod auth;
mod cache;
mod config;
mod db;
mod http;

pub use auth::{
    bearer_token, hash_password, issue_token, verify_password, verify_token, AuthError,
    TokenClaims,
};
pub use cache::SearchCache;
pub use config::ServerConfig;
pub use db::Database;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub search_cache: Arc<Mutex<SearchCache>>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self {
            db: Database::new(config.db_path.clone()),
            search_cache: Arc::new(Mutex::new(SearchCache::new(
                config.cache_ttl,
                config.cache_max_entries,
            ))),
            config: Arc::new(config),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(http::healthz_handler))
        .route("/rooms", get(http::rooms::rooms_handler))
        .route("/api/auth/register", post(http::auth::register_handler))
        .route("/api/auth/login", post(http::auth::login_handler))
        .route("/api/auth/me", get(http::auth::me_handler))
        .route("/api/favorites/add", post(http::favorites::add_handler))
        .route(
            "/api/favorites/remove",
            post(http::favorites::remove_handler),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            http::cors_middleware,
        ))
        .with_state(state)
}

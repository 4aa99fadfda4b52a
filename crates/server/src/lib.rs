//! GameVault server library.
//!
//! Exposes the router and its building blocks so integration tests can drive
//! the full HTTP surface against an in-memory database.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Request bodies above this size are rejected before handlers run.
/// Multipart game creation carries an image, so this sits above the
/// per-file upload bound.
const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Build the application router.
#[must_use]
pub fn app(state: AppState) -> Router {
    let uploads_dir = state.config().upload_dir.clone();

    Router::new()
        .merge(routes::routes())
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

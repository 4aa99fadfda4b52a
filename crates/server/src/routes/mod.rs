//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (DB ping)
//! GET  /uploads/{file}          - Uploaded images (static)
//!
//! # Catalog
//! GET    /api/games             - List catalog
//! POST   /api/games             - Create game (admin, multipart)
//! PUT    /api/games/{id}        - Update game (admin)
//! DELETE /api/games/{id}        - Delete game (admin, cascades)
//!
//! # Users
//! GET    /api/users             - List accounts (admin)
//! DELETE /api/users/{username}  - Delete account (admin)
//!
//! # Orders
//! POST /api/checkout            - Place an order
//! GET  /api/orders              - Order report (admin)
//!
//! # Auth
//! POST /api/login               - Login
//! POST /api/register            - Register
//!
//! # Uploads
//! POST /api/upload              - Store a single file
//! ```

pub mod auth;
pub mod checkout;
pub mod games;
pub mod health;
pub mod orders;
pub mod upload;
pub mod users;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the `/api` routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/games", get(games::list).post(games::create))
        .route("/games/{id}", put(games::update).delete(games::remove))
        .route("/users", get(users::list))
        .route("/users/{username}", delete(users::remove))
        .route("/checkout", post(checkout::checkout))
        .route("/orders", get(orders::report))
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/upload", post(upload::upload))
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
        .nest("/api", api_routes())
}

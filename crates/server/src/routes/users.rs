//! Account administration route handlers.

use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Value, json};

use crate::db::users::{UserListing, UserRepository};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// `GET /api/users` (admin)
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserListing>>, AppError> {
    let users = UserRepository::new(state.pool()).list().await?;
    Ok(Json(users))
}

/// `DELETE /api/users/{username}` (admin)
pub async fn remove(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Value>, AppError> {
    UserRepository::new(state.pool())
        .delete_by_username(&username)
        .await?;

    Ok(Json(json!({"success": true})))
}

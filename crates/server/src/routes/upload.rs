//! Standalone file upload route handler.

use axum::Json;
use axum::extract::{Multipart, State};
use serde_json::{Value, json};

use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/upload`
///
/// Accepts a single multipart file field and stores it under the upload
/// directory. The stored path is served back at `/uploads/...`.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
        .ok_or_else(|| AppError::Validation("no file provided".to_owned()))?;

    let filename = field.file_name().unwrap_or("upload").to_owned();
    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("failed to read file: {e}")))?;

    let stored = state.uploads().save(&filename, &data).await?;

    Ok(Json(json!({
        "success": true,
        "file": stored,
    })))
}

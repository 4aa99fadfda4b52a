//! Catalog route handlers.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use gamevault_core::GameId;

use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::Game;
use crate::services::catalog::{CatalogService, GameInput};
use crate::state::AppState;

/// Header carrying an optional client-chosen request id for duplicate
/// submission protection on game creation.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// `GET /api/games`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Game>>, AppError> {
    let games = CatalogService::new(state.pool()).list().await?;
    Ok(Json(games))
}

/// `POST /api/games` (admin, multipart)
///
/// Fields: title, description, price, genre, platform, optional image.
/// An `x-request-id` header claims a process-local slot before the body is
/// even parsed; a second request carrying the same id while this one runs is
/// rejected outright.
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Game>), AppError> {
    // The guard must cover the whole handler, parsing included.
    let _guard = match headers.get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()) {
        Some(request_id) => Some(
            state
                .inflight()
                .begin(request_id)
                .ok_or(AppError::DuplicateRequest)?,
        ),
        None => None,
    };

    let input = read_game_fields(&state, multipart).await?;

    let game = CatalogService::new(state.pool()).create(input).await?;

    Ok((StatusCode::CREATED, Json(game)))
}

/// `PUT /api/games/{id}` (admin)
#[derive(Debug, Deserialize)]
pub struct UpdateGameRequest {
    pub title: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
}

pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateGameRequest>,
) -> Result<Json<Game>, AppError> {
    let input = GameInput {
        title: body.title,
        price: body.price,
        description: body.description,
        ..GameInput::default()
    };

    let game = CatalogService::new(state.pool())
        .update(GameId::new(id), input)
        .await?;

    Ok(Json(game))
}

/// `DELETE /api/games/{id}` (admin)
pub async fn remove(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    CatalogService::new(state.pool())
        .delete(GameId::new(id))
        .await?;

    Ok(Json(json!({"success": true})))
}

/// Collect the multipart fields of a game-creation request.
///
/// The image, when present, is persisted immediately; its stored relative
/// path goes into the catalog row.
async fn read_game_fields(state: &AppState, mut multipart: Multipart) -> Result<GameInput, AppError> {
    let mut input = GameInput::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == "image" {
            let filename = field.file_name().unwrap_or("image").to_owned();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("failed to read image: {e}")))?;
            let stored = state.uploads().save(&filename, &data).await?;
            input.image_path = Some(stored.path);
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read field {name}: {e}")))?;

        match name.as_str() {
            "title" => input.title = Some(value),
            "description" => input.description = Some(value),
            "price" => input.price = Some(value),
            "genre" => input.genre = Some(value),
            "platform" => input.platform = Some(value),
            _ => {}
        }
    }

    Ok(input)
}

//! Checkout route handler.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::error::AppError;
use crate::services::checkout::{CheckoutRequest, CheckoutService};
use crate::state::AppState;

/// `POST /api/checkout`
pub async fn checkout(
    State(state): State<AppState>,
    Json(body): Json<CheckoutRequest>,
) -> Result<Json<Value>, AppError> {
    let order_id = CheckoutService::new(state.pool()).checkout(&body).await?;

    Ok(Json(json!({
        "success": true,
        "orderId": order_id.as_i64(),
    })))
}

//! Order report route handler.

use axum::Json;
use axum::extract::State;

use crate::db::OrderRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::OrderReportRow;
use crate::state::AppState;

/// `GET /api/orders` (admin)
///
/// Denormalized order/item/payment join, newest orders first. Orders whose
/// games were deleted still appear, carrying a placeholder title.
pub async fn report(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderReportRow>>, AppError> {
    let rows = OrderRepository::new(state.pool()).report().await?;
    Ok(Json(rows))
}

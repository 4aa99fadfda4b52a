//! Order models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use gamevault_core::{GameId, OrderId, PaymentMethod, UserId};

/// One validated cart line heading into checkout.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub game_id: GameId,
    pub quantity: i64,
    /// Unit price snapshotted at purchase time, decoupled from the current
    /// catalog price.
    pub unit_price: Decimal,
}

/// A fully validated checkout request ready for the atomic write.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Option<UserId>,
    pub total_amount: Decimal,
    pub method: PaymentMethod,
    pub lines: Vec<CartLine>,
}

/// One row of the denormalized order report (order x item x payment join).
///
/// `game_title` falls back to a placeholder when the item's game has since
/// been deleted; `quantity`/`unit_price` are absent when the items themselves
/// were removed by a catalog cascade delete.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReportRow {
    pub order_id: OrderId,
    pub created_at: DateTime<Utc>,
    pub username: Option<String>,
    pub total_amount: Decimal,
    pub order_status: String,
    pub game_title: String,
    pub quantity: Option<i64>,
    pub unit_price: Option<Decimal>,
    pub payment_status: Option<String>,
    pub payment_method: Option<String>,
}

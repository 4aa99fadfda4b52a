//! Catalog entry models.

use rust_decimal::Decimal;
use serde::Serialize;

use gamevault_core::GameId;

/// A purchasable catalog entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: GameId,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub genre: String,
    pub platform: String,
    /// Relative path of the uploaded cover image, if any.
    pub image_path: Option<String>,
}

/// Input for creating a catalog entry. All fields are required.
#[derive(Debug, Clone)]
pub struct NewGame {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub genre: String,
    pub platform: String,
    pub image_path: Option<String>,
}

//! Checkout workflow.
//!
//! Validates a cart, gates it on the catalog, and hands the atomic write to
//! the order repository. Deliberately NOT idempotent: retrying an identical
//! request creates a second order (no request-id deduplication on this path,
//! unlike admin game creation).

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::SqlitePool;
use thiserror::Error;

use gamevault_core::{GameId, OrderId, PaymentMethod, UserId};

use crate::db::{GameRepository, OrderRepository, RepositoryError};
use crate::models::{CartLine, NewOrder};

/// A checkout request as submitted by the client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub items: Vec<CheckoutItem>,
    pub total_amount: Option<Decimal>,
    pub payment_method_id: Option<i64>,
    pub user_id: Option<i64>,
}

/// One cart line as submitted by the client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    pub game_id: i64,
    pub quantity: i64,
    pub price: Decimal,
}

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Cart has no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// Total amount is absent.
    #[error("total amount is required")]
    MissingTotal,

    /// Payment method is absent.
    #[error("payment method is required")]
    MissingPaymentMethod,

    /// Payment method id is not part of the fixed enumeration.
    #[error("unknown payment method: {0}")]
    UnknownPaymentMethod(i64),

    /// A cart line has a non-positive quantity.
    #[error("quantity must be positive")]
    InvalidQuantity,

    /// A cart line has a negative unit price.
    #[error("price must not be negative")]
    NegativePrice,

    /// One or more game references do not exist in the catalog.
    #[error("unknown game id(s): {0:?}")]
    UnknownGames(Vec<i64>),

    /// The atomic write failed; everything was rolled back.
    #[error("checkout transaction failed: {0}")]
    Transaction(#[source] RepositoryError),
}

/// Checkout service.
pub struct CheckoutService<'a> {
    games: GameRepository<'a>,
    orders: OrderRepository<'a>,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            games: GameRepository::new(pool),
            orders: OrderRepository::new(pool),
        }
    }

    /// Run the checkout workflow.
    ///
    /// Validation and the catalog referential check happen before the
    /// mutating transaction opens; the read only gates entry. On success the
    /// order, its items, the inventory decrements and the payment record are
    /// all durable; on failure nothing is.
    ///
    /// # Errors
    ///
    /// See [`CheckoutError`] for the failure taxonomy.
    pub async fn checkout(&self, request: &CheckoutRequest) -> Result<OrderId, CheckoutError> {
        let order = validate(request)?;

        let mut wanted: Vec<GameId> = order.lines.iter().map(|l| l.game_id).collect();
        wanted.sort_unstable_by_key(GameId::as_i64);
        wanted.dedup();

        let existing = self
            .games
            .existing_ids(&wanted)
            .await
            .map_err(CheckoutError::Transaction)?;

        let missing: Vec<i64> = wanted
            .iter()
            .filter(|id| !existing.contains(id))
            .map(|id| id.as_i64())
            .collect();
        if !missing.is_empty() {
            return Err(CheckoutError::UnknownGames(missing));
        }

        self.orders
            .create_checkout(&order)
            .await
            .map_err(CheckoutError::Transaction)
    }
}

/// Validate a raw checkout request into a write-ready order.
fn validate(request: &CheckoutRequest) -> Result<NewOrder, CheckoutError> {
    if request.items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let total_amount = request.total_amount.ok_or(CheckoutError::MissingTotal)?;

    let method_id = request
        .payment_method_id
        .ok_or(CheckoutError::MissingPaymentMethod)?;
    let method =
        PaymentMethod::from_id(method_id).ok_or(CheckoutError::UnknownPaymentMethod(method_id))?;

    let mut lines = Vec::with_capacity(request.items.len());
    for item in &request.items {
        if item.quantity < 1 {
            return Err(CheckoutError::InvalidQuantity);
        }
        if item.price.is_sign_negative() {
            return Err(CheckoutError::NegativePrice);
        }
        lines.push(CartLine {
            game_id: GameId::new(item.game_id),
            quantity: item.quantity,
            unit_price: item.price,
        });
    }

    Ok(NewOrder {
        user_id: request.user_id.map(UserId::new),
        total_amount,
        method,
        lines,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(game_id: i64, quantity: i64, price: &str) -> CheckoutItem {
        CheckoutItem {
            game_id,
            quantity,
            price: price.parse().unwrap(),
        }
    }

    fn valid_request() -> CheckoutRequest {
        CheckoutRequest {
            items: vec![line(1, 2, "19.99"), line(2, 1, "59.99")],
            total_amount: Some("99.97".parse().unwrap()),
            payment_method_id: Some(1),
            user_id: None,
        }
    }

    #[test]
    fn test_validate_accepts_valid_cart() {
        let order = validate(&valid_request()).unwrap();
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.method, PaymentMethod::CreditCard);
        assert_eq!(order.total_amount.to_string(), "99.97");
    }

    #[test]
    fn test_validate_rejects_empty_cart() {
        let mut req = valid_request();
        req.items.clear();
        assert!(matches!(validate(&req), Err(CheckoutError::EmptyCart)));
    }

    #[test]
    fn test_validate_rejects_missing_total() {
        let mut req = valid_request();
        req.total_amount = None;
        assert!(matches!(validate(&req), Err(CheckoutError::MissingTotal)));
    }

    #[test]
    fn test_validate_rejects_missing_method() {
        let mut req = valid_request();
        req.payment_method_id = None;
        assert!(matches!(
            validate(&req),
            Err(CheckoutError::MissingPaymentMethod)
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_method() {
        let mut req = valid_request();
        req.payment_method_id = Some(9);
        assert!(matches!(
            validate(&req),
            Err(CheckoutError::UnknownPaymentMethod(9))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_quantity() {
        let mut req = valid_request();
        req.items[0].quantity = 0;
        assert!(matches!(validate(&req), Err(CheckoutError::InvalidQuantity)));
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let mut req = valid_request();
        req.items[0].price = "-1".parse().unwrap();
        assert!(matches!(validate(&req), Err(CheckoutError::NegativePrice)));
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let req: CheckoutRequest = serde_json::from_str(
            r#"{
                "items": [{"gameId": 3, "quantity": 1, "price": "10.00"}],
                "totalAmount": "10.00",
                "paymentMethodId": 2,
                "userId": 5
            }"#,
        )
        .unwrap();
        assert_eq!(req.items[0].game_id, 3);
        assert_eq!(req.payment_method_id, Some(2));
        assert_eq!(req.user_id, Some(5));
    }
}

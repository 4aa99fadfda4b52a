//! Order repository: the checkout transaction and the order report.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use gamevault_core::{OrderId, OrderStatus, PaymentStatus};

use super::{RepositoryError, parse_decimal};
use crate::models::{NewOrder, OrderReportRow};

#[derive(sqlx::FromRow)]
struct ReportRow {
    order_id: i64,
    created_at: DateTime<Utc>,
    username: Option<String>,
    total_amount: String,
    order_status: String,
    game_title: String,
    quantity: Option<i64>,
    unit_price: Option<String>,
    payment_status: Option<String>,
    payment_method: Option<String>,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Atomically persist an order, its line items, the inventory decrements
    /// and the payment record.
    ///
    /// Everything happens in one transaction: the order row (status pending),
    /// one item row per cart line, an explicit stock decrement per line, and
    /// the payment row (status paid; no external gateway is modeled). Any
    /// failure rolls the whole transaction back, so no partial order is ever
    /// visible to readers.
    ///
    /// Stock has no floor check; a purchase can drive it negative.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; nothing is
    /// persisted in that case.
    pub async fn create_checkout(&self, order: &NewOrder) -> Result<OrderId, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        let order_id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO orders (user_id, created_at, total_amount, status_id)
            VALUES (?, ?, ?, ?)
            RETURNING id
            ",
        )
        .bind(order.user_id.map(i64::from))
        .bind(now)
        .bind(order.total_amount.to_string())
        .bind(OrderStatus::Pending.id())
        .fetch_one(&mut *tx)
        .await?;

        for line in &order.lines {
            sqlx::query(
                r"
                INSERT INTO order_items (order_id, game_id, quantity, unit_price)
                VALUES (?, ?, ?, ?)
                ",
            )
            .bind(order_id)
            .bind(line.game_id.as_i64())
            .bind(line.quantity)
            .bind(line.unit_price.to_string())
            .execute(&mut *tx)
            .await?;

            // Inventory moves with the item rows, in the same transaction.
            sqlx::query(
                "UPDATE inventory SET stock_quantity = stock_quantity - ? WHERE game_id = ?",
            )
            .bind(line.quantity)
            .bind(line.game_id.as_i64())
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r"
            INSERT INTO payments (order_id, created_at, status_id, method_id)
            VALUES (?, ?, ?, ?)
            ",
        )
        .bind(order_id)
        .bind(now)
        .bind(PaymentStatus::Paid.id())
        .bind(order.method.id())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(OrderId::new(order_id))
    }

    /// Denormalized order report, newest orders first.
    ///
    /// Orders are LEFT JOINed to their items so an order survives in the
    /// report even after a catalog cascade delete removed its items; such
    /// rows carry the placeholder title.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored decimals are invalid.
    pub async fn report(&self) -> Result<Vec<OrderReportRow>, RepositoryError> {
        let rows = sqlx::query_as::<_, ReportRow>(
            r"
            SELECT o.id AS order_id,
                   o.created_at,
                   u.username,
                   o.total_amount,
                   os.name AS order_status,
                   COALESCE(g.title, 'Deleted game') AS game_title,
                   oi.quantity,
                   oi.unit_price,
                   ps.name AS payment_status,
                   pm.name AS payment_method
            FROM orders o
            JOIN order_statuses os ON os.id = o.status_id
            LEFT JOIN users u ON u.id = o.user_id
            LEFT JOIN order_items oi ON oi.order_id = o.id
            LEFT JOIN games g ON g.id = oi.game_id
            LEFT JOIN payments p ON p.order_id = o.id
            LEFT JOIN payment_statuses ps ON ps.id = p.status_id
            LEFT JOIN payment_methods pm ON pm.id = p.method_id
            ORDER BY o.created_at DESC, o.id DESC, oi.id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter()
            .map(|r| {
                Ok(OrderReportRow {
                    order_id: OrderId::new(r.order_id),
                    created_at: r.created_at,
                    username: r.username,
                    total_amount: parse_decimal(&r.total_amount, "orders.total_amount")?,
                    order_status: r.order_status,
                    game_title: r.game_title,
                    quantity: r.quantity,
                    unit_price: r
                        .unit_price
                        .as_deref()
                        .map(|p| parse_decimal(p, "order_items.unit_price"))
                        .transpose()?,
                    payment_status: r.payment_status,
                    payment_method: r.payment_method,
                })
            })
            .collect()
    }
}

//! Database operations for the GameVault `SQLite` store.
//!
//! ## Tables
//!
//! - `roles`, `users` - Accounts and the fixed role enumeration
//! - `games`, `inventory` - Catalog and per-game stock
//! - `orders`, `order_items`, `payments` - Checkout records
//! - `order_statuses`, `payment_statuses`, `payment_methods` - Lookup rows
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p gv-cli -- migrate
//! ```

pub mod games;
pub mod orders;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use games::GameRepository;
pub use orders::OrderRepository;
pub use users::UserRepository;

/// Embedded migrations for the server database.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email or title).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// Foreign key enforcement is switched on for every connection; the checkout
/// rollback guarantees rely on it.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection fails.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Parse a decimal column stored as TEXT.
///
/// `SQLite` has no decimal type, so monetary values are stored as strings and
/// parsed on read. A value that fails to parse is data corruption.
pub(crate) fn parse_decimal(
    raw: &str,
    column: &str,
) -> Result<rust_decimal::Decimal, RepositoryError> {
    rust_decimal::Decimal::from_str(raw).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid decimal in {column}: {e}"))
    })
}

/// Map a sqlx error to `Conflict` when it is a unique-constraint violation.
pub(crate) fn map_unique_violation(e: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(e)
}

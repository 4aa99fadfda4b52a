//! Database migration command.

use gamevault_server::db::MIGRATOR;

use super::{CliError, connect};

/// Run all pending migrations against the configured database.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    MIGRATOR.run(&pool).await?;
    tracing::info!("Migrations complete");

    Ok(())
}

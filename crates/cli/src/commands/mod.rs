//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::SqlitePool;
use thiserror::Error;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Repository error from the server crate.
    #[error("Repository error: {0}")]
    Repository(#[from] gamevault_server::db::RepositoryError),

    /// Account creation failure.
    #[error("Account error: {0}")]
    Auth(#[from] gamevault_server::services::AuthError),
}

/// Open a pool against the database named in the environment.
pub(crate) async fn connect() -> Result<SqlitePool, CliError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("GAMEVAULT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CliError::MissingEnvVar("GAMEVAULT_DATABASE_URL"))?;

    Ok(gamevault_server::db::create_pool(&SecretString::from(database_url)).await?)
}

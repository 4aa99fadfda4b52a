//! Admin account management commands.

use gamevault_server::services::AuthService;

use super::{CliError, connect};

/// Create a new admin account.
pub async fn create_admin(username: &str, email: &str, password: &str) -> Result<(), CliError> {
    let pool = connect().await?;

    tracing::info!("Creating admin account: {} ({})", username, email);

    let user = AuthService::new(&pool)
        .register(username, email, password, "admin")
        .await?;

    tracing::info!(
        "Admin account created successfully! ID: {}, Email: {}",
        user.id,
        user.email
    );

    Ok(())
}

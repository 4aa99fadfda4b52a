//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] gamevault_core::EmailError),

    /// Unknown role name.
    #[error("invalid role: {0}")]
    InvalidRole(String),

    /// Invalid credentials (wrong password or user not found).
    ///
    /// Deliberately covers both cases so responses never reveal which
    /// emails are registered.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The account exists but its role differs from the requested one.
    #[error("role mismatch")]
    RoleMismatch,

    /// An account with this email already exists.
    #[error("email already registered")]
    EmailTaken,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

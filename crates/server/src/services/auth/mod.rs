//! Authentication service.
//!
//! Registration and login over password credentials hashed with Argon2id.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::SqlitePool;

use gamevault_core::{Email, Role};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Authentication service.
///
/// Handles user registration and login.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new account.
    ///
    /// The password is hashed before storing; the role name maps onto the
    /// fixed role enumeration.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::InvalidRole` if the role name is unknown.
    /// Returns `AuthError::EmailTaken` if the email is already registered.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        let role: Role = role
            .parse()
            .map_err(|_| AuthError::InvalidRole(role.to_owned()))?;

        if self.users.email_exists(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(username, &email, &password_hash, role)
            .await
            .map_err(|e| match e {
                // Backstop for a concurrent register racing the pre-check.
                RepositoryError::Conflict(_) => AuthError::EmailTaken,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with email, password and a requested role.
    ///
    /// Absent account and wrong password both produce the same
    /// `InvalidCredentials` outcome; only a correct password followed by a
    /// role comparison can yield `RoleMismatch`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    /// Returns `AuthError::RoleMismatch` if the account's role differs.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        requested_role: &str,
    ) -> Result<User, AuthError> {
        // A malformed email can't belong to any account; fold it into the
        // uniform invalid-credentials outcome.
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;
        let requested: Role = requested_role
            .parse()
            .map_err(|_| AuthError::InvalidRole(requested_role.to_owned()))?;

        let (user, password_hash) = self
            .users
            .get_with_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        if user.role != requested {
            return Err(AuthError::RoleMismatch);
        }

        Ok(user)
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).is_ok());
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(matches!(
            verify_password("wrong password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_short_passwords_hash_fine() {
        // Length is not a registration rule; any non-empty password hashes.
        let hash = hash_password("seven77").unwrap();
        assert!(verify_password("seven77", &hash).is_ok());
    }
}

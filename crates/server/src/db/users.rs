//! User repository for account database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use gamevault_core::{Email, Role, UserId};

use super::{RepositoryError, map_unique_violation};
use crate::models::User;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    role_id: i64,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let role = Role::from_id(self.role_id).ok_or_else(|| {
            RepositoryError::DataCorruption(format!("unknown role id: {}", self.role_id))
        })?;

        Ok(User {
            id: UserId::new(self.id),
            username: self.username,
            email,
            role,
            created_at: self.created_at,
        })
    }
}

/// A user listing entry for the admin surface. Serializes with snake_case
/// keys (`role_name`), unlike the camelCase order surface.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct UserListing {
    pub username: String,
    pub email: String,
    pub role_name: String,
}

/// Repository for account database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new account. Email must be globally unique.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        username: &str,
        email: &Email,
        password_hash: &str,
        role: Role,
    ) -> Result<User, RepositoryError> {
        let now = Utc::now();

        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO users (username, email, password_hash, role_id, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            ",
        )
        .bind(username)
        .bind(email.as_str())
        .bind(password_hash)
        .bind(role.id())
        .bind(now)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "email already exists"))?;

        Ok(User {
            id: UserId::new(id),
            username: username.to_owned(),
            email: email.clone(),
            role,
            created_at: now,
        })
    }

    /// Get a user and their password hash by email.
    ///
    /// Returns `None` if no account has this email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct Row {
            id: i64,
            username: String,
            email: String,
            role_id: i64,
            created_at: DateTime<Utc>,
            password_hash: String,
        }

        let row = sqlx::query_as::<_, Row>(
            r"
            SELECT id, username, email, role_id, created_at, password_hash
            FROM users
            WHERE email = ?
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        let hash = r.password_hash.clone();
        let user = UserRow {
            id: r.id,
            username: r.username,
            email: r.email,
            role_id: r.role_id,
            created_at: r.created_at,
        }
        .into_user()?;

        Ok(Some((user, hash)))
    }

    /// Check whether an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn email_exists(&self, email: &Email) -> Result<bool, RepositoryError> {
        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE email = ?")
            .bind(email.as_str())
            .fetch_optional(self.pool)
            .await?;

        Ok(existing.is_some())
    }

    /// List all accounts with their role names, for the admin surface.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<UserListing>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserListing>(
            r"
            SELECT u.username, u.email, r.name AS role_name
            FROM users u
            JOIN roles r ON r.id = u.role_id
            ORDER BY u.id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Delete accounts by username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no account has this username.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_by_username(&self, username: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE username = ?")
            .bind(username)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Count accounts registered with an email. Test and tooling helper.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_email(&self, email: &Email) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email.as_str())
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}

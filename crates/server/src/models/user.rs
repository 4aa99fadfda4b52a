//! Account models.

use chrono::{DateTime, Utc};

use gamevault_core::{Email, Role, UserId};

/// A registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Email,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

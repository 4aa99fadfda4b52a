//! User roles.

use serde::{Deserialize, Serialize};

/// Account role, a small fixed enumeration.
///
/// Role names map to fixed identifiers in the `roles` lookup table; the
/// mapping here must match the rows seeded by the migrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular shopper.
    Customer,
    /// Catalog and user management access.
    Admin,
}

impl Role {
    /// Fixed identifier in the `roles` lookup table.
    #[must_use]
    pub const fn id(self) -> i64 {
        match self {
            Self::Customer => 1,
            Self::Admin => 2,
        }
    }

    /// Look up a role by its lookup-table identifier.
    #[must_use]
    pub const fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(Self::Customer),
            2 => Some(Self::Admin),
            _ => None,
        }
    }

    /// The role name as stored in the `roles` table.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_mapping_roundtrip() {
        for role in [Role::Customer, Role::Admin] {
            assert_eq!(Role::from_id(role.id()), Some(role));
        }
        assert_eq!(Role::from_id(99), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("customer".parse::<Role>().unwrap(), Role::Customer);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Role::Admin.to_string(), "admin");
    }
}

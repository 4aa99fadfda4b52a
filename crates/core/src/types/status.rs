//! Status and payment-method enums.
//!
//! Each enum mirrors a lookup table seeded by the migrations; the `id()` /
//! `from_id()` mappings must stay in sync with those rows.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Fixed identifier in the `order_statuses` lookup table.
    #[must_use]
    pub const fn id(self) -> i64 {
        match self {
            Self::Pending => 1,
            Self::Completed => 2,
            Self::Cancelled => 3,
        }
    }

    /// Look up a status by its lookup-table identifier.
    #[must_use]
    pub const fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(Self::Pending),
            2 => Some(Self::Completed),
            3 => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// The status name as stored in the lookup table.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Payment settlement status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    /// Fixed identifier in the `payment_statuses` lookup table.
    #[must_use]
    pub const fn id(self) -> i64 {
        match self {
            Self::Pending => 1,
            Self::Paid => 2,
            Self::Failed => 3,
        }
    }

    /// Look up a status by its lookup-table identifier.
    #[must_use]
    pub const fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(Self::Pending),
            2 => Some(Self::Paid),
            3 => Some(Self::Failed),
            _ => None,
        }
    }

    /// The status name as stored in the lookup table.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
        }
    }
}

/// Payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    BankTransfer,
}

impl PaymentMethod {
    /// Fixed identifier in the `payment_methods` lookup table.
    #[must_use]
    pub const fn id(self) -> i64 {
        match self {
            Self::CreditCard => 1,
            Self::BankTransfer => 2,
        }
    }

    /// Look up a method by its lookup-table identifier.
    #[must_use]
    pub const fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(Self::CreditCard),
            2 => Some(Self::BankTransfer),
            _ => None,
        }
    }

    /// The method name as stored in the lookup table.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreditCard => "credit_card",
            Self::BankTransfer => "bank_transfer",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TransactionId = Uuid;
pub type CustomerId = Uuid;

/// Name shown when a transaction has no customer attached.
pub const UNKNOWN_CUSTOMER: &str = "Unknown Customer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[serde(alias = "UNPAID")]
    Unpaid,
    #[serde(alias = "PARTIAL")]
    Partial,
    #[serde(alias = "OVERDUE")]
    Overdue,
    #[serde(alias = "PAID")]
    Paid,
    #[serde(alias = "COMPLETED")]
    Completed,
}

impl TransactionStatus {
    /// Settled transactions never produce due-date alerts.
    pub fn is_terminal(self) -> bool {
        matches!(self, TransactionStatus::Paid | TransactionStatus::Completed)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Unpaid => write!(f, "unpaid"),
            TransactionStatus::Partial => write!(f, "partial"),
            TransactionStatus::Overdue => write!(f, "overdue"),
            TransactionStatus::Paid => write!(f, "paid"),
            TransactionStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A credit transaction as exported by the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub customer_id: CustomerId,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    pub status: TransactionStatus,
}

impl Transaction {
    /// Has a due date and is not yet settled.
    pub fn is_open(&self) -> bool {
        self.due_date.is_some() && !self.status.is_terminal()
    }

    pub fn customer_label(&self) -> &str {
        self.customer_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(UNKNOWN_CUSTOMER)
    }
}

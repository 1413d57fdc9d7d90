//! Adapter contracts for the externally owned rule and transaction stores.
//!
//! The alert engine only reads rules, reads open transactions, and writes
//! back `lastRun` / `enabled`. The stored `lastRun` is the sole shared
//! state between independent evaluators, so implementations must make an
//! update visible to every other reader once `update_rule` returns.

mod file;
mod memory;

use async_trait::async_trait;

use ledger_core::Transaction;

use crate::error::Result;
use crate::schema::{NotificationRule, RuleId, RuleUpdate};

pub use file::{FileRuleStore, JsonTransactionSource};
pub use memory::{MemoryRuleStore, MemoryTransactionSource};

/// Read/update access to notification rules.
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// All rules, enabled or not.
    async fn list_rules(&self) -> Result<Vec<NotificationRule>>;

    /// Rules with `enabled = true`.
    async fn list_enabled_rules(&self) -> Result<Vec<NotificationRule>> {
        let rules = self.list_rules().await?;
        Ok(rules.into_iter().filter(|r| r.enabled).collect())
    }

    async fn get_rule(&self, id: RuleId) -> Result<NotificationRule>;

    /// Apply `update` and return the stored rule.
    async fn update_rule(&self, id: RuleId, update: RuleUpdate) -> Result<NotificationRule>;

    /// Human-readable name for logs (e.g. "file", "memory").
    fn store_name(&self) -> &str;
}

/// Query access to ledger transactions.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Transactions that have a due date and are not settled.
    async fn list_open_transactions_with_due_dates(&self) -> Result<Vec<Transaction>>;
}

//! In-process stores, used by tests and by hosts that keep rules in memory.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use ledger_core::Transaction;

use crate::error::{Result, RuleError};
use crate::schema::{NotificationRule, RuleId, RuleUpdate};

use super::{RuleStore, TransactionSource};

/// Rule store backed by a `Vec`, with switchable failure injection.
#[derive(Debug, Default)]
pub struct MemoryRuleStore {
    rules: RwLock<Vec<NotificationRule>>,
    fail_reads: AtomicBool,
    fail_updates: AtomicBool,
    updates: AtomicUsize,
}

impl MemoryRuleStore {
    pub fn new(rules: Vec<NotificationRule>) -> Self {
        Self {
            rules: RwLock::new(rules),
            ..Self::default()
        }
    }

    /// Make every read fail until reset.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every update fail until reset.
    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `update_rule` calls.
    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn insert(&self, rule: NotificationRule) -> Result<()> {
        let mut rules = self.rules.write().map_err(poisoned)?;
        rules.retain(|r| r.id != rule.id);
        rules.push(rule);
        Ok(())
    }

    fn check_reads(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(RuleError::Store("memory store: reads disabled".to_string()));
        }
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> RuleError {
    RuleError::Store("memory store lock poisoned".to_string())
}

#[async_trait]
impl RuleStore for MemoryRuleStore {
    async fn list_rules(&self) -> Result<Vec<NotificationRule>> {
        self.check_reads()?;
        let rules = self.rules.read().map_err(poisoned)?;
        Ok(rules.clone())
    }

    async fn get_rule(&self, id: RuleId) -> Result<NotificationRule> {
        self.check_reads()?;
        let rules = self.rules.read().map_err(poisoned)?;
        rules
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(RuleError::NotFound(id))
    }

    async fn update_rule(&self, id: RuleId, update: RuleUpdate) -> Result<NotificationRule> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(RuleError::Store("memory store: updates disabled".to_string()));
        }
        let mut rules = self.rules.write().map_err(poisoned)?;
        let rule = rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RuleError::NotFound(id))?;
        rule.apply_update(&update);
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(rule.clone())
    }

    fn store_name(&self) -> &str {
        "memory"
    }
}

/// Transaction source backed by a `Vec`.
#[derive(Debug, Default)]
pub struct MemoryTransactionSource {
    transactions: RwLock<Vec<Transaction>>,
    fail: AtomicBool,
    queries: AtomicUsize,
}

impl MemoryTransactionSource {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: RwLock::new(transactions),
            ..Self::default()
        }
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn replace(&self, transactions: Vec<Transaction>) -> Result<()> {
        *self.transactions.write().map_err(poisoned)? = transactions;
        Ok(())
    }

    /// Number of queries served (successful or not).
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransactionSource for MemoryTransactionSource {
    async fn list_open_transactions_with_due_dates(&self) -> Result<Vec<Transaction>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(RuleError::Store("memory transactions: unavailable".to_string()));
        }
        let transactions = self.transactions.read().map_err(poisoned)?;
        Ok(transactions.iter().filter(|t| t.is_open()).cloned().collect())
    }
}

//! File-backed stores for the standalone worker.
//!
//! Rules live in one YAML document (a list of rules). Every read goes to
//! disk so that a `lastRun` written by another process is observed on the
//! next tick. Updates are written to a temporary sibling file and renamed
//! over the existing file, which is atomic on the same filesystem.
//!
//! Entries that do not parse as a rule are skipped with a warning (once per
//! entry) and written back untouched on update.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde_yaml::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use ledger_core::Transaction;

use crate::error::{Result, RuleError};
use crate::schema::{NotificationRule, RuleId, RuleUpdate};

use super::{RuleStore, TransactionSource};

/// YAML rule file with atomic rewrite on update.
pub struct FileRuleStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
    /// Unparseable entries already warned about.
    skipped: std::sync::Mutex<HashSet<String>>,
}

impl FileRuleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            skipped: std::sync::Mutex::new(HashSet::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    /// Replace the whole rule file.
    pub async fn write_rules(&self, rules: &[NotificationRule]) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write_unlocked(rules).await
    }

    async fn read_rules(&self) -> Result<Vec<NotificationRule>> {
        let entries = self.read_entries().await?;
        Ok(entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| self.parse_entry(index, entry))
            .collect())
    }

    /// Raw list entries. Only a file that is not a YAML list is an error.
    async fn read_entries(&self) -> Result<Vec<Value>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "rule file missing, no rules loaded");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_yaml::from_str(&raw)?)
    }

    fn parse_entry(&self, index: usize, entry: &Value) -> Option<NotificationRule> {
        let label = entry
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{index}"));
        let mut skipped = self.skipped.lock().unwrap_or_else(|e| e.into_inner());

        match serde_yaml::from_value::<NotificationRule>(entry.clone()) {
            Ok(rule) => {
                skipped.remove(&label);
                Some(rule)
            }
            Err(e) => {
                if skipped.insert(label.clone()) {
                    warn!(
                        path = %self.path.display(),
                        entry = %label,
                        error = %e,
                        "Skipping unreadable rule entry"
                    );
                }
                None
            }
        }
    }

    async fn write_unlocked<T: Serialize + ?Sized>(&self, entries: &T) -> Result<()> {
        let yaml = serde_yaml::to_string(entries)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, yaml).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("rules.yaml");
        self.path
            .with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
    }
}

#[async_trait]
impl RuleStore for FileRuleStore {
    async fn list_rules(&self) -> Result<Vec<NotificationRule>> {
        self.read_rules().await
    }

    async fn get_rule(&self, id: RuleId) -> Result<NotificationRule> {
        self.read_rules()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(RuleError::NotFound(id))
    }

    async fn update_rule(&self, id: RuleId, update: RuleUpdate) -> Result<NotificationRule> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_entries().await?;
        let mut updated = None;
        for entry in entries.iter_mut() {
            let Ok(mut rule) = serde_yaml::from_value::<NotificationRule>(entry.clone()) else {
                continue;
            };
            if rule.id != id {
                continue;
            }
            rule.apply_update(&update);
            *entry = serde_yaml::to_value(&rule)?;
            updated = Some(rule);
            break;
        }
        let updated = updated.ok_or(RuleError::NotFound(id))?;

        self.write_unlocked(&entries).await?;
        info!(rule_id = %id, path = %self.path.display(), "rule updated");
        Ok(updated)
    }

    fn store_name(&self) -> &str {
        "file"
    }
}

/// Transactions exported by the ledger as a JSON array.
pub struct JsonTransactionSource {
    path: PathBuf,
}

impl JsonTransactionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TransactionSource for JsonTransactionSource {
    async fn list_open_transactions_with_due_dates(&self) -> Result<Vec<Transaction>> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let all: Vec<Transaction> = serde_json::from_str(&raw)?;
        Ok(all.into_iter().filter(|t| t.is_open()).collect())
    }
}

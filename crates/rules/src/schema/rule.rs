//! Root notification rule record and its update payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Schedule, SoundSettings};

pub type RuleId = Uuid;

/// Class of alert a rule targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    /// Only overdue alerts.
    Overdue,
    /// Only due-soon alerts.
    Reminder,
    /// Both alert classes.
    Followup,
}

impl std::fmt::Display for RuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleType::Overdue => write!(f, "overdue"),
            RuleType::Reminder => write!(f, "reminder"),
            RuleType::Followup => write!(f, "followup"),
        }
    }
}

/// Optional narrowing conditions. Unset fields do not filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Conditions {
    /// Day threshold: minimum days overdue for overdue alerts, maximum days
    /// until due for due-soon alerts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_overdue: Option<i64>,
    /// Minimum alert amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_threshold: Option<f64>,
}

/// Delivery intent flags. Only `notification` is acted on here; `email`
/// and `sms` are carried through to the dispatch payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Actions {
    #[serde(default = "default_true")]
    pub notification: bool,
    #[serde(default)]
    pub email: bool,
    #[serde(default)]
    pub sms: bool,
}

impl Default for Actions {
    fn default() -> Self {
        Self {
            notification: true,
            email: false,
            sms: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Title and body templates. Placeholders: `{customerName}`, `{amount}`,
/// `{dueDate}`, `{daysOverdue}`, `{daysUntilDue}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageTemplate {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRule {
    pub id: RuleId,
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    #[serde(default)]
    pub conditions: Conditions,
    #[serde(default)]
    pub actions: Actions,
    pub schedule: Schedule,
    #[serde(default)]
    pub sound: SoundSettings,
    pub message: MessageTemplate,
    /// Most recent successful fire. The only de-duplication anchor.
    #[serde(default)]
    pub last_run: Option<DateTime<Utc>>,
}

impl NotificationRule {
    /// Apply a store update. `last_run` never moves backwards.
    pub fn apply_update(&mut self, update: &RuleUpdate) {
        if let Some(ts) = update.last_run {
            self.last_run = Some(match self.last_run {
                Some(existing) if existing > ts => existing,
                _ => ts,
            });
        }
        if let Some(enabled) = update.enabled {
            self.enabled = enabled;
        }
    }
}

/// Partial update accepted by a rule store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuleUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl RuleUpdate {
    pub fn last_run(at: DateTime<Utc>) -> Self {
        Self {
            last_run: Some(at),
            enabled: None,
        }
    }

    pub fn enabled(enabled: bool) -> Self {
        Self {
            last_run: None,
            enabled: Some(enabled),
        }
    }
}

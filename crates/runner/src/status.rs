//! Tick reports and the engine status snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// What one evaluation pass did.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TickReport {
    pub at: DateTime<Utc>,
    /// Enabled rules returned by the store.
    pub rules_checked: usize,
    /// Rules skipped because they fail validation.
    pub rules_malformed: usize,
    /// Rules the schedule gate let through.
    pub rules_eligible: usize,
    /// Eligible rules whose `lastRun` was written back.
    pub rules_fired: usize,
    pub alerts: usize,
    pub notifications_attempted: usize,
    pub notifications_delivered: usize,
    pub notifications_failed: usize,
    pub write_back_failures: usize,
    /// Set when the pass stopped early because a store was unavailable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aborted: Option<String>,
}

impl TickReport {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            at,
            rules_checked: 0,
            rules_malformed: 0,
            rules_eligible: 0,
            rules_fired: 0,
            alerts: 0,
            notifications_attempted: 0,
            notifications_delivered: 0,
            notifications_failed: 0,
            write_back_failures: 0,
            aborted: None,
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.is_some()
    }
}

/// Snapshot returned by [`AlertEngine::status`](crate::AlertEngine::status).
#[derive(Debug, Clone, Default, Serialize)]
pub struct EngineStatus {
    /// The timer loop is active.
    pub running: bool,
    pub ticks: u64,
    pub last_tick_at: Option<DateTime<Utc>>,
    pub last_report: Option<TickReport>,
}

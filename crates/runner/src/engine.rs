//! The scheduler loop.
//!
//! One pass (`run_once`) is:
//! 1. list enabled rules (failure aborts the pass)
//! 2. skip malformed rules, gate the rest
//! 3. if any rule is eligible, fetch and classify open transactions
//!    (failure aborts the pass with no write-back)
//! 4. per eligible rule: match, dispatch concurrently, then write
//!    `lastRun = now` once, even when nothing matched or every dispatch failed
//!
//! Passes are serialized within one engine so a manual trigger and the
//! timer cannot evaluate the same rule at the same time. Across processes
//! the stored `lastRun` is the only coordination.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use ledger_core::config::AlertConfig;
use ledger_notify::{DispatchResult, Dispatcher};
use ledger_rules::classifier::summarize;
use ledger_rules::store::{RuleStore, TransactionSource};
use ledger_rules::{
    validate_rule, AlertClassifier, DueDateAlert, NotificationRule, RuleId, RuleMatcher,
    RuleUpdate, ScheduleGate,
};

use crate::clock::Clock;
use crate::error::EngineError;
use crate::status::{EngineStatus, TickReport};

/// Tunables taken from [`AlertConfig`].
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub tick_interval: Duration,
    pub tolerance_minutes: u32,
    pub due_soon_horizon_days: Option<u32>,
    /// Offset in which calendar dates and times of day are evaluated.
    pub utc_offset: FixedOffset,
}

impl EngineSettings {
    pub fn from_config(config: &AlertConfig) -> Self {
        Self {
            tick_interval: config.tick_interval(),
            tolerance_minutes: config.tolerance_minutes,
            due_soon_horizon_days: config.due_soon_horizon_days,
            utc_offset: config.utc_offset(),
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(300),
            tolerance_minutes: ledger_rules::scheduler::DEFAULT_TOLERANCE_MINUTES,
            due_soon_horizon_days: Some(7),
            utc_offset: Utc.fix(),
        }
    }
}

pub struct AlertEngine {
    rules: Arc<dyn RuleStore>,
    transactions: Arc<dyn TransactionSource>,
    dispatcher: Arc<Dispatcher>,
    clock: Arc<dyn Clock>,
    settings: EngineSettings,
    gate: ScheduleGate,
    classifier: AlertClassifier,
    /// Serializes passes within this engine.
    pass_lock: tokio::sync::Mutex<()>,
    /// Malformed rules already logged; each is reported once until fixed.
    reported_malformed: Mutex<HashSet<RuleId>>,
    status: RwLock<EngineStatus>,
}

impl AlertEngine {
    pub fn new(
        rules: Arc<dyn RuleStore>,
        transactions: Arc<dyn TransactionSource>,
        dispatcher: Arc<Dispatcher>,
        clock: Arc<dyn Clock>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            gate: ScheduleGate::new(settings.tolerance_minutes),
            classifier: AlertClassifier::with_horizon(settings.due_soon_horizon_days),
            rules,
            transactions,
            dispatcher,
            clock,
            settings,
            pass_lock: tokio::sync::Mutex::new(()),
            reported_malformed: Mutex::new(HashSet::new()),
            status: RwLock::new(EngineStatus::default()),
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// One pass at the clock's current time.
    pub async fn tick(&self) -> TickReport {
        self.run_once(self.clock.now()).await
    }

    /// One pass at `now`. Used by the timer and by manual "check now" calls.
    /// Never fails; problems are logged and recorded in the report.
    pub async fn run_once(&self, now: DateTime<Utc>) -> TickReport {
        let _pass = self.pass_lock.lock().await;
        let start = std::time::Instant::now();
        let report = self.evaluate(now).await;

        if report.rules_eligible > 0 || report.is_aborted() {
            info!(
                eligible = report.rules_eligible,
                fired = report.rules_fired,
                alerts = report.alerts,
                delivered = report.notifications_delivered,
                failed = report.notifications_failed,
                duration_ms = start.elapsed().as_millis() as u64,
                "Alert tick complete"
            );
        } else {
            debug!(checked = report.rules_checked, "Alert tick: no rules eligible");
        }

        self.record(&report);
        report
    }

    async fn evaluate(&self, now: DateTime<Utc>) -> TickReport {
        let mut report = TickReport::new(now);
        let local_now = now.with_timezone(&self.settings.utc_offset);

        let rules = match self.rules.list_enabled_rules().await {
            Ok(rules) => rules,
            Err(e) => {
                warn!(store = self.rules.store_name(), error = %e, "Failed to list rules, skipping tick");
                report.aborted = Some(format!("list rules: {e}"));
                return report;
            }
        };
        report.rules_checked = rules.len();

        let mut eligible = Vec::new();
        for rule in rules {
            // The store should only return enabled rules; don't rely on it.
            if !rule.enabled {
                continue;
            }
            if !self.is_well_formed(&rule) {
                report.rules_malformed += 1;
                continue;
            }
            if self.gate.is_eligible(&rule.schedule, rule.last_run, &local_now) {
                eligible.push(rule);
            }
        }
        report.rules_eligible = eligible.len();

        if eligible.is_empty() {
            return report;
        }

        let transactions = match self.transactions.list_open_transactions_with_due_dates().await {
            Ok(t) => t,
            Err(e) => {
                warn!(error = %e, "Failed to load transactions, skipping evaluation");
                report.aborted = Some(format!("list transactions: {e}"));
                return report;
            }
        };

        let alerts = self.classifier.classify(&transactions, &local_now);
        let (overdue, due_soon) = summarize(&alerts);
        debug!(overdue, due_soon, "Classified open transactions");
        report.alerts = alerts.len();

        for rule in &eligible {
            self.fire(rule, &alerts, now, &mut report).await;
        }
        report
    }

    /// Dispatch `rule`'s matches, then write back `lastRun`.
    async fn fire(
        &self,
        rule: &NotificationRule,
        alerts: &[DueDateAlert],
        now: DateTime<Utc>,
        report: &mut TickReport,
    ) {
        let matched = RuleMatcher::matches(rule, alerts);
        if !matched.is_empty() {
            let outcome = self.dispatcher.dispatch_batch(rule, &matched).await;
            report.notifications_attempted += outcome.attempted;
            report.notifications_delivered += outcome.delivered;
            report.notifications_failed += outcome.failed;
        }

        match self.rules.update_rule(rule.id, RuleUpdate::last_run(now)).await {
            Ok(_) => {
                report.rules_fired += 1;
                info!(
                    rule_id = %rule.id,
                    rule = %rule.name,
                    matches = matched.len(),
                    "Rule fired"
                );
            }
            Err(e) => {
                // The rule stays eligible and will likely fire again next tick.
                report.write_back_failures += 1;
                warn!(rule_id = %rule.id, error = %e, "Failed to record lastRun");
            }
        }
    }

    fn is_well_formed(&self, rule: &NotificationRule) -> bool {
        let result = validate_rule(rule);
        let mut reported = self
            .reported_malformed
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        if result.valid {
            reported.remove(&rule.id);
            return true;
        }
        if reported.insert(rule.id) {
            warn!(
                rule_id = %rule.id,
                rule = %rule.name,
                errors = %result.error_summary(),
                "Skipping malformed rule"
            );
        }
        false
    }

    /// Tick on the configured interval until `shutdown` is notified.
    /// A late tick is delayed rather than bunched up with the next one.
    pub async fn run(&self, shutdown: Arc<Notify>) {
        let stop = shutdown.notified();
        tokio::pin!(stop);
        stop.as_mut().enable();

        let mut interval = tokio::time::interval(self.settings.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.set_running(true);
        info!(
            interval_secs = self.settings.tick_interval.as_secs(),
            tolerance_minutes = self.settings.tolerance_minutes,
            "Alert engine started"
        );

        loop {
            tokio::select! {
                _ = &mut stop => break,
                _ = interval.tick() => {
                    self.tick().await;
                }
            }
        }

        self.set_running(false);
        info!("Alert engine stopped");
    }

    /// Send a sample notification for one rule. Does not touch `lastRun`.
    pub async fn test_rule(&self, id: RuleId) -> Result<Vec<DispatchResult>, EngineError> {
        let rule = self.rules.get_rule(id).await?;
        let validation = validate_rule(&rule);
        if !validation.valid {
            return Err(EngineError::InvalidRule(id, validation.error_summary()));
        }
        Ok(self.dispatcher.test_rule(&rule, self.clock.now()).await?)
    }

    /// Current alerts, as the next pass would classify them.
    pub async fn current_alerts(&self) -> Result<Vec<DueDateAlert>, EngineError> {
        let transactions = self.transactions.list_open_transactions_with_due_dates().await?;
        let now = self.clock.now().with_timezone(&self.settings.utc_offset);
        Ok(self.classifier.classify(&transactions, &now))
    }

    pub fn status(&self) -> EngineStatus {
        self.status.read().map(|s| s.clone()).unwrap_or_default()
    }

    fn record(&self, report: &TickReport) {
        if let Ok(mut status) = self.status.write() {
            status.ticks += 1;
            status.last_tick_at = Some(report.at);
            status.last_report = Some(report.clone());
        }
    }

    fn set_running(&self, running: bool) {
        if let Ok(mut status) = self.status.write() {
            status.running = running;
        }
    }
}

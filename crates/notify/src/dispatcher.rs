//! Delivers rendered notifications to the configured sinks.
//!
//! Every sink call is bounded by the dispatch timeout; a call that does not
//! finish in time counts as a failed delivery. Individual failures don't
//! block other sinks or other alerts.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use futures::future::join_all;
use uuid::Uuid;

use ledger_rules::schema::RuleType;
use ledger_rules::{DueDateAlert, NotificationRule};

use crate::templating::TemplateRenderer;
use crate::traits::{DispatchResult, DispatchSink, NotifyError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-rule summary of a batch dispatch.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Alerts handed to the sinks.
    pub attempted: usize,
    /// Alerts every sink accepted.
    pub delivered: usize,
    pub failed: usize,
    pub results: Vec<DispatchResult>,
}

/// Dispatches notifications to every configured sink.
pub struct Dispatcher {
    sinks: Vec<Box<dyn DispatchSink>>,
    timeout: Duration,
    renderer: TemplateRenderer,
}

impl Dispatcher {
    pub fn new(sinks: Vec<Box<dyn DispatchSink>>, timeout: Duration) -> Self {
        Self {
            sinks,
            timeout,
            renderer: TemplateRenderer::default(),
        }
    }

    /// Create a dispatcher with no sinks.
    pub fn empty() -> Self {
        Self::new(Vec::new(), DEFAULT_TIMEOUT)
    }

    pub fn with_renderer(mut self, renderer: TemplateRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn add_sink(&mut self, sink: Box<dyn DispatchSink>) {
        self.sinks.push(sink);
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn renderer(&self) -> &TemplateRenderer {
        &self.renderer
    }

    /// Render and deliver one alert to all sinks.
    ///
    /// Returns results for each sink delivery.
    pub async fn dispatch(&self, rule: &NotificationRule, alert: &DueDateAlert) -> Vec<DispatchResult> {
        if self.sinks.is_empty() {
            tracing::debug!(rule_id = %rule.id, "No dispatch sinks configured");
            return Vec::new();
        }

        let notification = self.renderer.build_notification(rule, alert);
        let timeout_ms = self.timeout.as_millis() as u64;
        let mut results = Vec::with_capacity(self.sinks.len());

        for sink in &self.sinks {
            let start = Instant::now();
            let result = tokio::time::timeout(self.timeout, sink.deliver(rule, alert, &notification))
                .await
                .unwrap_or_else(|_| {
                    Err(NotifyError::Timeout {
                        sink: sink.sink_name().to_string(),
                        ms: timeout_ms,
                    })
                });
            let duration_ms = start.elapsed().as_millis() as u64;

            let (success, error) = match result {
                Ok(()) => {
                    tracing::debug!(
                        rule_id = %rule.id,
                        transaction_id = %alert.transaction_id,
                        sink = sink.sink_name(),
                        duration_ms,
                        "Notification delivered"
                    );
                    (true, None)
                }
                Err(e) => {
                    tracing::warn!(
                        rule_id = %rule.id,
                        transaction_id = %alert.transaction_id,
                        sink = sink.sink_name(),
                        error = %e,
                        duration_ms,
                        "Notification delivery failed"
                    );
                    (false, Some(e.to_string()))
                }
            };

            results.push(DispatchResult {
                sink: sink.sink_name().to_string(),
                transaction_id: alert.transaction_id,
                success,
                error,
                duration_ms,
            });
        }

        results
    }

    /// Dispatch all of a rule's matched alerts concurrently and wait until
    /// every attempt has settled.
    pub async fn dispatch_batch(&self, rule: &NotificationRule, alerts: &[DueDateAlert]) -> BatchOutcome {
        let per_alert = join_all(alerts.iter().map(|alert| self.dispatch(rule, alert))).await;

        let mut outcome = BatchOutcome::default();
        for results in per_alert {
            outcome.attempted += 1;
            if !results.is_empty() && results.iter().all(|r| r.success) {
                outcome.delivered += 1;
            } else {
                outcome.failed += 1;
            }
            outcome.results.extend(results);
        }
        outcome
    }

    /// Send a sample notification for `rule` to every sink.
    pub async fn test_rule(
        &self,
        rule: &NotificationRule,
        now: DateTime<Utc>,
    ) -> Result<Vec<DispatchResult>, NotifyError> {
        if self.sinks.is_empty() {
            return Err(NotifyError::Config("no dispatch sinks configured".to_string()));
        }
        let alert = sample_alert(rule, now);
        Ok(self.dispatch(rule, &alert).await)
    }
}

/// A made-up alert of the kind `rule` targets, for test sends.
pub fn sample_alert(rule: &NotificationRule, now: DateTime<Utc>) -> DueDateAlert {
    let offset = match rule.rule_type {
        RuleType::Overdue => -3,
        RuleType::Reminder => 2,
        RuleType::Followup => -1,
    };
    DueDateAlert::from_offset(
        Uuid::nil(),
        "Sample Customer",
        1000.0,
        now + chrono::Duration::days(offset),
        offset,
    )
}

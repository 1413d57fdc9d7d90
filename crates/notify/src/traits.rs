//! Sink traits, the rendered notification payload, and shared error types.

use serde::Serialize;

use ledger_core::TransactionId;
use ledger_rules::schema::{Actions, RuleId, SoundKind};
use ledger_rules::{AlertType, DueDateAlert, NotificationRule, Priority};

/// Errors that can occur during notification delivery.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("sink '{sink}' timed out after {ms}ms")]
    Timeout { sink: String, ms: u64 },

    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Sound playback failed: {0}")]
    Sound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Audio hint handed to the sound capability.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundCue {
    pub kind: SoundKind,
    /// Clamped to 0-1.
    pub volume: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_url: Option<String>,
}

/// Channels the rule asked for. Only `notification` is delivered here;
/// `email` and `sms` travel with the payload for sinks that support them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeliveryIntent {
    pub notification: bool,
    pub email: bool,
    pub sms: bool,
}

impl From<&Actions> for DeliveryIntent {
    fn from(actions: &Actions) -> Self {
        Self {
            notification: actions.notification,
            email: actions.email,
            sms: actions.sms,
        }
    }
}

/// A rendered notification ready for delivery.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub rule_id: RuleId,
    pub rule_name: String,
    pub transaction_id: TransactionId,
    pub title: String,
    pub body: String,
    pub priority: Priority,
    pub alert_type: AlertType,
    /// Stay on screen until dismissed (overdue rules).
    pub sticky: bool,
    pub sound: Option<SoundCue>,
    pub intent: DeliveryIntent,
}

impl Notification {
    /// Stable key for de-duplicating toasts in a UI.
    pub fn tag(&self) -> String {
        format!("notification-{}-{}", self.rule_id, self.transaction_id)
    }
}

/// A delivery target for rendered notifications.
#[async_trait::async_trait]
pub trait DispatchSink: Send + Sync {
    /// Deliver one notification produced by `rule` for `alert`.
    async fn deliver(
        &self,
        rule: &NotificationRule,
        alert: &DueDateAlert,
        notification: &Notification,
    ) -> Result<(), NotifyError>;

    /// Human-readable name for this sink (e.g., "log", "ui").
    fn sink_name(&self) -> &str;
}

/// Fire-and-forget audio capability.
pub trait SoundPlayer: Send + Sync {
    fn play(&self, cue: &SoundCue) -> Result<(), NotifyError>;
}

/// Result of delivering one notification to a single sink.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchResult {
    pub sink: String,
    pub transaction_id: TransactionId,
    pub success: bool,
    pub error: Option<String>,
    pub duration_ms: u64,
}

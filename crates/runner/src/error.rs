use ledger_notify::NotifyError;
use ledger_rules::RuleError;

/// Errors surfaced by engine operations invoked on demand. Ticks never
/// return errors; they log and record them in the [`TickReport`](crate::TickReport).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("rule store: {0}")]
    Rules(#[from] RuleError),

    #[error("dispatch: {0}")]
    Notify(#[from] NotifyError),

    #[error("rule {0} is invalid: {1}")]
    InvalidRule(uuid::Uuid, String),
}

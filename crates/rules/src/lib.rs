//! Notification rules and the scheduled alert pipeline.
//!
//! This crate provides:
//! - Rule schema (camelCase YAML/JSON) with schedule and sound settings
//! - Alert classifier turning open transactions into due-date alerts
//! - Schedule gate deciding whether a rule may fire now
//! - Rule matcher selecting the alerts a rule applies to
//! - Rule validation with errors and warnings
//! - Store adapter traits plus file and in-memory implementations

pub mod alert;
pub mod classifier;
pub mod defaults;
pub mod error;
pub mod evaluator;
pub mod scheduler;
pub mod schema;
pub mod store;
pub mod validation;

pub use alert::{AlertType, DueDateAlert, Priority};
pub use classifier::{classify, AlertClassifier};
pub use error::{Result, RuleError};
pub use evaluator::RuleMatcher;
pub use scheduler::{GateDecision, ScheduleGate};
pub use schema::{NotificationRule, RuleId, RuleType, RuleUpdate};
pub use store::{RuleStore, TransactionSource};
pub use validation::{validate_rule, ValidationResult};

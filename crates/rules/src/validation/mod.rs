//! Rule validation with structured errors and warnings.
//!
//! Errors mark a rule as malformed: the scheduler treats it as permanently
//! ineligible until corrected. Warnings are advisory and never block
//! evaluation.

mod notification_checks;
mod schedule_checks;

use serde::{Deserialize, Serialize};

use crate::schema::NotificationRule;

pub use notification_checks::PLACEHOLDERS;

// ── Result types ────────────────────────────────────────────────────

/// Overall validation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// A single finding, located by a JSON-path-like field path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationIssue {
    /// e.g. `"schedule.time"`.
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationIssue {
            path: path.into(),
            message: message.into(),
        });
    }

    pub(crate) fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationIssue {
            path: path.into(),
            message: message.into(),
        });
    }

    /// Errors joined into one line, for logs.
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// ── Public API ──────────────────────────────────────────────────────

/// Validate a [`NotificationRule`].
pub fn validate_rule(rule: &NotificationRule) -> ValidationResult {
    let mut result = ValidationResult::new();
    notification_checks::validate_identity(rule, &mut result);
    schedule_checks::validate_schedule(rule, &mut result);
    notification_checks::validate_message(rule, &mut result);
    notification_checks::validate_sound(rule, &mut result);
    result
}

// ── Tests ───────────────────────────────────────────────────────────

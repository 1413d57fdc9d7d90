//! Error type shared by the rule schema, stores and validation.

use uuid::Uuid;

/// Errors that can occur while reading, updating or validating rules.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse/serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parse error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No rule with the given id.
    #[error("Notification rule not found: {0}")]
    NotFound(Uuid),

    /// Rule content is unusable (bad schedule time, empty title, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Backing store unavailable or rejected the request.
    #[error("Store error: {0}")]
    Store(String),
}

/// Result alias for rule operations.
pub type Result<T> = std::result::Result<T, RuleError>;

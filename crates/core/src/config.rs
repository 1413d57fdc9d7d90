use std::env;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{FixedOffset, Local, Offset};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub alerts: AlertConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `LEDGER_PROFILE` env var. When set (e.g. `SHOP2`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("LEDGER_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            alerts: AlertConfig::from_env_profiled(p),
            storage: StorageConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Reject configurations the alert engine cannot run correctly with.
    pub fn validate(&self) -> Result<()> {
        self.alerts.validate()
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  alerts:   tick={}s, tolerance={}m, dispatch_timeout={}ms, due_soon_days={}",
            self.alerts.tick_interval_secs,
            self.alerts.tolerance_minutes,
            self.alerts.dispatch_timeout_ms,
            self.alerts
                .due_soon_horizon_days
                .map(|d| d.to_string())
                .unwrap_or_else(|| "unbounded".to_string()),
        );
        tracing::info!("  timezone: {}", self.alerts.utc_offset());
        tracing::info!("  storage:  rules={}", self.storage.rules_file.display());
        tracing::info!("  storage:  transactions={}", self.storage.transactions_file.display());
    }

    /// Return a JSON view of the effective config.
    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "alerts": {
                "tick_interval_secs": self.alerts.tick_interval_secs,
                "tolerance_minutes": self.alerts.tolerance_minutes,
                "dispatch_timeout_ms": self.alerts.dispatch_timeout_ms,
                "due_soon_horizon_days": self.alerts.due_soon_horizon_days,
                "utc_offset": self.alerts.utc_offset().to_string(),
                "currency_symbol": self.alerts.currency_symbol,
            },
            "storage": {
                "data_dir": self.storage.data_dir,
                "rules_file": self.storage.rules_file,
                "transactions_file": self.storage.transactions_file,
            },
        })
    }
}

// ── Alert engine ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Seconds between scheduler ticks.
    pub tick_interval_secs: u64,
    /// Allowed distance (minutes) between the current time of day and a
    /// rule's scheduled time.
    pub tolerance_minutes: u32,
    /// Upper bound for a single dispatch call.
    pub dispatch_timeout_ms: u64,
    /// Due-soon alerts further out than this are dropped. `None` keeps all.
    pub due_soon_horizon_days: Option<u32>,
    /// Offset used for calendar dates and times of day. `None` = host local.
    pub utc_offset_minutes: Option<i32>,
    pub currency_symbol: String,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: 300,
            tolerance_minutes: 5,
            dispatch_timeout_ms: 10_000,
            due_soon_horizon_days: Some(7),
            utc_offset_minutes: None,
            currency_symbol: "₹".to_string(),
        }
    }
}

impl AlertConfig {
    fn from_env_profiled(p: &str) -> Self {
        let defaults = Self::default();
        let horizon = profiled_env_u32(p, "ALERT_DUE_SOON_DAYS", 7);
        Self {
            tick_interval_secs: profiled_env_u64(p, "ALERT_TICK_SECS", defaults.tick_interval_secs),
            tolerance_minutes: profiled_env_u32(p, "ALERT_TOLERANCE_MINUTES", defaults.tolerance_minutes),
            dispatch_timeout_ms: profiled_env_u64(
                p,
                "ALERT_DISPATCH_TIMEOUT_MS",
                defaults.dispatch_timeout_ms,
            ),
            due_soon_horizon_days: (horizon > 0).then_some(horizon),
            utc_offset_minutes: profiled_env_opt(p, "ALERT_UTC_OFFSET_MINUTES")
                .and_then(|v| v.parse().ok()),
            currency_symbol: profiled_env_or(p, "ALERT_CURRENCY", &defaults.currency_symbol),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs)
    }

    pub fn dispatch_timeout(&self) -> Duration {
        Duration::from_millis(self.dispatch_timeout_ms)
    }

    /// Offset for wall-clock evaluation, falling back to the host's current
    /// local offset when unset or out of range.
    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .and_then(offset_from_minutes)
            .unwrap_or_else(|| Local::now().offset().fix())
    }

    /// The tick period must not exceed the time-of-day tolerance window,
    /// otherwise a scheduled time can fall between two ticks and be skipped.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_secs == 0 {
            return Err(LedgerError::Config("tick interval must be positive".to_string()));
        }
        if self.dispatch_timeout_ms == 0 {
            return Err(LedgerError::Config("dispatch timeout must be positive".to_string()));
        }
        let window_secs = u64::from(self.tolerance_minutes) * 60;
        if self.tick_interval_secs > window_secs {
            return Err(LedgerError::Config(format!(
                "tick interval {}s exceeds the {}-minute schedule tolerance",
                self.tick_interval_secs, self.tolerance_minutes
            )));
        }
        if let Some(m) = self.utc_offset_minutes {
            if offset_from_minutes(m).is_none() {
                return Err(LedgerError::Config(format!("invalid UTC offset: {m} minutes")));
            }
        }
        Ok(())
    }
}

fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    minutes.checked_mul(60).and_then(FixedOffset::east_opt)
}

// ── Storage ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub rules_file: PathBuf,
    pub transactions_file: PathBuf,
}

impl StorageConfig {
    fn from_env_profiled(p: &str) -> Self {
        let data_dir = PathBuf::from(profiled_env_or(p, "DATA_DIR", "data"));
        let rules_file = profiled_env_opt(p, "RULES_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("rules.yaml"));
        let transactions_file = profiled_env_opt(p, "TRANSACTIONS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("transactions.json"));
        Self {
            data_dir,
            rules_file,
            transactions_file,
        }
    }
}

//! Rule schedule: how often and at what time of day a rule may fire.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RuleError};

/// Scheduling period of a rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Monthly => write!(f, "monthly"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub frequency: Frequency,
    /// Wall-clock time of day, `HH:MM` (24h).
    pub time: String,
    /// Weekdays 0-6 (Sunday = 0) for weekly rules, days of month 1-31 for
    /// monthly rules. Empty or absent means every day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<Vec<u32>>,
}

impl Schedule {
    pub fn daily(time: &str) -> Self {
        Self {
            frequency: Frequency::Daily,
            time: time.to_string(),
            days: None,
        }
    }

    /// Parse the `time` field.
    pub fn time_of_day(&self) -> Result<NaiveTime> {
        let raw = self.time.trim();
        NaiveTime::parse_from_str(raw, "%H:%M")
            .map_err(|e| RuleError::Validation(format!("invalid schedule time '{raw}': {e}")))
    }

    /// Scheduled time expressed as minutes since midnight.
    pub fn minute_of_day(&self) -> Result<u32> {
        let t = self.time_of_day()?;
        Ok(t.hour() * 60 + t.minute())
    }

    /// Day list, treating an empty list the same as an absent one.
    pub fn day_filter(&self) -> Option<&[u32]> {
        self.days.as_deref().filter(|d| !d.is_empty())
    }
}

//! Due-date alert records derived from open transactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ledger_core::TransactionId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    Overdue,
    DueSoon,
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertType::Overdue => write!(f, "overdue"),
            AlertType::DueSoon => write!(f, "due_soon"),
        }
    }
}

/// Alert urgency. Variant order gives `Urgent > High > Medium > Low`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Priority for an alert at `day_offset` days from today (negative = overdue).
    pub fn for_offset(day_offset: i64) -> Self {
        match day_offset {
            d if d < 0 => Priority::Urgent,
            0 => Priority::High,
            1..=3 => Priority::Medium,
            _ => Priority::Low,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
            Priority::Urgent => write!(f, "urgent"),
        }
    }
}

/// An outstanding transaction's urgency relative to its due date.
///
/// Recomputed on every pass and never persisted. Exactly one of
/// `days_overdue` / `days_until_due` is set, matching `alert_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueDateAlert {
    pub transaction_id: TransactionId,
    pub customer_name: String,
    pub amount: f64,
    pub due_date: DateTime<Utc>,
    pub alert_type: AlertType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_overdue: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_until_due: Option<u32>,
    pub priority: Priority,
}

impl DueDateAlert {
    /// Build an alert from a calendar-day offset (negative = overdue).
    pub fn from_offset(
        transaction_id: TransactionId,
        customer_name: impl Into<String>,
        amount: f64,
        due_date: DateTime<Utc>,
        day_offset: i64,
    ) -> Self {
        let days = u32::try_from(day_offset.unsigned_abs()).unwrap_or(u32::MAX);
        let (alert_type, days_overdue, days_until_due) = if day_offset < 0 {
            (AlertType::Overdue, Some(days), None)
        } else {
            (AlertType::DueSoon, None, Some(days))
        };
        Self {
            transaction_id,
            customer_name: customer_name.into(),
            amount,
            due_date,
            alert_type,
            days_overdue,
            days_until_due,
            priority: Priority::for_offset(day_offset),
        }
    }

    pub fn is_overdue(&self) -> bool {
        self.alert_type == AlertType::Overdue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn priority_total_order() {
        assert!(Priority::Urgent > Priority::High);
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn priority_bands() {
        assert_eq!(Priority::for_offset(-10), Priority::Urgent);
        assert_eq!(Priority::for_offset(-1), Priority::Urgent);
        assert_eq!(Priority::for_offset(0), Priority::High);
        assert_eq!(Priority::for_offset(1), Priority::Medium);
        assert_eq!(Priority::for_offset(3), Priority::Medium);
        assert_eq!(Priority::for_offset(4), Priority::Low);
        assert_eq!(Priority::for_offset(30), Priority::Low);
    }

    #[test]
    fn priority_is_monotonic_for_due_soon() {
        for days in 0..60 {
            assert!(Priority::for_offset(days) >= Priority::for_offset(days + 1));
        }
    }

    #[test]
    fn day_fields_follow_alert_type() {
        let due = Utc::now();
        let overdue = DueDateAlert::from_offset(Uuid::new_v4(), "A", 10.0, due, -4);
        assert_eq!(overdue.alert_type, AlertType::Overdue);
        assert_eq!(overdue.days_overdue, Some(4));
        assert!(overdue.days_until_due.is_none());

        let soon = DueDateAlert::from_offset(Uuid::new_v4(), "B", 10.0, due, 0);
        assert_eq!(soon.alert_type, AlertType::DueSoon);
        assert_eq!(soon.days_until_due, Some(0));
        assert!(soon.days_overdue.is_none());
    }

    #[test]
    fn serializes_for_inspection_output() {
        let alert = DueDateAlert::from_offset(Uuid::nil(), "A", 10.0, Utc::now(), 2);
        let value = serde_json::to_value(&alert).unwrap();
        assert_eq!(value["alertType"], "due_soon");
        assert_eq!(value["daysUntilDue"], 2);
        assert_eq!(value["priority"], "medium");
        assert!(value.get("daysOverdue").is_none());
    }
}

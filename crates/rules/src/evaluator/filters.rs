//! Individual alert filters applied by the rule matcher.

use crate::alert::{AlertType, DueDateAlert};
use crate::schema::{Conditions, RuleType};

/// Whether the rule type targets this alert class.
pub(super) fn type_matches(rule_type: RuleType, alert: &DueDateAlert) -> bool {
    match rule_type {
        RuleType::Overdue => alert.alert_type == AlertType::Overdue,
        RuleType::Reminder => alert.alert_type == AlertType::DueSoon,
        RuleType::Followup => true,
    }
}

/// "At least this urgent": overdue alerts need at least `threshold` days
/// overdue, due-soon alerts at most `threshold` days until due.
pub(super) fn threshold_matches(threshold: i64, alert: &DueDateAlert) -> bool {
    match alert.alert_type {
        AlertType::Overdue => alert
            .days_overdue
            .is_some_and(|days| i64::from(days) >= threshold),
        AlertType::DueSoon => alert
            .days_until_due
            .is_some_and(|days| i64::from(days) <= threshold),
    }
}

pub(super) fn balance_matches(threshold: f64, alert: &DueDateAlert) -> bool {
    alert.amount >= threshold
}

/// All set conditions must hold.
pub(super) fn conditions_match(conditions: &Conditions, alert: &DueDateAlert) -> bool {
    if let Some(days) = conditions.days_overdue {
        if !threshold_matches(days, alert) {
            return false;
        }
    }

    if let Some(balance) = conditions.balance_threshold {
        if !balance_matches(balance, alert) {
            return false;
        }
    }

    true
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn alert(offset: i64, amount: f64) -> DueDateAlert {
        DueDateAlert::from_offset(Uuid::new_v4(), "Test", amount, Utc::now(), offset)
    }

    #[test]
    fn type_filter() {
        let overdue = alert(-2, 1.0);
        let soon = alert(2, 1.0);

        assert!(type_matches(RuleType::Overdue, &overdue));
        assert!(!type_matches(RuleType::Overdue, &soon));
        assert!(type_matches(RuleType::Reminder, &soon));
        assert!(!type_matches(RuleType::Reminder, &overdue));
        assert!(type_matches(RuleType::Followup, &overdue));
        assert!(type_matches(RuleType::Followup, &soon));
    }

    #[test]
    fn overdue_threshold_is_a_minimum() {
        assert!(threshold_matches(3, &alert(-5, 1.0)));
        assert!(threshold_matches(3, &alert(-3, 1.0)));
        assert!(!threshold_matches(3, &alert(-2, 1.0)));
    }

    #[test]
    fn due_soon_threshold_is_a_maximum() {
        assert!(threshold_matches(3, &alert(0, 1.0)));
        assert!(threshold_matches(3, &alert(3, 1.0)));
        assert!(!threshold_matches(3, &alert(4, 1.0)));
        assert!(!threshold_matches(-3, &alert(0, 1.0)));
    }

    #[test]
    fn balance_is_inclusive() {
        assert!(balance_matches(1000.0, &alert(-1, 1000.0)));
        assert!(!balance_matches(1000.0, &alert(-1, 999.99)));
    }

    #[test]
    fn empty_conditions_pass() {
        assert!(conditions_match(&Conditions::default(), &alert(10, 0.0)));
    }
}

//! Rule matcher: selects the alerts a notification rule applies to.
//!
//! Filters are conjunctive:
//! - **Type**: `overdue` rules see overdue alerts, `reminder` rules see
//!   due-soon alerts, `followup` rules see both.
//! - **Day threshold** (`conditions.daysOverdue`): keep alerts at least as
//!   urgent as the threshold.
//! - **Balance** (`conditions.balanceThreshold`): keep alerts whose amount
//!   is at or above the threshold.
//!
//! An empty result means the rule was evaluated and had nothing to send.

mod filters;

use crate::alert::DueDateAlert;
use crate::schema::NotificationRule;

use filters::{conditions_match, type_matches};

/// Matches notification rules against the current alert set.
pub struct RuleMatcher;

impl RuleMatcher {
    /// Return the alerts `rule` applies to, preserving input order.
    pub fn matches(rule: &NotificationRule, alerts: &[DueDateAlert]) -> Vec<DueDateAlert> {
        alerts
            .iter()
            .filter(|a| type_matches(rule.rule_type, a))
            .filter(|a| conditions_match(&rule.conditions, a))
            .cloned()
            .collect()
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_rule(rule_type: RuleType, days: Option<i64>, balance: Option<f64>) -> NotificationRule {
        NotificationRule {
            id: Uuid::new_v4(),
            name: "test rule".to_string(),
            enabled: true,
            rule_type,
            conditions: Conditions {
                days_overdue: days,
                balance_threshold: balance,
            },
            actions: Actions::default(),
            schedule: Schedule::daily("09:00"),
            sound: SoundSettings::default(),
            message: MessageTemplate {
                title: "t".to_string(),
                body: "b".to_string(),
            },
            last_run: None,
        }
    }

    fn alert(offset: i64, amount: f64) -> DueDateAlert {
        DueDateAlert::from_offset(Uuid::new_v4(), "Test", amount, Utc::now(), offset)
    }

    fn sample_alerts() -> Vec<DueDateAlert> {
        vec![
            alert(-5, 3000.0),
            alert(-1, 8000.0),
            alert(0, 1200.0),
            alert(2, 500.0),
            alert(6, 9000.0),
        ]
    }

    #[test]
    fn no_conditions_match_every_alert_of_type() {
        let alerts = sample_alerts();
        assert_eq!(RuleMatcher::matches(&make_rule(RuleType::Overdue, None, None), &alerts).len(), 2);
        assert_eq!(RuleMatcher::matches(&make_rule(RuleType::Reminder, None, None), &alerts).len(), 3);
        assert_eq!(RuleMatcher::matches(&make_rule(RuleType::Followup, None, None), &alerts).len(), 5);
    }

    #[test]
    fn overdue_rule_with_day_threshold() {
        let rule = make_rule(RuleType::Overdue, Some(3), None);
        let matched = RuleMatcher::matches(&rule, &sample_alerts());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].days_overdue, Some(5));
    }

    #[test]
    fn reminder_rule_with_day_threshold() {
        let rule = make_rule(RuleType::Reminder, Some(0), None);
        let matched = RuleMatcher::matches(&rule, &sample_alerts());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].days_until_due, Some(0));
    }

    #[test]
    fn followup_applies_threshold_per_alert_type() {
        let rule = make_rule(RuleType::Followup, Some(2), None);
        let matched = RuleMatcher::matches(&rule, &sample_alerts());
        // overdue by 5 (>= 2), due today and in 2 days (<= 2)
        assert_eq!(matched.len(), 3);
    }

    #[test]
    fn conditions_are_conjunctive() {
        let rule = make_rule(RuleType::Overdue, Some(2), Some(1000.0));
        let alerts = vec![
            alert(-5, 3000.0), // both
            alert(-5, 500.0),  // days only
            alert(-1, 5000.0), // balance only
            alert(-1, 10.0),   // neither
        ];
        let matched = RuleMatcher::matches(&rule, &alerts);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].amount, 3000.0);
    }

    #[test]
    fn balance_threshold_can_empty_the_result() {
        let rule = make_rule(RuleType::Overdue, None, Some(5000.0));
        let matched = RuleMatcher::matches(&rule, &[alert(-2, 3000.0)]);
        assert!(matched.is_empty());
    }

    #[test]
    fn preserves_input_order() {
        let alerts = sample_alerts();
        let matched = RuleMatcher::matches(&make_rule(RuleType::Followup, None, None), &alerts);
        assert_eq!(matched, alerts);
    }
}

//! Starter rule set written by `alert-worker seed`.

use uuid::Uuid;

use crate::schema::{
    Actions, Conditions, Frequency, MessageTemplate, NotificationRule, RuleType, Schedule,
    SoundKind, SoundSettings,
};

/// The four default rules: overdue alert, due-today and due-soon reminders,
/// and a weekly summary. Each call generates fresh ids.
pub fn default_rules() -> Vec<NotificationRule> {
    vec![
        seed(
            "Payment Overdue Alert",
            RuleType::Overdue,
            Conditions {
                days_overdue: Some(1),
                balance_threshold: None,
            },
            Schedule::daily("09:00"),
            sound(SoundKind::Urgent, 0.8),
            "Payment Overdue: {customerName}",
            "{amount} was due on {dueDate} and is {daysOverdue} days overdue.",
        ),
        seed(
            "Payment Due Today Reminder",
            RuleType::Reminder,
            Conditions {
                days_overdue: Some(0),
                balance_threshold: None,
            },
            Schedule::daily("10:00"),
            sound(SoundKind::Urgent, 0.7),
            "Payment Due Today",
            "{customerName} owes {amount}, due today.",
        ),
        seed(
            "Payment Due Soon Reminder",
            RuleType::Reminder,
            Conditions {
                days_overdue: Some(3),
                balance_threshold: None,
            },
            Schedule::daily("11:00"),
            sound(SoundKind::Reminder, 0.6),
            "Payment Due Soon",
            "{customerName} owes {amount}, due in {daysUntilDue} days ({dueDate}).",
        ),
        seed(
            "Weekly Payment Summary",
            RuleType::Followup,
            Conditions {
                days_overdue: None,
                balance_threshold: Some(100.0),
            },
            Schedule {
                frequency: Frequency::Weekly,
                time: "09:00".to_string(),
                days: None,
            },
            sound(SoundKind::Notification, 0.5),
            "Weekly Payment Summary",
            "Outstanding: {customerName}, {amount} (due {dueDate}).",
        ),
    ]
}

fn sound(kind: SoundKind, volume: f64) -> SoundSettings {
    SoundSettings {
        enabled: true,
        kind,
        volume,
        custom_url: None,
    }
}

fn seed(
    name: &str,
    rule_type: RuleType,
    conditions: Conditions,
    schedule: Schedule,
    sound: SoundSettings,
    title: &str,
    body: &str,
) -> NotificationRule {
    NotificationRule {
        id: Uuid::new_v4(),
        name: name.to_string(),
        enabled: true,
        rule_type,
        conditions,
        actions: Actions::default(),
        schedule,
        sound,
        message: MessageTemplate {
            title: title.to_string(),
            body: body.to_string(),
        },
        last_run: None,
    }
}

//! Placeholder rendering for rule message templates.
//!
//! Recognised placeholders are `{customerName}`, `{amount}`, `{dueDate}`,
//! `{daysOverdue}` and `{daysUntilDue}`. Every occurrence is replaced.
//! Anything else in braces is left as written.

use chrono::{DateTime, FixedOffset, Offset, Utc};

use ledger_rules::schema::RuleType;
use ledger_rules::{DueDateAlert, NotificationRule};

use crate::sound::select_cue;
use crate::traits::{DeliveryIntent, Notification};

/// Renders titles and bodies for a rule/alert pair.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    currency_symbol: String,
    offset: FixedOffset,
}

impl TemplateRenderer {
    /// Dates are shown in UTC until [`with_offset`](Self::with_offset) is used.
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
            offset: utc(),
        }
    }

    /// Show due dates in the given offset.
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// Substitute every known placeholder in `template` with `alert`'s fields,
    /// in one left-to-right pass; substituted values are never rescanned.
    /// Day counts that do not apply to the alert's type render as `0`.
    pub fn render(&self, template: &str, alert: &DueDateAlert) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let candidate = &rest[start..];
            let resolved = candidate
                .find('}')
                .and_then(|end| Some((end, self.placeholder(&candidate[1..end], alert)?)));
            match resolved {
                Some((end, value)) => {
                    out.push_str(&value);
                    rest = &candidate[end + 1..];
                }
                None => {
                    out.push('{');
                    rest = &candidate[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }

    fn placeholder(&self, name: &str, alert: &DueDateAlert) -> Option<String> {
        let value = match name {
            "customerName" => alert.customer_name.clone(),
            "amount" => format_amount(alert.amount, &self.currency_symbol),
            "dueDate" => self.format_due_date(&alert.due_date),
            "daysOverdue" => alert.days_overdue.unwrap_or(0).to_string(),
            "daysUntilDue" => alert.days_until_due.unwrap_or(0).to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Render the full notification payload for `alert` under `rule`.
    pub fn build_notification(&self, rule: &NotificationRule, alert: &DueDateAlert) -> Notification {
        Notification {
            rule_id: rule.id,
            rule_name: rule.name.clone(),
            transaction_id: alert.transaction_id,
            title: self.render(&rule.message.title, alert),
            body: self.render(&rule.message.body, alert),
            priority: alert.priority,
            alert_type: alert.alert_type,
            sticky: rule.rule_type == RuleType::Overdue,
            sound: select_cue(&rule.sound, alert.priority),
            intent: DeliveryIntent::from(&rule.actions),
        }
    }

    /// `DD Mon YYYY` in the renderer's offset.
    pub fn format_due_date(&self, due: &DateTime<Utc>) -> String {
        due.with_timezone(&self.offset).format("%d %b %Y").to_string()
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new("₹")
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// Currency symbol, Indian digit grouping (`1,23,456.78`), two decimals.
pub fn format_amount(amount: f64, symbol: &str) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{symbol}{}.{frac:02}", group_indian(&whole))
}

/// Last three digits, then groups of two.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

//! Classifies open transactions into due-date alerts.
//!
//! Day offsets are computed on calendar dates in the timezone of the
//! supplied `now`, never by subtracting timestamps, so a transaction keeps
//! the same classification for every pass within one local day.

use chrono::{DateTime, NaiveDate, TimeZone};

use ledger_core::Transaction;

use crate::alert::{AlertType, DueDateAlert};

/// Classify every open transaction relative to `now`.
///
/// Pure: the same transactions and `now` always produce the same alerts in
/// the same order.
pub fn classify<Tz: TimeZone>(transactions: &[Transaction], now: &DateTime<Tz>) -> Vec<DueDateAlert> {
    AlertClassifier::default().classify(transactions, now)
}

/// Calendar-day distance from `today` to `due`. Negative when overdue.
pub fn day_offset(due: NaiveDate, today: NaiveDate) -> i64 {
    due.signed_duration_since(today).num_days()
}

/// Alert classifier with an optional look-ahead horizon for due-soon alerts.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertClassifier {
    horizon_days: Option<u32>,
}

impl AlertClassifier {
    /// Drop due-soon alerts more than `days` ahead. Overdue alerts are
    /// always kept.
    pub fn with_horizon(days: Option<u32>) -> Self {
        Self { horizon_days: days }
    }

    pub fn horizon_days(&self) -> Option<u32> {
        self.horizon_days
    }

    pub fn classify<Tz: TimeZone>(
        &self,
        transactions: &[Transaction],
        now: &DateTime<Tz>,
    ) -> Vec<DueDateAlert> {
        let tz = now.timezone();
        let today = now.date_naive();

        let mut alerts: Vec<DueDateAlert> = transactions
            .iter()
            .filter(|t| t.is_open())
            .filter_map(|t| {
                let due = t.due_date?;
                let offset = day_offset(due.with_timezone(&tz).date_naive(), today);
                if let Some(horizon) = self.horizon_days {
                    if offset > i64::from(horizon) {
                        return None;
                    }
                }
                Some(DueDateAlert::from_offset(
                    t.id,
                    t.customer_label(),
                    t.amount,
                    due,
                    offset,
                ))
            })
            .collect();

        // Most urgent first, then earliest due date.
        alerts.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(a.due_date.cmp(&b.due_date))
                .then(a.transaction_id.cmp(&b.transaction_id))
        });
        alerts
    }
}

/// Count alerts per type, for logging.
pub fn summarize(alerts: &[DueDateAlert]) -> (usize, usize) {
    let overdue = alerts
        .iter()
        .filter(|a| a.alert_type == AlertType::Overdue)
        .count();
    (overdue, alerts.len() - overdue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::Priority;
    use chrono::{Duration, FixedOffset, Utc};
    use ledger_core::TransactionStatus;
    use uuid::Uuid;

    fn tx(due: Option<DateTime<Utc>>, status: TransactionStatus, amount: f64) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            customer_name: Some("Meera Textiles".to_string()),
            amount,
            due_date: due,
            status,
        }
    }

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn due_yesterday_is_overdue_and_urgent() {
        let now = at("2026-10-17T09:02:00Z");
        let alerts = classify(
            &[tx(Some(at("2026-10-16T12:00:00Z")), TransactionStatus::Unpaid, 500.0)],
            &now,
        );

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::Overdue);
        assert_eq!(alerts[0].days_overdue, Some(1));
        assert_eq!(alerts[0].priority, Priority::Urgent);
    }

    #[test]
    fn due_in_two_days_is_medium() {
        let now = at("2026-10-17T09:02:00Z");
        let alerts = classify(
            &[tx(Some(at("2026-10-19T09:00:00Z")), TransactionStatus::Partial, 500.0)],
            &now,
        );

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::DueSoon);
        assert_eq!(alerts[0].days_until_due, Some(2));
        assert_eq!(alerts[0].priority, Priority::Medium);
    }

    #[test]
    fn due_today_is_high_regardless_of_hour() {
        let due = at("2026-10-17T00:00:00Z");
        for hour in [0, 1, 12, 23] {
            let now = at("2026-10-17T00:00:00Z") + Duration::hours(hour) + Duration::minutes(59);
            let alerts = classify(&[tx(Some(due), TransactionStatus::Unpaid, 1.0)], &now);
            assert_eq!(alerts[0].days_until_due, Some(0), "hour {hour}");
            assert_eq!(alerts[0].priority, Priority::High);
        }
    }

    #[test]
    fn midnight_boundary_uses_calendar_dates() {
        // Due 23:59 tomorrow, checked at 00:01 today: nearly two days of
        // wall time but one calendar day.
        let now = at("2026-10-17T00:01:00Z");
        let due = at("2026-10-18T23:59:00Z");
        let alerts = classify(&[tx(Some(due), TransactionStatus::Unpaid, 1.0)], &now);
        assert_eq!(alerts[0].days_until_due, Some(1));

        // Due one minute before midnight, checked one minute after: overdue by one day.
        let now = at("2026-10-18T00:01:00Z");
        let due = at("2026-10-17T23:59:00Z");
        let alerts = classify(&[tx(Some(due), TransactionStatus::Unpaid, 1.0)], &now);
        assert_eq!(alerts[0].days_overdue, Some(1));
    }

    #[test]
    fn dates_are_taken_in_the_timezone_of_now() {
        // 20:00 UTC on the 16th is already the 17th at +05:30.
        let ist = FixedOffset::east_opt(330 * 60).unwrap();
        let now = at("2026-10-17T04:00:00Z").with_timezone(&ist);
        let due = at("2026-10-16T20:00:00Z");
        let alerts = classify(&[tx(Some(due), TransactionStatus::Unpaid, 1.0)], &now);
        assert_eq!(alerts[0].alert_type, AlertType::DueSoon);
        assert_eq!(alerts[0].days_until_due, Some(0));
    }

    #[test]
    fn settled_and_undated_transactions_are_skipped() {
        let now = at("2026-10-17T09:00:00Z");
        let due = Some(at("2026-10-10T09:00:00Z"));
        let alerts = classify(
            &[
                tx(due, TransactionStatus::Paid, 1.0),
                tx(due, TransactionStatus::Completed, 1.0),
                tx(None, TransactionStatus::Unpaid, 1.0),
            ],
            &now,
        );
        assert!(alerts.is_empty());
    }

    #[test]
    fn classification_is_deterministic() {
        let now = at("2026-10-17T09:00:00Z");
        let txs: Vec<Transaction> = (-5..10)
            .map(|d| tx(Some(now + Duration::days(d)), TransactionStatus::Unpaid, 100.0))
            .collect();
        assert_eq!(classify(&txs, &now), classify(&txs, &now));
    }

    #[test]
    fn sorted_most_urgent_first() {
        let now = at("2026-10-17T09:00:00Z");
        let txs = vec![
            tx(Some(now + Duration::days(6)), TransactionStatus::Unpaid, 1.0),
            tx(Some(now - Duration::days(2)), TransactionStatus::Unpaid, 1.0),
            tx(Some(now), TransactionStatus::Unpaid, 1.0),
            tx(Some(now + Duration::days(2)), TransactionStatus::Unpaid, 1.0),
        ];
        let priorities: Vec<Priority> = classify(&txs, &now).iter().map(|a| a.priority).collect();
        assert_eq!(
            priorities,
            vec![Priority::Urgent, Priority::High, Priority::Medium, Priority::Low]
        );
    }

    #[test]
    fn horizon_drops_far_due_soon_only() {
        let now = at("2026-10-17T09:00:00Z");
        let txs = vec![
            tx(Some(now + Duration::days(7)), TransactionStatus::Unpaid, 1.0),
            tx(Some(now + Duration::days(8)), TransactionStatus::Unpaid, 1.0),
            tx(Some(now - Duration::days(90)), TransactionStatus::Unpaid, 1.0),
        ];
        let alerts = AlertClassifier::with_horizon(Some(7)).classify(&txs, &now);
        assert_eq!(alerts.len(), 2);
        assert_eq!(summarize(&alerts), (1, 1));

        let unbounded = AlertClassifier::default().classify(&txs, &now);
        assert_eq!(unbounded.len(), 3);
    }
}

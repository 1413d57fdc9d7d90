//! Schedule validation: time of day and day lists.

use super::ValidationResult;
use crate::schema::{Frequency, NotificationRule};

pub(super) fn validate_schedule(rule: &NotificationRule, result: &mut ValidationResult) {
    let sched = &rule.schedule;

    if let Err(e) = sched.time_of_day() {
        result.error("schedule.time", format!("{e}; expected HH:MM (24h)"));
    }

    let days = match sched.day_filter() {
        Some(d) => d,
        None => return,
    };

    match sched.frequency {
        Frequency::Daily => {
            result.warn("schedule.days", "days are ignored for daily rules");
        }
        Frequency::Weekly => {
            if let Some(bad) = days.iter().find(|d| **d > 6) {
                result.warn(
                    "schedule.days",
                    format!("weekday {bad} out of range 0-6 (Sunday = 0), it never matches"),
                );
            }
        }
        Frequency::Monthly => {
            for bad in days.iter().filter(|d| **d == 0 || **d > 31) {
                result.warn(
                    "schedule.days",
                    format!("day of month {bad} out of range 1-31, it never matches"),
                );
            }
        }
    }
}

//! Debounce, day-filter and time-window helpers.

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};

use crate::schema::{Frequency, Schedule};

/// Minimum spacing between fires of a weekly rule.
pub(crate) const WEEKLY_PERIOD_HOURS: i64 = 7 * 24;
/// Minimum spacing between fires of a monthly rule.
pub(crate) const MONTHLY_PERIOD_HOURS: i64 = 30 * 24;

/// Whether the frequency debounce lets a rule fire at `now`.
///
/// Daily rules fire once per calendar date in `now`'s timezone; weekly and
/// monthly rules need 7×24h / 30×24h since `last_run`. A rule that never
/// ran always passes.
pub fn debounce_allows<Tz: TimeZone>(
    frequency: Frequency,
    last_run: Option<DateTime<Utc>>,
    now: &DateTime<Tz>,
) -> bool {
    let last = match last_run {
        Some(l) => l,
        None => return true,
    };

    match frequency {
        Frequency::Daily => last.with_timezone(&now.timezone()).date_naive() != now.date_naive(),
        Frequency::Weekly => elapsed_since(last, now) >= Duration::hours(WEEKLY_PERIOD_HOURS),
        Frequency::Monthly => elapsed_since(last, now) >= Duration::hours(MONTHLY_PERIOD_HOURS),
    }
}

fn elapsed_since<Tz: TimeZone>(last: DateTime<Utc>, now: &DateTime<Tz>) -> Duration {
    now.with_timezone(&Utc).signed_duration_since(last)
}

/// Whether `now` falls on one of the schedule's listed days.
///
/// Weekly rules list weekdays (Sunday = 0), monthly rules list days of the
/// month. Daily rules and empty lists accept every day.
pub fn day_allowed<Tz: TimeZone>(schedule: &Schedule, now: &DateTime<Tz>) -> bool {
    let days = match schedule.day_filter() {
        Some(d) => d,
        None => return true,
    };

    match schedule.frequency {
        Frequency::Daily => true,
        Frequency::Weekly => days.contains(&now.weekday().num_days_from_sunday()),
        Frequency::Monthly => days.contains(&now.day()),
    }
}

/// Absolute distance in minutes between `now`'s time of day and the
/// scheduled minute of day. Does not wrap around midnight.
pub fn minutes_from_scheduled<Tz: TimeZone>(scheduled_minute: u32, now: &DateTime<Tz>) -> u32 {
    let current = now.hour() * 60 + now.minute();
    current.abs_diff(scheduled_minute)
}

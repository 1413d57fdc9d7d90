//! [`ScheduleGate`]: pure eligibility decision for a single rule.

use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;

use crate::schema::Schedule;

use super::window::{day_allowed, debounce_allows, minutes_from_scheduled};

/// Tolerance used when none is configured. Driver ticks are not aligned to
/// exact minutes, so the scheduled time is matched within this window.
pub const DEFAULT_TOLERANCE_MINUTES: u32 = 5;

/// Outcome of a gate check, with the first failing reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Eligible,
    /// Already fired within the current scheduling period.
    Debounced,
    /// `now` is not one of the schedule's listed days.
    DayExcluded,
    /// `now` is more than the tolerance away from the scheduled time.
    OutsideWindow { minutes_off: u32 },
    /// The schedule cannot be interpreted (e.g. bad `time`).
    Malformed(String),
}

impl GateDecision {
    pub fn is_eligible(&self) -> bool {
        matches!(self, GateDecision::Eligible)
    }
}

/// Decides whether a rule's schedule permits firing right now.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleGate {
    tolerance_minutes: u32,
}

impl ScheduleGate {
    pub fn new(tolerance_minutes: u32) -> Self {
        Self { tolerance_minutes }
    }

    pub fn tolerance_minutes(&self) -> u32 {
        self.tolerance_minutes
    }

    /// Run all checks. Debounce, day filter and time window are conjunctive.
    pub fn check<Tz: TimeZone>(
        &self,
        schedule: &Schedule,
        last_run: Option<DateTime<Utc>>,
        now: &DateTime<Tz>,
    ) -> GateDecision {
        // Parse first: a malformed schedule is ineligible whatever else holds.
        let scheduled_minute = match schedule.minute_of_day() {
            Ok(m) => m,
            Err(e) => return GateDecision::Malformed(e.to_string()),
        };

        if !debounce_allows(schedule.frequency, last_run, now) {
            return GateDecision::Debounced;
        }

        if !day_allowed(schedule, now) {
            return GateDecision::DayExcluded;
        }

        let minutes_off = minutes_from_scheduled(scheduled_minute, now);
        if minutes_off > self.tolerance_minutes {
            return GateDecision::OutsideWindow { minutes_off };
        }

        GateDecision::Eligible
    }

    pub fn is_eligible<Tz: TimeZone>(
        &self,
        schedule: &Schedule,
        last_run: Option<DateTime<Utc>>,
        now: &DateTime<Tz>,
    ) -> bool {
        let decision = self.check(schedule, last_run, now);
        if !decision.is_eligible() {
            debug!(
                frequency = %schedule.frequency,
                time = %schedule.time,
                ?decision,
                "schedule gate closed"
            );
        }
        decision.is_eligible()
    }
}

impl Default for ScheduleGate {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE_MINUTES)
    }
}

/// Gate check with the default five-minute tolerance.
pub fn is_eligible<Tz: TimeZone>(
    schedule: &Schedule,
    last_run: Option<DateTime<Utc>>,
    now: &DateTime<Tz>,
) -> bool {
    ScheduleGate::default().is_eligible(schedule, last_run, now)
}

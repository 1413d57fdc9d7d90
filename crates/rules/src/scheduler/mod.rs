//! Schedule gate: decides whether a rule may fire at a given instant.
//!
//! A rule is eligible only when all three checks pass:
//! - frequency debounce against the rule's `lastRun`
//! - weekday / day-of-month filter
//! - time-of-day window around the scheduled `HH:MM`
//!
//! The gate is pure and never touches `lastRun`; the scheduler loop writes
//! it back after a dispatch pass.

mod core;
pub(crate) mod window;


pub use self::core::{is_eligible, GateDecision, ScheduleGate, DEFAULT_TOLERANCE_MINUTES};
pub use self::window::{debounce_allows, day_allowed, minutes_from_scheduled};

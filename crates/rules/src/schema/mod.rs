//! Notification rule schema types with serde deserialization.
//!
//! Rules are owned by an external store; field names follow the store's
//! camelCase JSON/YAML representation:
//! - `NotificationRule`: the root record, including the `lastRun` anchor
//! - `Schedule`: frequency, time of day and optional day list
//! - `SoundSettings`: audio cue preferences
//! - `RuleUpdate`: the only mutation this crate performs on a rule

mod rule;
mod schedule;
mod sound;

pub use rule::*;
pub use schedule::*;
pub use sound::*;

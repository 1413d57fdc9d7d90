//! Notification dispatch for due-date alerts.
//!
//! This crate provides:
//! - `DispatchSink` trait for pluggable delivery targets (UI push, logs)
//! - `SoundPlayer` trait for the fire-and-forget audio cue
//! - Placeholder rendering for rule message templates
//! - Dispatcher that delivers a rule's matches with a bounded timeout

pub mod console;
pub mod dispatcher;
pub mod sound;
pub mod templating;
pub mod traits;

pub use console::{LogSink, LogSoundPlayer};
pub use dispatcher::{BatchOutcome, Dispatcher};
pub use templating::TemplateRenderer;
pub use traits::{DispatchResult, DispatchSink, Notification, NotifyError, SoundCue, SoundPlayer};

//! Scheduled alert engine.
//!
//! [`AlertEngine`] ties the pieces together: on every tick it gates the
//! enabled rules, classifies open transactions for the eligible ones,
//! dispatches each rule's matches and writes `lastRun` back to the store.

pub mod clock;
pub mod engine;
pub mod error;
pub mod status;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{AlertEngine, EngineSettings};
pub use error::EngineError;
pub use status::{EngineStatus, TickReport};

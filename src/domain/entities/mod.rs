//! Domain Entities - Core business objects
//!
//! Entities are objects with a distinct identity that persists over time.

pub mod history_event;

pub use history_event::{HistoryEvent, HistoryEventId};

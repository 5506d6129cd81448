//! Gateways - Repository implementations

pub mod history_event_store;

pub use history_event_store::{HistoryEventStore, SharedHistoryStore};

//! Domain Repository Interfaces
//!
//! These are trait definitions only - no implementations.
//! Implementations belong in the adapters/gateways layer.

pub mod history_repository;

pub use history_repository::{HistoryEventRepository, NullHistoryEventRepository};

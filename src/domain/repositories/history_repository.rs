//! HistoryEventRepository - interface for call-history persistence
//!
//! This trait defines how call-history events are stored and queried.
//! Records are keyed by call id; at most one record exists per call id.

use std::collections::HashMap;

use crate::domain::entities::HistoryEvent;
use crate::domain::errors::DomainError;

/// Repository interface for call-history events
pub trait HistoryEventRepository: Send + Sync {
    /// Read every persisted record, keyed by call id
    fn load(&self) -> Result<HashMap<String, HistoryEvent>, DomainError>;

    /// Replace the in-memory state with a fresh read of storage
    fn reload(&mut self) -> Result<(), DomainError>;

    /// Write the full in-memory state to storage
    fn sync(&mut self) -> Result<(), DomainError>;

    /// Insert or replace the record for `event.call_id`.
    /// Events without a call id are ignored.
    fn persist(&mut self, event: HistoryEvent) -> Result<(), DomainError>;

    /// Delete the event's media files and its record
    fn remove(&mut self, event: &HistoryEvent) -> Result<(), DomainError>;

    /// Remove the record for a call id, if any
    fn remove_by_call_id(&mut self, call_id: &str) -> Result<(), DomainError>;

    /// Look up the record for a call id
    fn find_by_call_id(&self, call_id: &str) -> Option<HistoryEvent>;

    /// Flag every record with the given event id as viewed
    fn mark_as_read(&mut self, event_id: &str) -> Result<(), DomainError>;

    /// Snapshot of all records, ordered by event id
    fn events(&self) -> Vec<HistoryEvent>;
}

/// A null implementation for testing
pub struct NullHistoryEventRepository;

impl HistoryEventRepository for NullHistoryEventRepository {
    fn load(&self) -> Result<HashMap<String, HistoryEvent>, DomainError> {
        Ok(HashMap::new())
    }

    fn reload(&mut self) -> Result<(), DomainError> {
        Ok(())
    }

    fn sync(&mut self) -> Result<(), DomainError> {
        Ok(())
    }

    fn persist(&mut self, _event: HistoryEvent) -> Result<(), DomainError> {
        Ok(())
    }

    fn remove(&mut self, _event: &HistoryEvent) -> Result<(), DomainError> {
        Ok(())
    }

    fn remove_by_call_id(&mut self, _call_id: &str) -> Result<(), DomainError> {
        Ok(())
    }

    fn find_by_call_id(&self, _call_id: &str) -> Option<HistoryEvent> {
        None
    }

    fn mark_as_read(&mut self, _event_id: &str) -> Result<(), DomainError> {
        Ok(())
    }

    fn events(&self) -> Vec<HistoryEvent> {
        Vec::new()
    }
}

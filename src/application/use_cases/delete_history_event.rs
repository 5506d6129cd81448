//! DeleteHistoryEventUseCase - User-initiated deletion of a call's history

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

use crate::domain::errors::DomainError;
use crate::domain::repositories::HistoryEventRepository;

/// Use case for deleting history events
pub struct DeleteHistoryEventUseCase<H>
where
    H: HistoryEventRepository,
{
    history_repository: Arc<Mutex<H>>,
}

impl<H> DeleteHistoryEventUseCase<H>
where
    H: HistoryEventRepository,
{
    /// Create a new delete use case
    pub fn new(history_repository: Arc<Mutex<H>>) -> Self {
        Self { history_repository }
    }

    /// Delete the event of a call together with its media.
    ///
    /// Returns `false` when there was nothing to delete.
    pub fn execute(&self, call_id: &str) -> Result<bool, DomainError> {
        let mut history = self.history_repository.lock();

        let Some(event) = history.find_by_call_id(call_id) else {
            return Ok(false);
        };

        history.remove(&event)?;

        info!(call_id = %call_id, event_id = %event.id, "Deleted call history");
        Ok(true)
    }
}

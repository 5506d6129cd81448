//! RecordCallUseCase - Store the history of a terminated call
//!
//! Called when a call ends, and again when its recording and thumbnail
//! become available.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::domain::entities::HistoryEvent;
use crate::domain::errors::DomainError;
use crate::domain::repositories::HistoryEventRepository;

/// Use case for recording call history
pub struct RecordCallUseCase<H>
where
    H: HistoryEventRepository,
{
    history_repository: Arc<Mutex<H>>,
}

impl<H> RecordCallUseCase<H>
where
    H: HistoryEventRepository,
{
    /// Create a new record call use case
    pub fn new(history_repository: Arc<Mutex<H>>) -> Self {
        Self { history_repository }
    }

    /// Persist the event of a terminated call.
    ///
    /// Returns `false` when the event has no call id and was not stored.
    pub fn execute(&self, event: HistoryEvent) -> Result<bool, DomainError> {
        if !event.has_call_id() {
            debug!(event_id = %event.id, "Ignoring history event without call id");
            return Ok(false);
        }

        let call_id = event.call_id.clone();
        self.history_repository.lock().persist(event)?;

        info!(call_id = %call_id, "Recorded call history");
        Ok(true)
    }

    /// Attach a recording and its thumbnail to an existing event.
    ///
    /// Returns `false` when no event exists for `call_id`.
    pub fn attach_media(
        &self,
        call_id: &str,
        media_file_name: &str,
        media_thumbnail_file_name: &str,
    ) -> Result<bool, DomainError> {
        let mut history = self.history_repository.lock();

        let Some(event) = history.find_by_call_id(call_id) else {
            return Ok(false);
        };

        history.persist(event.with_media(media_file_name, media_thumbnail_file_name))?;

        debug!(call_id = %call_id, media = %media_file_name, "Attached media to call history");
        Ok(true)
    }
}

//! Application Use Cases - Single-purpose business operations
//!
//! Each use case encapsulates a single business operation.

pub mod delete_history_event;
pub mod open_recording;
pub mod record_call;

pub use delete_history_event::DeleteHistoryEventUseCase;
pub use open_recording::{OpenRecordingError, OpenRecordingUseCase, PlaybackRequest, PlaybackSurface};
pub use record_call::RecordCallUseCase;

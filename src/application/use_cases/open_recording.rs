//! OpenRecordingUseCase - Prepare a recorded call for playback
//!
//! Opening a recording marks its history event as viewed and decides which
//! sound card and which kind of surface the player should use.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

use crate::domain::entities::HistoryEvent;
use crate::domain::errors::DomainError;
use crate::domain::repositories::HistoryEventRepository;
use crate::domain::value_objects::{select_playback_device, AudioDevice};

/// Aspect ratio of recorded intercom video
pub const VIDEO_ASPECT_RATIO: f32 = 4.0 / 3.0;

/// Error for opening a recording
#[derive(Debug)]
pub enum OpenRecordingError {
    /// No history event for the call id
    NotFound(String),
    /// Domain error
    Domain(DomainError),
}

impl std::fmt::Display for OpenRecordingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenRecordingError::NotFound(id) => write!(f, "No history event for call: {}", id),
            OpenRecordingError::Domain(e) => write!(f, "Domain error: {}", e),
        }
    }
}

impl std::error::Error for OpenRecordingError {}

impl From<DomainError> for OpenRecordingError {
    fn from(e: DomainError) -> Self {
        OpenRecordingError::Domain(e)
    }
}

/// Where the recording is rendered
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlaybackSurface {
    /// Video view with the given width / height ratio
    Video { aspect_ratio: f32 },
    /// Audio-only placeholder
    AudioOnly,
}

/// Everything the player needs to start playback
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackRequest {
    /// The event, already marked as viewed
    pub event: HistoryEvent,
    /// Sound card to play on; `None` lets the engine choose
    pub sound_card: Option<String>,
    /// Surface to render into
    pub surface: PlaybackSurface,
}

/// Use case for opening a recording
pub struct OpenRecordingUseCase<H>
where
    H: HistoryEventRepository,
{
    history_repository: Arc<Mutex<H>>,
}

impl<H> OpenRecordingUseCase<H>
where
    H: HistoryEventRepository,
{
    /// Create a new open recording use case
    pub fn new(history_repository: Arc<Mutex<H>>) -> Self {
        Self { history_repository }
    }

    /// Open the recording of a call
    pub fn execute(
        &self,
        call_id: &str,
        devices: &[AudioDevice],
    ) -> Result<PlaybackRequest, OpenRecordingError> {
        let event = {
            let mut history = self.history_repository.lock();

            let event = history
                .find_by_call_id(call_id)
                .ok_or_else(|| OpenRecordingError::NotFound(call_id.to_string()))?;

            history.mark_as_read(&event.id)?;
            history.find_by_call_id(call_id).unwrap_or(event)
        };

        let surface = if event.has_video {
            PlaybackSurface::Video {
                aspect_ratio: VIDEO_ASPECT_RATIO,
            }
        } else {
            PlaybackSurface::AudioOnly
        };
        let sound_card = select_playback_device(devices).map(|d| d.id.clone());

        info!(call_id = %call_id, sound_card = ?sound_card, "Opening recording");

        Ok(PlaybackRequest {
            event,
            sound_card,
            surface,
        })
    }
}

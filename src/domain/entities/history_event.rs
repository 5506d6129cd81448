//! HistoryEvent entity - one call's history metadata
//!
//! A history event is created when a call terminates and carries the
//! recorded media, the video flag and whether the user has viewed it.

/// Identifier of a history event (also its persisted section name)
pub type HistoryEventId = String;

/// A call-history record
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct HistoryEvent {
    /// Stable identifier, distinct from the call id
    pub id: HistoryEventId,
    /// Identifier of the originating call; empty means "no call id"
    pub call_id: String,
    /// Whether the user has opened this event
    pub viewed_by_user: bool,
    /// Path to the recorded media, empty if none
    pub media_file_name: String,
    /// Path to the thumbnail image, empty if none
    pub media_thumbnail_file_name: String,
    /// Whether the recording contains video
    pub has_video: bool,
}

impl HistoryEvent {
    /// Create an unviewed event without media
    pub fn new(id: impl Into<String>, call_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            call_id: call_id.into(),
            ..Self::default()
        }
    }

    /// Attach recorded media and its thumbnail
    pub fn with_media(
        mut self,
        media_file_name: impl Into<String>,
        media_thumbnail_file_name: impl Into<String>,
    ) -> Self {
        self.media_file_name = media_file_name.into();
        self.media_thumbnail_file_name = media_thumbnail_file_name.into();
        self
    }

    /// Set the video flag
    pub fn with_video(mut self, has_video: bool) -> Self {
        self.has_video = has_video;
        self
    }

    /// Set the viewed flag
    pub fn viewed(mut self, viewed_by_user: bool) -> Self {
        self.viewed_by_user = viewed_by_user;
        self
    }

    /// Whether the event can be keyed in the store
    pub fn has_call_id(&self) -> bool {
        !self.call_id.is_empty()
    }

    /// Whether a recording is attached
    pub fn has_media(&self) -> bool {
        !self.media_file_name.is_empty()
    }
}

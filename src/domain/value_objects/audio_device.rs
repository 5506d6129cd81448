//! AudioDevice value object - an output device reported by the telephony engine

/// Kind of audio device
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioDeviceKind {
    Speaker,
    Earpiece,
    Bluetooth,
    Headset,
    Other,
}

/// An audio device as reported by the engine
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioDevice {
    /// Engine-side identifier, used as the sound card name
    pub id: String,
    /// Device kind
    pub kind: AudioDeviceKind,
    /// Whether the device can play sound
    pub can_play: bool,
}

impl AudioDevice {
    /// Create a new device description
    pub fn new(id: impl Into<String>, kind: AudioDeviceKind, can_play: bool) -> Self {
        Self {
            id: id.into(),
            kind,
            can_play,
        }
    }
}

/// Pick the sound card for playing back a recording.
///
/// The last play-capable speaker wins; without one, the last play-capable
/// earpiece is used.
pub fn select_playback_device(devices: &[AudioDevice]) -> Option<&AudioDevice> {
    let mut speaker = None;
    let mut earpiece = None;

    for device in devices.iter().filter(|d| d.can_play) {
        match device.kind {
            AudioDeviceKind::Speaker => speaker = Some(device),
            AudioDeviceKind::Earpiece => earpiece = Some(device),
            _ => {}
        }
    }

    speaker.or(earpiece)
}

//! Domain Value Objects - Immutable values that describe characteristics
//!
//! Value objects have no identity and are compared by their values.

pub mod audio_device;

pub use audio_device::{select_playback_device, AudioDevice, AudioDeviceKind};

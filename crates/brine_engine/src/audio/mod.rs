//! Name-keyed audio playback over a pluggable backend
//!
//! The [`AudioPlayer`] owns registered clips and their volumes; actual sound
//! output goes through an [`AudioBackend`]. The default [`NullBackend`]
//! produces no sound and records what it was asked to do, which is also what
//! the tests assert against. A real backend built on `rodio` is available
//! behind the `rodio-backend` feature.

#[cfg(feature = "rodio-backend")]
mod rodio_backend;

#[cfg(feature = "rodio-backend")]
pub use rodio_backend::RodioBackend;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::debug;
use thiserror::Error;

use crate::foundation::collections::lock_or_recover;

/// Lowest accepted clip volume
pub const MIN_VOLUME: f32 = 0.0;
/// Highest accepted clip volume (2.0 doubles the clip's native loudness)
pub const MAX_VOLUME: f32 = 2.0;

/// Errors surfaced by audio operations
#[derive(Error, Debug)]
pub enum AudioError {
    /// A volume below [`MIN_VOLUME`] was requested
    #[error("volume {volume} is below the minimum of {min}")]
    VolumeTooLow {
        /// The rejected volume
        volume: f32,
        /// The bound it violated
        min: f32,
    },

    /// A volume above [`MAX_VOLUME`] was requested
    #[error("volume {volume} is above the maximum of {max}")]
    VolumeTooHigh {
        /// The rejected volume
        volume: f32,
        /// The bound it violated
        max: f32,
    },

    /// No clip is registered under the given name
    #[error("unknown audio clip: {0}")]
    UnknownClip(String),

    /// The backend failed to play or decode
    #[error("audio backend error: {0}")]
    Backend(String),
}

/// Sound output the [`AudioPlayer`] delegates to
pub trait AudioBackend: Send + Sync {
    /// Start playing a clip's encoded bytes at the given volume
    fn play(&self, name: &str, data: &[u8], volume: f32, looping: bool)
        -> Result<(), AudioError>;

    /// Stop a playing clip; unknown names are ignored
    fn stop(&self, name: &str);

    /// Adjust a playing clip's volume; unknown names are ignored
    fn set_volume(&self, name: &str, volume: f32);
}

struct Clip {
    data: Arc<[u8]>,
    volume: f32,
}

/// Registry of named clips with validated per-clip volumes
pub struct AudioPlayer {
    backend: Arc<dyn AudioBackend>,
    clips: Mutex<HashMap<String, Clip>>,
}

impl AudioPlayer {
    /// Create a player over a backend
    pub fn new(backend: Arc<dyn AudioBackend>) -> Self {
        Self {
            backend,
            clips: Mutex::new(HashMap::new()),
        }
    }

    /// Create a player that records playback requests without producing
    /// sound
    pub fn silent() -> Self {
        Self::new(Arc::new(NullBackend::new()))
    }

    /// Register a clip's encoded bytes under a name, starting at volume 1.0.
    ///
    /// Re-registering a name replaces the clip and resets its volume.
    pub fn register_clip(&self, name: impl Into<String>, data: Vec<u8>) {
        let name = name.into();
        debug!("registering audio clip `{name}` ({} bytes)", data.len());
        lock_or_recover(&self.clips).insert(
            name,
            Clip {
                data: data.into(),
                volume: 1.0,
            },
        );
    }

    /// Play a registered clip once
    pub fn play(&self, name: &str) -> Result<(), AudioError> {
        self.play_clip(name, false)
    }

    /// Play a registered clip in a loop until stopped
    pub fn play_looping(&self, name: &str) -> Result<(), AudioError> {
        self.play_clip(name, true)
    }

    fn play_clip(&self, name: &str, looping: bool) -> Result<(), AudioError> {
        let (data, volume) = {
            let clips = lock_or_recover(&self.clips);
            let clip = clips
                .get(name)
                .ok_or_else(|| AudioError::UnknownClip(name.to_string()))?;
            (Arc::clone(&clip.data), clip.volume)
        };
        self.backend.play(name, &data, volume, looping)
    }

    /// Stop a clip if it is playing
    pub fn stop(&self, name: &str) {
        self.backend.stop(name);
    }

    /// Set a clip's volume, applied immediately if the clip is playing.
    ///
    /// Volumes outside `MIN_VOLUME..=MAX_VOLUME` are rejected with an error
    /// naming the violated bound; NaN satisfies neither bound check, so it
    /// is rejected explicitly.
    pub fn set_clip_volume(&self, name: &str, volume: f32) -> Result<(), AudioError> {
        if volume.is_nan() || volume < MIN_VOLUME {
            return Err(AudioError::VolumeTooLow {
                volume,
                min: MIN_VOLUME,
            });
        }
        if volume > MAX_VOLUME {
            return Err(AudioError::VolumeTooHigh {
                volume,
                max: MAX_VOLUME,
            });
        }
        let mut clips = lock_or_recover(&self.clips);
        let clip = clips
            .get_mut(name)
            .ok_or_else(|| AudioError::UnknownClip(name.to_string()))?;
        clip.volume = volume;
        drop(clips);
        self.backend.set_volume(name, volume);
        Ok(())
    }

    /// A clip's current volume
    pub fn clip_volume(&self, name: &str) -> Result<f32, AudioError> {
        lock_or_recover(&self.clips)
            .get(name)
            .map(|clip| clip.volume)
            .ok_or_else(|| AudioError::UnknownClip(name.to_string()))
    }
}

/// One request recorded by the [`NullBackend`]
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// A play request with its volume and looping flag
    Play {
        /// Clip name
        name: String,
        /// Volume at play time
        volume: f32,
        /// Whether looping playback was requested
        looping: bool,
    },
    /// A stop request
    Stop(String),
    /// A live volume change
    SetVolume(String, f32),
}

/// Backend that records requests instead of producing sound
#[derive(Default)]
pub struct NullBackend {
    events: Mutex<Vec<PlaybackEvent>>,
}

impl NullBackend {
    /// Create an empty recording backend
    pub fn new() -> Self {
        Self::default()
    }

    /// The requests recorded so far
    pub fn events(&self) -> Vec<PlaybackEvent> {
        lock_or_recover(&self.events).clone()
    }
}

impl AudioBackend for NullBackend {
    fn play(
        &self,
        name: &str,
        _data: &[u8],
        volume: f32,
        looping: bool,
    ) -> Result<(), AudioError> {
        lock_or_recover(&self.events).push(PlaybackEvent::Play {
            name: name.to_string(),
            volume,
            looping,
        });
        Ok(())
    }

    fn stop(&self, name: &str) {
        lock_or_recover(&self.events).push(PlaybackEvent::Stop(name.to_string()));
    }

    fn set_volume(&self, name: &str, volume: f32) {
        lock_or_recover(&self.events).push(PlaybackEvent::SetVolume(name.to_string(), volume));
    }
}

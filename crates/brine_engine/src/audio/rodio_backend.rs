//! Sound output through `rodio`

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::foundation::collections::lock_or_recover;

use super::{AudioBackend, AudioError};

/// Backend playing clips through the default output device
pub struct RodioBackend {
    handle: OutputStreamHandle,
    sinks: Mutex<HashMap<String, Sink>>,
}

impl RodioBackend {
    /// Open the default output device
    pub fn new() -> Result<Self, AudioError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::Backend(e.to_string()))?;
        // The stream must outlive its handle; the backend lives for the
        // process, so the stream does too.
        std::mem::forget(stream);
        Ok(Self {
            handle,
            sinks: Mutex::new(HashMap::new()),
        })
    }
}

impl AudioBackend for RodioBackend {
    fn play(
        &self,
        name: &str,
        data: &[u8],
        volume: f32,
        looping: bool,
    ) -> Result<(), AudioError> {
        let source = Decoder::new(Cursor::new(data.to_vec()))
            .map_err(|e| AudioError::Backend(e.to_string()))?;
        let sink =
            Sink::try_new(&self.handle).map_err(|e| AudioError::Backend(e.to_string()))?;
        sink.set_volume(volume);
        if looping {
            sink.append(source.repeat_infinite());
        } else {
            sink.append(source);
        }
        // Replacing a sink drops the old one, which stops its playback.
        lock_or_recover(&self.sinks).insert(name.to_string(), sink);
        Ok(())
    }

    fn stop(&self, name: &str) {
        lock_or_recover(&self.sinks).remove(name);
    }

    fn set_volume(&self, name: &str, volume: f32) {
        if let Some(sink) = lock_or_recover(&self.sinks).get(name) {
            sink.set_volume(volume);
        }
    }
}

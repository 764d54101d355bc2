use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::AudioSettings;

use super::error::AudioError;
use super::resource::{AudioResource, ResourceEvent};
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, TaggedEvent};

/// How long `shutdown` waits for the audio thread, which may be inside a
/// blocking download.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

/// rodio-backed audio resource. Commands go to a dedicated audio thread;
/// events come back on a channel and are filtered by source generation so a
/// late event from a replaced source is never mistaken for the current one.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    events: Receiver<TaggedEvent>,
    generation: u64,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new(audio_settings: AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel::<TaggedEvent>();

        let audio_handle = spawn_audio_thread(rx, event_tx, audio_settings);

        Self {
            tx,
            events: event_rx,
            generation: 0,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    #[cfg(test)]
    pub(super) fn from_channels(tx: Sender<AudioCmd>, events: Receiver<TaggedEvent>) -> Self {
        Self {
            tx,
            events,
            generation: 0,
            join: Mutex::new(None),
        }
    }

    #[cfg(test)]
    pub(super) fn with_thread(
        tx: Sender<AudioCmd>,
        events: Receiver<TaggedEvent>,
        handle: JoinHandle<()>,
    ) -> Self {
        Self {
            tx,
            events,
            generation: 0,
            join: Mutex::new(Some(handle)),
        }
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), AudioError> {
        self.tx.send(cmd).map_err(|_| AudioError::Disconnected)
    }

    /// Stop playback and wait briefly for the audio thread to exit.
    pub fn shutdown(&self) {
        self.shutdown_within(SHUTDOWN_GRACE);
    }

    /// Send `Quit` and join the audio thread if it finishes within `grace`.
    /// Otherwise the thread is detached. Returns whether it was joined.
    pub(super) fn shutdown_within(&self, grace: Duration) -> bool {
        let _ = self.send(AudioCmd::Quit);

        let Some(handle) = self.join.lock().ok().and_then(|mut j| j.take()) else {
            return true;
        };
        let deadline = Instant::now() + grace;
        while !handle.is_finished() {
            if Instant::now() >= deadline {
                warn!(grace_ms = grace.as_millis() as u64, "audio thread still busy; detaching");
                return false;
            }
            thread::sleep(Duration::from_millis(10));
        }
        let _ = handle.join();
        true
    }
}

impl AudioResource for AudioPlayer {
    fn set_source(&mut self, url: &str) {
        self.generation += 1;
        let _ = self.send(AudioCmd::SetSource {
            generation: self.generation,
            url: url.to_string(),
        });
    }

    fn load(&mut self) {
        let _ = self.send(AudioCmd::Load);
    }

    fn play(&mut self) -> Result<(), AudioError> {
        self.send(AudioCmd::Play)
    }

    fn pause(&mut self) {
        let _ = self.send(AudioCmd::Pause);
    }

    fn set_volume(&mut self, volume: f32) {
        let _ = self.send(AudioCmd::SetVolume(volume));
    }

    fn seek(&mut self, position_secs: f64) {
        let position = if position_secs.is_finite() && position_secs > 0.0 {
            Duration::from_secs_f64(position_secs)
        } else {
            Duration::ZERO
        };
        let _ = self.send(AudioCmd::Seek(position));
    }

    fn poll_event(&mut self) -> Option<ResourceEvent> {
        while let Ok((generation, event)) = self.events.try_recv() {
            if generation == self.generation {
                return Some(event);
            }
            debug!(generation, current = self.generation, "dropped stale audio event");
        }
        None
    }
}

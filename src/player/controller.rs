//! The player controller: owns `PlaybackState` and the audio resource.
//!
//! Every intent goes through `reduce`; the controller then compares the old
//! and new state and drives the resource accordingly. Resource events are
//! translated back into intents by `handle_event`.

use tracing::{debug, warn};

use crate::audio::{AudioResource, ResourceEvent};

use super::intent::Intent;
use super::model::{PlaybackState, RepeatMode};
use super::reducer::reduce;

/// Shown when the resource cannot resolve or decode a source.
pub const LOAD_FAILED: &str = "Failed to load audio";
/// Shown when a play request is rejected.
pub const PLAY_FAILED: &str = "Failed to play audio";

pub struct PlayerController<R: AudioResource> {
    state: PlaybackState,
    resource: R,
}

impl<R: AudioResource> PlayerController<R> {
    /// Take ownership of `resource` and bind it to `state`: volume is applied
    /// and the current track (if any) is loaded.
    pub fn new(state: PlaybackState, resource: R) -> Self {
        let mut controller = Self { state, resource };
        controller.resource.set_volume(volume_of(&controller.state));
        if let Some(intent) = controller.bind_source() {
            controller.dispatch(intent);
        }
        controller
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    /// Apply `intent`, then any follow-up intents produced while syncing the
    /// resource (a rejected play turns into `SetError`).
    pub fn dispatch(&mut self, intent: Intent) {
        let mut pending = Some(intent);
        while let Some(intent) = pending.take() {
            pending = self.apply(intent);
        }
    }

    fn apply(&mut self, intent: Intent) -> Option<Intent> {
        debug!(intent = intent.name(), "dispatch");

        // A track start reloads the source even when the id did not change
        // (e.g. `Next` on a one-track queue), so `is_loading` always resolves.
        let starts_track = match &intent {
            Intent::SetTrack(_) => true,
            Intent::Next | Intent::Previous => !self.state.queue.is_empty(),
            _ => false,
        };
        let seek_to = match &intent {
            Intent::SetProgress(p) if p.is_finite() => Some(*p),
            _ => None,
        };

        let was_playing = self.state.is_playing;
        let old_volume = self.state.volume_percent;

        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, intent);

        let mut follow_up = None;

        if starts_track {
            follow_up = self.bind_source();
        } else if was_playing != self.state.is_playing {
            if self.state.is_playing {
                follow_up = self.request_play();
            } else {
                self.resource.pause();
            }
        }

        if old_volume != self.state.volume_percent {
            self.resource.set_volume(volume_of(&self.state));
        }

        if let Some(p) = seek_to {
            if self.state.total_seconds > 0.0 {
                let position = self.state.total_seconds * self.state.progress_percent / 100.0;
                debug!(percent = p, position, "seek");
                self.resource.seek(position);
            }
        }

        follow_up
    }

    /// Point the resource at the current track and start it if playing.
    fn bind_source(&mut self) -> Option<Intent> {
        let track = self.state.current_track.as_ref()?;
        self.resource.set_source(&track.audio_url);
        self.resource.load();
        if self.state.is_playing {
            self.request_play()
        } else {
            None
        }
    }

    fn request_play(&mut self) -> Option<Intent> {
        match self.resource.play() {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "play request rejected");
                Some(Intent::SetError(PLAY_FAILED.to_string()))
            }
        }
    }

    /// Translate one resource event into state changes.
    ///
    /// `Ended` reads `repeat_mode` as it is when the event is handled.
    pub fn handle_event(&mut self, event: ResourceEvent) {
        match event {
            ResourceEvent::MetadataLoaded { duration_secs } => {
                self.dispatch(Intent::SetTotal(duration_secs));
            }
            ResourceEvent::TimeUpdate { position_secs } => {
                self.dispatch(Intent::SetElapsed(position_secs));
            }
            ResourceEvent::Ended => {
                if self.state.repeat_mode == RepeatMode::One {
                    debug!("repeat-one: replaying current track");
                    self.resource.seek(0.0);
                    if let Some(intent) = self.request_play() {
                        self.dispatch(intent);
                    }
                } else {
                    self.dispatch(Intent::Next);
                }
            }
            ResourceEvent::Error { message } => {
                warn!(cause = %message, "audio resource error");
                self.dispatch(Intent::SetError(LOAD_FAILED.to_string()));
            }
            ResourceEvent::CanPlay => {
                self.dispatch(Intent::SetLoading(false));
            }
        }
    }

    /// Drain every pending resource event.
    pub fn sync(&mut self) {
        while let Some(event) = self.resource.poll_event() {
            self.handle_event(event);
        }
    }
}

fn volume_of(state: &PlaybackState) -> f32 {
    (state.volume_percent / 100.0) as f32
}

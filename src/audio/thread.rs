use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use crate::config::AudioSettings;

use super::error::AudioError;
use super::resource::ResourceEvent;
use super::sink::{RemoteCache, open_sink};
use super::types::{AudioCmd, TaggedEvent};

/// State owned by the audio thread: one output stream and at most one sink.
pub(super) struct Deck {
    stream: Option<OutputStream>,
    sink: Option<Sink>,
    url: Option<String>,
    generation: u64,
    playing: bool,
    ended_sent: bool,
    volume: f32,
    fetch_timeout: Duration,
    cache: RemoteCache,
    events: Sender<TaggedEvent>,
}

impl Deck {
    pub(super) fn new(
        stream: Option<OutputStream>,
        fetch_timeout: Duration,
        events: Sender<TaggedEvent>,
    ) -> Self {
        Self {
            stream,
            sink: None,
            url: None,
            generation: 0,
            playing: false,
            ended_sent: false,
            volume: 1.0,
            fetch_timeout,
            cache: RemoteCache::default(),
            events,
        }
    }

    #[cfg(test)]
    pub(super) fn attach(&mut self, sink: Sink, playing: bool) {
        self.sink = Some(sink);
        self.playing = playing;
        self.ended_sent = false;
    }

    #[cfg(test)]
    pub(super) fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    #[cfg(test)]
    pub(super) fn volume(&self) -> f32 {
        self.volume
    }

    fn emit(&self, event: ResourceEvent) {
        let _ = self.events.send((self.generation, event));
    }

    pub(super) fn set_source(&mut self, generation: u64, url: String) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.generation = generation;
        self.url = Some(url);
        self.playing = false;
        self.ended_sent = false;
    }

    /// Replace the sink with a fresh, paused one at the start of the source.
    fn open(&mut self) -> Result<Option<Duration>, AudioError> {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        let url = self.url.as_deref().ok_or(AudioError::NoSource)?;
        let stream = self
            .stream
            .as_ref()
            .ok_or_else(|| AudioError::Device("output stream unavailable".to_string()))?;

        let opened = open_sink(stream, url, self.fetch_timeout, &mut self.cache)?;
        opened.sink.set_volume(self.volume);
        self.sink = Some(opened.sink);
        self.ended_sent = false;
        Ok(opened.total)
    }

    pub(super) fn load(&mut self) {
        self.playing = false;
        match self.open() {
            Ok(total) => {
                for event in loaded_events(total) {
                    self.emit(event);
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to load source");
                self.emit(ResourceEvent::Error {
                    message: e.to_string(),
                });
            }
        }
    }

    /// A sink that has drained must be rebuilt before it can play again.
    fn ensure_playable(&mut self) -> bool {
        let drained = self.sink.as_ref().is_some_and(|s| s.empty());
        if !drained {
            return self.sink.is_some();
        }
        match self.open() {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "failed to reopen source");
                self.emit(ResourceEvent::Error {
                    message: e.to_string(),
                });
                false
            }
        }
    }

    pub(super) fn play(&mut self) {
        if !self.ensure_playable() {
            debug!("play ignored: no sink loaded");
            return;
        }
        if let Some(s) = self.sink.as_ref() {
            s.play();
            self.playing = true;
        }
    }

    pub(super) fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
        self.playing = false;
    }

    pub(super) fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(self.volume);
        }
    }

    pub(super) fn seek(&mut self, position: Duration) {
        if !self.ensure_playable() {
            return;
        }
        let Some(s) = self.sink.as_ref() else {
            return;
        };
        if let Err(e) = s.try_seek(position) {
            warn!(error = %AudioError::Seek(e.to_string()), "seek rejected");
            return;
        }
        if self.playing {
            s.play();
        }
        self.emit(ResourceEvent::TimeUpdate {
            position_secs: s.get_pos().as_secs_f64(),
        });
    }

    pub(super) fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.playing = false;
    }

    /// Periodic work: report the position and detect the end of the source.
    pub(super) fn tick(&mut self) {
        if !self.playing {
            return;
        }
        let Some(s) = self.sink.as_ref() else {
            return;
        };
        if s.empty() {
            if !self.ended_sent {
                self.ended_sent = true;
                self.playing = false;
                self.emit(ResourceEvent::Ended);
            }
            return;
        }
        self.emit(ResourceEvent::TimeUpdate {
            position_secs: s.get_pos().as_secs_f64(),
        });
    }
}

/// Events announcing a freshly loaded source. An unknown length is reported
/// as zero so the previous track's total never survives a source change.
pub(super) fn loaded_events(total: Option<Duration>) -> [ResourceEvent; 2] {
    [
        ResourceEvent::MetadataLoaded {
            duration_secs: total.map_or(0.0, |t| t.as_secs_f64()),
        },
        ResourceEvent::CanPlay,
    ]
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<TaggedEvent>,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped, which
                // would scribble over the TUI.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                warn!(error = %e, "no audio output device; every load will fail");
                None
            }
        };

        let fetch_timeout = Duration::from_secs(audio_settings.fetch_timeout_secs);
        let mut deck = Deck::new(stream, fetch_timeout, events);
        let tick = Duration::from_millis(audio_settings.tick_ms.max(1));

        loop {
            match rx.recv_timeout(tick) {
                Ok(cmd) => match cmd {
                    AudioCmd::SetSource { generation, url } => {
                        debug!(generation, url = %url, "source assigned");
                        deck.set_source(generation, url);
                    }
                    AudioCmd::Load => deck.load(),
                    AudioCmd::Play => deck.play(),
                    AudioCmd::Pause => deck.pause(),
                    AudioCmd::SetVolume(v) => deck.set_volume(v),
                    AudioCmd::Seek(position) => deck.seek(position),
                    AudioCmd::Quit => {
                        deck.stop();
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => deck.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

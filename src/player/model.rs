//! Player model types: `Track`, `RepeatMode` and `PlaybackState`.
//!
//! `PlaybackState` is the single aggregate the UI renders from. It is only
//! ever replaced through `reducer::reduce`.

use std::sync::Arc;

use serde::Deserialize;

/// A playable catalog entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Track {
    /// Unique within a queue; navigation looks tracks up by this id.
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    #[serde(default)]
    pub image: String,
    /// Display label such as `3:20`. The real length comes from the resource.
    #[serde(default)]
    pub duration: String,
    pub audio_url: String,
}

/// Shared handle to an immutable track.
pub type TrackRef = Arc<Track>;

/// What happens when the current track finishes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// Advance through the queue.
    #[default]
    Off,
    /// Same as `Off`: the queue already wraps around.
    All,
    /// Replay the current track.
    One,
}

impl RepeatMode {
    /// Next mode in the fixed cycle `Off -> All -> One -> Off`.
    pub fn cycled(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::All => "all",
            Self::One => "one",
        }
    }
}

/// Canonical playback state.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub current_track: Option<TrackRef>,
    pub is_playing: bool,
    /// Display value in `0..=100`, derived from elapsed/total on time updates.
    pub progress_percent: f64,
    pub elapsed_seconds: f64,
    pub total_seconds: f64,
    pub volume_percent: f64,
    /// Insertion order is playback order.
    pub queue: Vec<TrackRef>,
    /// Cosmetic flag; the queue is never reordered.
    pub is_shuffled: bool,
    pub repeat_mode: RepeatMode,
    pub is_loading: bool,
    pub last_error: Option<String>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_track: None,
            is_playing: false,
            progress_percent: 0.0,
            elapsed_seconds: 0.0,
            total_seconds: 0.0,
            volume_percent: 50.0,
            queue: Vec::new(),
            is_shuffled: false,
            repeat_mode: RepeatMode::Off,
            is_loading: false,
            last_error: None,
        }
    }
}

impl PlaybackState {
    /// Initial session state: `track` is loaded but not playing, with no queue yet.
    pub fn with_track(track: TrackRef) -> Self {
        Self {
            current_track: Some(track),
            ..Self::default()
        }
    }

    /// Position of `current_track` inside `queue`, looked up by id.
    pub fn current_index(&self) -> Option<usize> {
        let current = self.current_track.as_ref()?;
        self.queue.iter().position(|t| t.id == current.id)
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_track.as_ref().map(|t| t.id.as_str())
    }
}

//! Messages exchanged with the audio thread.

use std::time::Duration;

use super::resource::ResourceEvent;

#[derive(Debug)]
pub enum AudioCmd {
    /// Forget the current sink and remember `url` as the source.
    /// `generation` tags every event emitted for this source.
    SetSource { generation: u64, url: String },
    /// Open and decode the current source into a paused sink.
    Load,
    /// Start or resume playback; restarts a source that already ended.
    Play,
    Pause,
    /// Volume in `0.0..=1.0`, applied to the current and future sinks.
    SetVolume(f32),
    Seek(Duration),
    /// Stop playback and exit the audio thread.
    Quit,
}

/// An event tagged with the source generation it belongs to.
pub type TaggedEvent = (u64, ResourceEvent);

use super::model::TrackRef;

/// A request to change playback state. This is the whole surface other
/// components may use to affect playback.
#[derive(Debug, Clone)]
pub enum Intent {
    /// Start `track` from the beginning.
    SetTrack(TrackRef),
    TogglePlay,
    /// Manual seek, in percent of the total length.
    SetProgress(f64),
    /// Playback position reported by the resource, in seconds.
    SetElapsed(f64),
    /// Track length reported by the resource, in seconds.
    SetTotal(f64),
    SetVolume(f64),
    Next,
    Previous,
    ToggleShuffle,
    ToggleRepeat,
    /// Replace the queue wholesale; the current track is kept.
    SetQueue(Vec<TrackRef>),
    SetLoading(bool),
    SetError(String),
}

impl Intent {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetTrack(_) => "set-track",
            Self::TogglePlay => "toggle-play",
            Self::SetProgress(_) => "set-progress",
            Self::SetElapsed(_) => "set-elapsed",
            Self::SetTotal(_) => "set-total",
            Self::SetVolume(_) => "set-volume",
            Self::Next => "next",
            Self::Previous => "previous",
            Self::ToggleShuffle => "toggle-shuffle",
            Self::ToggleRepeat => "toggle-repeat",
            Self::SetQueue(_) => "set-queue",
            Self::SetLoading(_) => "set-loading",
            Self::SetError(_) => "set-error",
        }
    }
}

use crate::catalog::Catalog;
use crate::config;
use crate::player::{PlaybackState, RepeatMode};

/// Id of the track loaded (paused) when the app starts.
const INITIAL_TRACK_ID: &str = "1";

/// Session start state: the initial track loaded but paused, no queue, and
/// playback defaults taken from config.
pub fn initial_state(catalog: &Catalog, settings: &config::Settings) -> PlaybackState {
    let mut state = match catalog
        .song(INITIAL_TRACK_ID)
        .or_else(|| catalog.songs.first())
    {
        Some(track) => PlaybackState::with_track(track.clone()),
        None => PlaybackState::default(),
    };

    state.volume_percent = f64::from(settings.audio.initial_volume.min(100));
    state.is_shuffled = settings.playback.shuffle;
    state.repeat_mode = match settings.playback.repeat_mode {
        config::RepeatModeSetting::Off => RepeatMode::Off,
        config::RepeatModeSetting::All => RepeatMode::All,
        config::RepeatModeSetting::One => RepeatMode::One,
    };
    state
}

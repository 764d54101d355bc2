//! The playback reducer.
//!
//! `reduce` is pure: no I/O, no panics. Numeric inputs outside their domain
//! are clamped, and non-finite numbers leave the state untouched.

use super::intent::Intent;
use super::model::PlaybackState;

/// Compute the state that follows `state` once `intent` is applied.
pub fn reduce(mut state: PlaybackState, intent: Intent) -> PlaybackState {
    match intent {
        Intent::SetTrack(track) => {
            state.current_track = Some(track);
            state.is_playing = true;
            state.is_loading = true;
            state.last_error = None;
        }
        Intent::TogglePlay => {
            state.is_playing = !state.is_playing;
        }
        Intent::SetProgress(p) => {
            if let Some(p) = percent(p) {
                state.progress_percent = p;
            }
        }
        Intent::SetElapsed(t) => {
            if let Some(t) = seconds(t) {
                state.elapsed_seconds = t;
                state.progress_percent = progress_of(t, state.total_seconds);
            }
        }
        Intent::SetTotal(t) => {
            if let Some(t) = seconds(t) {
                state.total_seconds = t;
                state.is_loading = false;
            }
        }
        Intent::SetVolume(v) => {
            if let Some(v) = percent(v) {
                state.volume_percent = v;
            }
        }
        Intent::Next => {
            if let Some(i) = next_index(&state) {
                start_queued(&mut state, i);
            }
        }
        Intent::Previous => {
            if let Some(i) = previous_index(&state) {
                start_queued(&mut state, i);
            }
        }
        Intent::ToggleShuffle => {
            state.is_shuffled = !state.is_shuffled;
        }
        Intent::ToggleRepeat => {
            state.repeat_mode = state.repeat_mode.cycled();
        }
        Intent::SetQueue(tracks) => {
            state.queue = tracks;
        }
        Intent::SetLoading(b) => {
            state.is_loading = b;
        }
        Intent::SetError(msg) => {
            state.last_error = Some(msg);
            state.is_loading = false;
        }
    }
    state
}

/// `elapsed / total * 100`, or 0 while the total is unknown.
pub(crate) fn progress_of(elapsed: f64, total: f64) -> f64 {
    if total > 0.0 {
        elapsed / total * 100.0
    } else {
        0.0
    }
}

/// Queue index `Next` lands on. A current track missing from the queue
/// counts as index -1, so `Next` lands on 0.
pub(crate) fn next_index(state: &PlaybackState) -> Option<usize> {
    let len = state.queue.len();
    if len == 0 {
        return None;
    }
    Some(match state.current_index() {
        Some(i) => (i + 1) % len,
        None => 0,
    })
}

/// Queue index `Previous` lands on; wraps to the last track at index 0 or -1.
pub(crate) fn previous_index(state: &PlaybackState) -> Option<usize> {
    let len = state.queue.len();
    if len == 0 {
        return None;
    }
    Some(match state.current_index() {
        Some(i) if i > 0 => i - 1,
        _ => len - 1,
    })
}

fn start_queued(state: &mut PlaybackState, index: usize) {
    state.current_track = Some(state.queue[index].clone());
    state.is_playing = true;
    state.is_loading = true;
}

fn percent(v: f64) -> Option<f64> {
    v.is_finite().then(|| v.clamp(0.0, 100.0))
}

fn seconds(t: f64) -> Option<f64> {
    t.is_finite().then(|| t.max(0.0))
}

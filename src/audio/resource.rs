//! The audio resource contract.
//!
//! A resource is a single playback handle with a settable source. Requests
//! are fire-and-forget; outcomes come back later as `ResourceEvent`s.

use super::error::AudioError;

/// Lifecycle notifications emitted by a resource.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceEvent {
    /// The source was decoded far enough to know its length.
    MetadataLoaded { duration_secs: f64 },
    /// Playback position advanced.
    TimeUpdate { position_secs: f64 },
    /// The source played to its end.
    Ended,
    /// The source could not be resolved or decoded.
    Error { message: String },
    /// The source is ready to start playing.
    CanPlay,
}

pub trait AudioResource {
    /// Assign a new source. Nothing is read until `load`.
    fn set_source(&mut self, url: &str);

    /// (Re)load the assigned source from the beginning.
    fn load(&mut self);

    /// Request playback. An `Err` means the request was rejected outright;
    /// later failures arrive as `ResourceEvent::Error`.
    fn play(&mut self) -> Result<(), AudioError>;

    fn pause(&mut self);

    /// Output volume in `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);

    /// Move the playback position to `position_secs`.
    fn seek(&mut self, position_secs: f64);

    /// Next pending event for the current source, if any.
    fn poll_event(&mut self) -> Option<ResourceEvent>;
}

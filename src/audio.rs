//! Audio playback resource.
//!
//! `resource` defines the contract the player controller drives; `player`
//! implements it on top of a rodio audio thread.

mod error;
mod player;
mod resource;
mod sink;
mod thread;
mod types;

pub use error::AudioError;
pub use player::AudioPlayer;
pub use resource::{AudioResource, ResourceEvent};

#[cfg(test)]
mod tests;

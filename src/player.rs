//! Player state controller.
//!
//! `model` holds the canonical `PlaybackState`, `reducer` turns an `Intent`
//! into the next state and `controller` keeps the single audio resource in
//! sync with that state.

mod controller;
mod format;
mod intent;
mod model;
mod reducer;

pub use controller::*;
pub use format::format_time;
pub use intent::Intent;
pub use model::*;
pub use reducer::reduce;

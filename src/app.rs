//! Application module: exposes the navigation model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the catalog, the active
//! page, per-page selection and the Search/Library query state. Playback
//! state is owned by the player controller.

mod model;

pub use model::*;

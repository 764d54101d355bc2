//! Music catalog: the songs, playlists, browse categories and library
//! entries the pages list.
//!
//! The built-in data lives in `mock`, `load` layers an optional TOML catalog
//! file and a scanned local directory on top, and `search` holds the pure
//! queries the Search and Library pages run.

mod load;
mod local;
mod mock;
mod model;
mod search;

pub use load::CatalogError;
pub use model::*;
pub use search::{filter_library, search_songs};

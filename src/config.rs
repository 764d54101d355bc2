//! Settings for tunedeck: the `Settings` schema plus loading from an optional
//! TOML file and `TUNEDECK__*` environment overrides.

mod load;
mod schema;

pub use load::default_log_path;
pub use schema::*;

#[cfg(test)]
mod tests;

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::local;
use super::mock;
use super::model::{Catalog, LibraryItem, LibraryKind, Playlist};
use crate::config::LibrarySettings;
use crate::player::Track;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Extra entries read from `library.catalog_path`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    songs: Vec<Track>,
    playlists: Vec<Playlist>,
    library: Vec<LibraryItem>,
}

impl Catalog {
    /// The built-in catalog plus whatever `settings` point at.
    ///
    /// A catalog file that cannot be read or parsed is logged and skipped.
    pub fn load(settings: &LibrarySettings) -> Self {
        let mut catalog = mock::builtin();

        if let Some(path) = &settings.catalog_path {
            match catalog.merge_file(path) {
                Ok(()) => tracing::info!(path = %path.display(), "loaded catalog file"),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "ignoring catalog file")
                }
            }
        }

        if let Some(dir) = &settings.local_dir {
            let tracks = local::scan(dir, settings);
            tracing::info!(dir = %dir.display(), count = tracks.len(), "scanned local files");
            catalog.add_local(tracks);
        }

        catalog
    }

    /// Append the songs, playlists and library entries of a TOML file.
    pub fn merge_file(&mut self, path: &Path) -> Result<(), CatalogError> {
        let text = std::fs::read_to_string(path)?;
        self.merge_str(&text)
    }

    pub fn merge_str(&mut self, text: &str) -> Result<(), CatalogError> {
        let file: CatalogFile = toml::from_str(text)?;
        self.push_songs(file.songs);
        self.featured.extend(file.playlists);
        self.library.extend(file.library);
        Ok(())
    }

    /// Add scanned files as songs and expose them as a pinned library playlist.
    pub fn add_local(&mut self, tracks: Vec<Track>) {
        if tracks.is_empty() {
            return;
        }
        let track_ids = tracks.iter().map(|t| t.id.clone()).collect::<Vec<_>>();
        let subtitle = match track_ids.len() {
            1 => "1 song".to_string(),
            n => format!("{n} songs"),
        };
        self.push_songs(tracks);
        self.library.insert(
            0,
            LibraryItem {
                id: "local".to_string(),
                title: "Local Files".to_string(),
                subtitle,
                kind: LibraryKind::Playlist,
                pinned: true,
                downloaded: true,
                track_ids,
            },
        );
    }
}

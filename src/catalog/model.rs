use std::sync::Arc;

use serde::Deserialize;

use crate::player::{Track, TrackRef};

/// A curated list of tracks shown on the home feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub track_ids: Vec<String>,
}

/// A genre tile shown by the Search page while the query is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseCategory {
    pub id: u32,
    pub title: &'static str,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryKind {
    Playlist,
    Artist,
    Album,
}

impl LibraryKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Playlist => "Playlist",
            Self::Artist => "Artist",
            Self::Album => "Album",
        }
    }
}

/// An entry of "Your Library".
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LibraryItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub kind: LibraryKind,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub downloaded: bool,
    #[serde(default)]
    pub track_ids: Vec<String>,
}

/// Which kinds of library entries are listed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LibraryFilter {
    #[default]
    All,
    Playlists,
    Artists,
    Albums,
}

impl LibraryFilter {
    /// `All -> Playlists -> Artists -> Albums -> All`.
    pub fn cycled(self) -> Self {
        match self {
            Self::All => Self::Playlists,
            Self::Playlists => Self::Artists,
            Self::Artists => Self::Albums,
            Self::Albums => Self::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Playlists => "Playlists",
            Self::Artists => "Artists",
            Self::Albums => "Albums",
        }
    }

    pub fn admits(self, kind: LibraryKind) -> bool {
        match self {
            Self::All => true,
            Self::Playlists => kind == LibraryKind::Playlist,
            Self::Artists => kind == LibraryKind::Artist,
            Self::Albums => kind == LibraryKind::Album,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LibrarySort {
    /// Catalog order.
    #[default]
    RecentlyAdded,
    Alphabetical,
}

impl LibrarySort {
    pub fn toggled(self) -> Self {
        match self {
            Self::RecentlyAdded => Self::Alphabetical,
            Self::Alphabetical => Self::RecentlyAdded,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::RecentlyAdded => "Recently added",
            Self::Alphabetical => "Alphabetical",
        }
    }
}

/// Everything the pages can list. Songs are shared so queues built from the
/// catalog never copy track data.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub songs: Vec<TrackRef>,
    pub featured: Vec<Playlist>,
    pub recently_played: Vec<Playlist>,
    pub categories: Vec<BrowseCategory>,
    pub library: Vec<LibraryItem>,
}

impl Catalog {
    pub fn song(&self, id: &str) -> Option<&TrackRef> {
        self.songs.iter().find(|t| t.id == id)
    }

    /// Resolve `ids` in order, skipping ids the catalog does not know.
    pub fn tracks_for(&self, ids: &[String]) -> Vec<TrackRef> {
        ids.iter().filter_map(|id| self.song(id)).cloned().collect()
    }

    pub(crate) fn push_songs(&mut self, songs: impl IntoIterator<Item = Track>) {
        self.songs.extend(songs.into_iter().map(Arc::new));
    }
}

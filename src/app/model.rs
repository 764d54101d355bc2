//! Application model types: `App`, `Page` and the rows a page lists.

use crate::catalog::{
    BrowseCategory, Catalog, LibraryFilter, LibraryItem, LibrarySort, Playlist, filter_library,
    search_songs,
};
use crate::player::{Intent, TrackRef};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Search,
    Library,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::Search, Page::Library];

    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Search => "Search",
            Self::Library => "Your Library",
        }
    }

    /// `Home -> Search -> Library -> Home`.
    pub fn next(self) -> Self {
        match self {
            Self::Home => Self::Search,
            Self::Search => Self::Library,
            Self::Library => Self::Home,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Home => 0,
            Self::Search => 1,
            Self::Library => 2,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Grid,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::List => Self::Grid,
            Self::Grid => Self::List,
        }
    }
}

/// One selectable line of a page.
#[derive(Debug, Clone)]
pub enum Row<'a> {
    Playlist(&'a Playlist),
    Song(TrackRef),
    Category(&'a BrowseCategory),
    Item(&'a LibraryItem),
}

/// `SetTrack(track)` followed by `SetQueue(context)`.
pub fn play_song(track: TrackRef, context: Vec<TrackRef>) -> Vec<Intent> {
    vec![Intent::SetTrack(track), Intent::SetQueue(context)]
}

/// Start the first of `tracks` with all of them queued. Nothing when empty.
pub fn play_list(tracks: Vec<TrackRef>) -> Vec<Intent> {
    match tracks.first() {
        Some(first) => play_song(first.clone(), tracks),
        None => Vec::new(),
    }
}

/// The main application model.
pub struct App {
    pub catalog: Catalog,
    pub page: Page,
    selected: [usize; 3],

    /// Whether keystrokes currently edit the page query.
    pub editing: bool,
    pub search_query: String,
    pub library_query: String,
    pub library_filter: LibraryFilter,
    pub library_sort: LibrarySort,
    pub view_mode: ViewMode,
}

impl App {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            page: Page::Home,
            selected: [0; 3],
            editing: false,
            search_query: String::new(),
            library_query: String::new(),
            library_filter: LibraryFilter::All,
            library_sort: LibrarySort::RecentlyAdded,
            view_mode: ViewMode::List,
        }
    }

    /// Rows of the active page in display order.
    pub fn rows(&self) -> Vec<Row<'_>> {
        match self.page {
            Page::Home => self
                .catalog
                .recently_played
                .iter()
                .chain(&self.catalog.featured)
                .map(Row::Playlist)
                .chain(self.catalog.songs.iter().cloned().map(Row::Song))
                .collect(),
            Page::Search if self.search_query.trim().is_empty() => {
                self.catalog.categories.iter().map(Row::Category).collect()
            }
            Page::Search => search_songs(&self.catalog.songs, &self.search_query)
                .into_iter()
                .map(Row::Song)
                .collect(),
            Page::Library => filter_library(
                &self.catalog.library,
                &self.library_query,
                self.library_filter,
                self.library_sort,
            )
            .into_iter()
            .map(Row::Item)
            .collect(),
        }
    }

    /// Selected row index on the active page, clamped to the current rows.
    pub fn selected(&self) -> usize {
        let len = self.rows().len();
        self.selected[self.page.index()].min(len.saturating_sub(1))
    }

    fn set_selected(&mut self, idx: usize) {
        self.selected[self.page.index()] = idx;
    }

    pub fn set_page(&mut self, page: Page) {
        self.page = page;
        self.editing = false;
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page.next());
    }

    /// Move selection to the next row, wrapping to the first.
    pub fn next(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        let next = (self.selected() + 1) % len;
        self.set_selected(next);
    }

    /// Move selection to the previous row, wrapping to the last.
    pub fn prev(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        let prev = match self.selected() {
            0 => len - 1,
            p => p - 1,
        };
        self.set_selected(prev);
    }

    /// Intents that play the selected row, if it is playable.
    pub fn activate(&self) -> Vec<Intent> {
        let rows = self.rows();
        let Some(row) = rows.get(self.selected()) else {
            return Vec::new();
        };
        match row {
            Row::Song(track) => play_song(track.clone(), self.catalog.songs.clone()),
            Row::Playlist(p) => play_list(self.catalog.tracks_for(&p.track_ids)),
            Row::Item(item) => play_list(self.catalog.tracks_for(&item.track_ids)),
            Row::Category(_) => Vec::new(),
        }
    }

    fn query_mut(&mut self) -> Option<&mut String> {
        match self.page {
            Page::Home => None,
            Page::Search => Some(&mut self.search_query),
            Page::Library => Some(&mut self.library_query),
        }
    }

    /// The query of the active page; Home has none.
    pub fn query(&self) -> Option<&str> {
        match self.page {
            Page::Home => None,
            Page::Search => Some(&self.search_query),
            Page::Library => Some(&self.library_query),
        }
    }

    /// Start editing the active page query. Ignored on Home.
    pub fn begin_edit(&mut self) {
        self.editing = self.query_mut().is_some();
    }

    /// Leave edit mode keeping the query.
    pub fn finish_edit(&mut self) {
        self.editing = false;
    }

    /// Leave edit mode and clear the query.
    pub fn cancel_edit(&mut self) {
        if let Some(q) = self.query_mut() {
            q.clear();
        }
        self.editing = false;
        self.set_selected(0);
    }

    pub fn push_query_char(&mut self, c: char) {
        if let Some(q) = self.query_mut() {
            q.push(c);
            self.set_selected(0);
        }
    }

    pub fn pop_query_char(&mut self) {
        if let Some(q) = self.query_mut() {
            q.pop();
            self.set_selected(0);
        }
    }

    pub fn cycle_library_filter(&mut self) {
        self.library_filter = self.library_filter.cycled();
        self.selected[Page::Library.index()] = 0;
    }

    pub fn toggle_library_sort(&mut self) {
        self.library_sort = self.library_sort.toggled();
    }

    pub fn toggle_view_mode(&mut self) {
        self.view_mode = self.view_mode.toggled();
    }
}

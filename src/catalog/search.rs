use super::model::{LibraryFilter, LibraryItem, LibrarySort};
use crate::player::TrackRef;

/// Songs whose title, artist or album contain `query` as typed,
/// case-insensitively, in catalog order. A blank query matches nothing.
pub fn search_songs(songs: &[TrackRef], query: &str) -> Vec<TrackRef> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    songs
        .iter()
        .filter(|t| {
            t.title.to_lowercase().contains(&needle)
                || t.artist.to_lowercase().contains(&needle)
                || t.album.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Library entries admitted by `filter` whose title or subtitle contain
/// `query` (untrimmed, case-insensitive), ordered by `sort`.
pub fn filter_library<'a>(
    items: &'a [LibraryItem],
    query: &str,
    filter: LibraryFilter,
    sort: LibrarySort,
) -> Vec<&'a LibraryItem> {
    let needle = query.to_lowercase();

    let mut out: Vec<&LibraryItem> = items
        .iter()
        .filter(|item| filter.admits(item.kind))
        .filter(|item| {
            item.title.to_lowercase().contains(&needle)
                || item.subtitle.to_lowercase().contains(&needle)
        })
        .collect();

    if sort == LibrarySort::Alphabetical {
        out.sort_by_key(|item| item.title.to_lowercase());
    }
    out
}

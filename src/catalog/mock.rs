use super::model::{BrowseCategory, Catalog, LibraryItem, LibraryKind, Playlist};
use crate::player::Track;

/// Every built-in song points at the same short sample clip.
pub const SAMPLE_AUDIO_URL: &str = "https://www.soundjay.com/misc/sounds/magic-chime-02.mp3";

const SONGS: &[(&str, &str, &str, &str, &str)] = &[
    ("1", "Blinding Lights", "The Weeknd", "After Hours", "3:20"),
    ("2", "Shape of You", "Ed Sheeran", "÷ (Divide)", "3:53"),
    ("3", "Someone Like You", "Adele", "21", "4:45"),
    ("4", "Watermelon Sugar", "Harry Styles", "Fine Line", "2:54"),
    ("5", "Levitating", "Dua Lipa", "Future Nostalgia", "3:23"),
    ("6", "Good 4 U", "Olivia Rodrigo", "SOUR", "2:58"),
    ("7", "Stay", "The Kid LAROI, Justin Bieber", "F*CK LOVE 3", "2:21"),
    ("8", "Industry Baby", "Lil Nas X, Jack Harlow", "MONTERO", "3:32"),
];

const FEATURED: &[(&str, &str, &str, &[&str])] = &[
    (
        "featured-1",
        "Today's Top Hits",
        "Jung Kook is on top of the Hottest 50!",
        &["1", "5", "6", "7"],
    ),
    (
        "featured-2",
        "RapCaviar",
        "New music from Drake, Travis Scott and more",
        &["8"],
    ),
    (
        "featured-3",
        "All Out 2010s",
        "The biggest songs of the 2010s",
        &["2", "3"],
    ),
    ("featured-4", "Rock Classics", "Rock legends & epic songs", &[]),
    (
        "featured-5",
        "Chill Hits",
        "Kick back to the best new and recent chill hits",
        &["3", "4"],
    ),
    ("featured-6", "Viva Latino", "Today's top Latin hits", &[]),
];

const RECENTLY_PLAYED: &[(&str, &str, &str, &[&str])] = &[
    ("recent-1", "Liked Songs", "729 songs", &["1", "2", "3", "4", "5"]),
    (
        "recent-2",
        "Discover Weekly",
        "Your weekly mixtape of fresh music",
        &["6", "7", "8"],
    ),
    (
        "recent-3",
        "Pop Mix",
        "Justin Bieber, Dua Lipa, Taylor Swift and more",
        &["5", "7", "2"],
    ),
    (
        "recent-4",
        "Release Radar",
        "Catch all the latest music from artists you follow",
        &["6", "8"],
    ),
    (
        "recent-5",
        "Daily Mix 1",
        "The Weeknd, Post Malone, Dua Lipa and more",
        &["1", "5"],
    ),
    ("recent-6", "Your Time Capsule", "Your top songs from 2019", &["2", "3"]),
];

const CATEGORIES: &[&str] = &[
    "Pop",
    "Hip-Hop",
    "Rock",
    "Latin",
    "Electronic",
    "Country",
    "R&B",
    "Indie",
    "Jazz",
    "Classical",
];

struct LibrarySeed {
    title: &'static str,
    subtitle: &'static str,
    kind: LibraryKind,
    pinned: bool,
    downloaded: bool,
    track_ids: &'static [&'static str],
}

const LIBRARY: &[LibrarySeed] = &[
    LibrarySeed {
        title: "Liked Songs",
        subtitle: "729 songs",
        kind: LibraryKind::Playlist,
        pinned: true,
        downloaded: false,
        track_ids: &["1", "2", "3", "4", "5"],
    },
    LibrarySeed {
        title: "Discover Weekly",
        subtitle: "Made for you • Updated Dec 11",
        kind: LibraryKind::Playlist,
        pinned: true,
        downloaded: true,
        track_ids: &["6", "7", "8"],
    },
    LibrarySeed {
        title: "Release Radar",
        subtitle: "Made for you • Updated Dec 11",
        kind: LibraryKind::Playlist,
        pinned: false,
        downloaded: false,
        track_ids: &["6", "8"],
    },
    LibrarySeed {
        title: "My Playlist #1",
        subtitle: "25 songs",
        kind: LibraryKind::Playlist,
        pinned: false,
        downloaded: false,
        track_ids: &["3", "4"],
    },
    LibrarySeed {
        title: "Pop Mix",
        subtitle: "Made for you",
        kind: LibraryKind::Playlist,
        pinned: false,
        downloaded: true,
        track_ids: &["5", "7", "2"],
    },
    LibrarySeed {
        title: "The Weeknd",
        subtitle: "Artist",
        kind: LibraryKind::Artist,
        pinned: false,
        downloaded: false,
        track_ids: &["1"],
    },
    LibrarySeed {
        title: "After Hours",
        subtitle: "The Weeknd • 2020",
        kind: LibraryKind::Album,
        pinned: false,
        downloaded: false,
        track_ids: &["1"],
    },
    LibrarySeed {
        title: "Daily Mix 1",
        subtitle: "Made for you",
        kind: LibraryKind::Playlist,
        pinned: false,
        downloaded: false,
        track_ids: &["1", "5"],
    },
];

fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

fn playlists(seeds: &[(&str, &str, &str, &[&str])]) -> Vec<Playlist> {
    seeds
        .iter()
        .map(|(id, title, description, track_ids)| Playlist {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            track_ids: ids(track_ids),
        })
        .collect()
}

/// The built-in catalog shipped with the binary.
pub fn builtin() -> Catalog {
    let mut catalog = Catalog {
        featured: playlists(FEATURED),
        recently_played: playlists(RECENTLY_PLAYED),
        categories: CATEGORIES
            .iter()
            .zip(1..)
            .map(|(title, id)| BrowseCategory { id, title: *title })
            .collect(),
        library: LIBRARY
            .iter()
            .zip(1..)
            .map(|(seed, n): (&LibrarySeed, u32)| LibraryItem {
                id: format!("lib-{n}"),
                title: seed.title.to_string(),
                subtitle: seed.subtitle.to_string(),
                kind: seed.kind,
                pinned: seed.pinned,
                downloaded: seed.downloaded,
                track_ids: ids(seed.track_ids),
            })
            .collect(),
        ..Catalog::default()
    };

    catalog.push_songs(
        SONGS
            .iter()
            .map(|(id, title, artist, album, duration)| Track {
                id: id.to_string(),
                title: title.to_string(),
                artist: artist.to_string(),
                album: album.to_string(),
                image: String::new(),
                duration: duration.to_string(),
                audio_url: SAMPLE_AUDIO_URL.to_string(),
            }),
    );
    catalog
}

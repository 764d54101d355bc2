use std::path::Path;

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::player::{Track, format_time};

pub(crate) fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn non_empty(v: Option<impl AsRef<str>>) -> Option<String> {
    v.map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn read_track(path: &Path) -> Track {
    let mut title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let mut artist = String::from("Unknown Artist");
    let mut album = String::from("Local Files");
    let mut duration = String::new();

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            duration = format_time(tagged.properties().duration().as_secs_f64());

            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = non_empty(tag.title()) {
                    title = v;
                }
                if let Some(v) = non_empty(tag.artist()) {
                    artist = v;
                }
                if let Some(v) = non_empty(tag.album()) {
                    album = v;
                }
            }
        }
        Err(err) => tracing::debug!(path = %path.display(), error = %err, "no readable tags"),
    }

    Track {
        id: String::new(),
        title,
        artist,
        album,
        image: String::new(),
        duration,
        audio_url: path.display().to_string(),
    }
}

/// Walk `dir` for audio files and read their tags.
///
/// Tracks are sorted by `artist - title` (case-insensitive) and then given
/// ids `local:0`, `local:1`, ...
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut tracks: Vec<Track> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_file() && is_audio_file(entry.path(), settings))
        .map(|entry| read_track(entry.path()))
        .collect();

    tracks.sort_by_key(|t| format!("{} - {}", t.artist, t.title).to_lowercase());
    for (n, track) in tracks.iter_mut().enumerate() {
        track.id = format!("local:{n}");
    }
    tracks
}

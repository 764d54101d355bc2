//! Utilities for turning a source location into a paused `rodio` sink.
//!
//! A location is a `file://` URL, an `http(s)://` URL (downloaded into
//! memory) or a plain filesystem path.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use lofty::file::TaggedFile;
use lofty::prelude::AudioFile;
use lofty::probe::Probe;
use rodio::{Decoder, OutputStream, Sink, Source};
use tracing::debug;

use super::error::AudioError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Location {
    File(PathBuf),
    Remote(String),
}

pub(crate) fn classify_location(url: &str) -> Location {
    if let Some(path) = url.strip_prefix("file://") {
        return Location::File(PathBuf::from(path));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return Location::Remote(url.to_string());
    }
    Location::File(PathBuf::from(url))
}

/// The last downloaded remote payload, so replays do not fetch again.
#[derive(Default)]
pub(super) struct RemoteCache {
    entry: Option<(String, Arc<[u8]>)>,
}

impl RemoteCache {
    fn get_or_fetch(&mut self, url: &str, timeout: Duration) -> Result<Arc<[u8]>, AudioError> {
        if let Some((cached_url, bytes)) = &self.entry {
            if cached_url == url {
                return Ok(bytes.clone());
            }
        }
        let bytes: Arc<[u8]> = fetch(url, timeout)?.into();
        self.entry = Some((url.to_string(), bytes.clone()));
        Ok(bytes)
    }
}

/// A freshly decoded, paused sink and the length the decoder reported.
pub(super) struct OpenedSink {
    pub sink: Sink,
    pub total: Option<Duration>,
}

/// Create a paused `Sink` playing `url` from the start.
pub(super) fn open_sink(
    stream: &OutputStream,
    url: &str,
    fetch_timeout: Duration,
    cache: &mut RemoteCache,
) -> Result<OpenedSink, AudioError> {
    let sink = Sink::connect_new(stream.mixer());
    let total = append_source(&sink, url, fetch_timeout, cache)?;
    sink.pause();
    Ok(OpenedSink { sink, total })
}

/// Decode `url` into `sink` and return its length, if either the decoder or
/// the container tags know it.
pub(super) fn append_source(
    sink: &Sink,
    url: &str,
    fetch_timeout: Duration,
    cache: &mut RemoteCache,
) -> Result<Option<Duration>, AudioError> {
    let total = match classify_location(url) {
        Location::File(path) => {
            debug!(path = %path.display(), "opening local source");
            let file = File::open(&path).map_err(|source| AudioError::Open {
                path: path.clone(),
                source,
            })?;
            let byte_len = file.metadata().ok().map(|m| m.len());
            let hint = path.extension().and_then(|e| e.to_str());
            let source = decode(BufReader::new(file), byte_len, hint, url)?;
            let total = source
                .total_duration()
                .or_else(|| tagged_duration(lofty::read_from_path(&path).ok()));
            sink.append(source);
            total
        }
        Location::Remote(remote) => {
            debug!(url = %remote, "opening remote source");
            let bytes = cache.get_or_fetch(&remote, fetch_timeout)?;
            let byte_len = Some(bytes.len() as u64);
            let source = decode(Cursor::new(bytes.clone()), byte_len, None, url)?;
            let total = source
                .total_duration()
                .or_else(|| tagged_duration(read_tagged_bytes(&bytes)));
            sink.append(source);
            total
        }
    };
    Ok(total)
}

/// Build a seekable decoder. Knowing the byte length lets formats without a
/// frame count (MP3) report a total duration.
fn decode<R>(
    reader: R,
    byte_len: Option<u64>,
    hint: Option<&str>,
    location: &str,
) -> Result<Decoder<R>, AudioError>
where
    R: Read + Seek + Send + Sync + 'static,
{
    let mut builder = Decoder::builder().with_data(reader).with_seekable(true);
    if let Some(len) = byte_len {
        builder = builder.with_byte_len(len);
    }
    if let Some(hint) = hint {
        builder = builder.with_hint(hint);
    }
    builder.build().map_err(|e| AudioError::Decode {
        location: location.to_string(),
        reason: e.to_string(),
    })
}

fn read_tagged_bytes(bytes: &[u8]) -> Option<TaggedFile> {
    Probe::new(Cursor::new(bytes))
        .guess_file_type()
        .ok()?
        .read()
        .ok()
}

fn tagged_duration(tagged: Option<TaggedFile>) -> Option<Duration> {
    tagged
        .map(|t| t.properties().duration())
        .filter(|d| !d.is_zero())
}

fn fetch(url: &str, timeout: Duration) -> Result<Vec<u8>, AudioError> {
    let fail = |reason: String| AudioError::Fetch {
        url: url.to_string(),
        reason,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| fail(e.to_string()))?;
    let response = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|e| fail(e.to_string()))?;
    let bytes = response.bytes().map_err(|e| fail(e.to_string()))?;
    Ok(bytes.to_vec())
}

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the audio resource.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    Device(String),

    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("failed to decode {location}: {reason}")]
    Decode { location: String, reason: String },

    #[error("seek failed: {0}")]
    Seek(String),

    #[error("no source assigned")]
    NoSource,

    #[error("audio thread is not running")]
    Disconnected,
}

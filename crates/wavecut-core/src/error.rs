//! Error types for wavecut-core.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for wavecut-core operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Background {0} thread panicked")]
    ThreadPanicked(&'static str),

    #[error("Handle already consumed")]
    HandleConsumed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Classify a decoder error raised while opening `path`.
    ///
    /// Malformed or unsupported headers become [`Error::UnsupportedFormat`];
    /// I/O failures stay I/O failures.
    pub(crate) fn from_decoder(path: &std::path::Path, err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => Error::Io(e),
            hound::Error::FormatError(msg) => {
                Error::UnsupportedFormat(format!("{}: {}", path.display(), msg))
            }
            hound::Error::Unsupported => Error::UnsupportedFormat(format!(
                "{}: unsupported WAV encoding",
                path.display()
            )),
            other => Error::Wav(other),
        }
    }
}

//! Error types for wavecut-timeline.

use std::time::Duration;
use thiserror::Error;

/// Error type for timeline operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid cut position {position:?} (timeline is {total:?} long)")]
    InvalidPosition { position: Duration, total: Duration },

    #[error("Timeline duration must be non-zero")]
    EmptyDuration,

    #[error("Cannot delete the last remaining cut")]
    LastCutProtected,

    #[error("Cut index {index} out of range ({len} cuts)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Cue sheet line {line}: {message}")]
    CueSheet { line: usize, message: String },
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

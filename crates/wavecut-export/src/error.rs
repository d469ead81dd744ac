//! Error types for wavecut-export

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Export error type
#[derive(Error, Debug)]
pub enum ExportError {
    /// Export requested with no selected cuts
    #[error("No cuts selected for export")]
    NothingSelected,

    /// Output directory cannot be used
    #[error("Invalid destination {}: {reason}", path.display())]
    InvalidDestination { path: PathBuf, reason: String },

    /// Invalid export settings
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Reading the source failed
    #[error("Source error: {0}")]
    Source(#[from] wavecut_core::Error),

    /// A single cut failed; the rest of the batch was abandoned
    #[error("Failed to export cut '{name}': {source}")]
    Cut {
        name: String,
        #[source]
        source: Box<ExportError>,
    },

    /// Resampling error
    #[error("Resampling error: {0}")]
    Resample(String),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Export thread panicked")]
    ThreadPanicked,

    #[error("Export handle already consumed")]
    HandleConsumed,
}

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

impl ExportError {
    pub(crate) fn in_cut(self, name: &str) -> Self {
        ExportError::Cut {
            name: name.to_string(),
            source: Box::new(self),
        }
    }
}

impl From<hound::Error> for ExportError {
    fn from(e: hound::Error) -> Self {
        match e {
            hound::Error::IoError(e) => ExportError::Io(e),
            other => ExportError::Io(io::Error::other(other)),
        }
    }
}

impl From<rubato::ResamplerConstructionError> for ExportError {
    fn from(e: rubato::ResamplerConstructionError) -> Self {
        ExportError::Resample(e.to_string())
    }
}

impl From<rubato::ResampleError> for ExportError {
    fn from(e: rubato::ResampleError) -> Self {
        ExportError::Resample(e.to_string())
    }
}

//! Centralized error type for the wavecut umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] wavecut_core::Error),

    #[error("Timeline: {0}")]
    Timeline(#[from] wavecut_timeline::Error),

    #[error("Export: {0}")]
    Export(#[from] wavecut_export::ExportError),

    #[error("No audio file loaded")]
    NoAudioLoaded,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

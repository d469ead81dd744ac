//! # Wavecut - WAV cutting core
//!
//! Splits one long WAV recording into many tracks.
//!
//! ## Architecture
//!
//! Wavecut is an umbrella crate that coordinates:
//! - **wavecut-core** - WAV source, background loading, config, playback transport
//! - **wavecut-analysis** - Peak decimation and the scrolling playback window
//! - **wavecut-timeline** - Cut list editing, colors, timestamps, cue sheets
//! - **wavecut-export** - Per-cut WAV export, original format or converted
//!
//! [`Session`] ties them together for one open file.
//!
//! ## Quick Start
//!
//! ```ignore
//! use wavecut::prelude::*;
//!
//! let mut session = Session::new(WavecutConfig::default())?;
//! session.open("concert.wav")?;
//!
//! session.split_at(Duration::from_secs(240))?;
//! session.rename_cut(1, "Encore")?;
//!
//! let settings = ExportSettings::converted(48000, 24)?;
//! println!("{}", session.export_summary(&settings)?.describe());
//!
//! let handle = session.start_export(session.default_output_dir()?, settings)?;
//! let tracks = handle.wait()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `cue` (default) - Cue sheet import/export on [`Session`]

/// Re-export of wavecut-core for direct access
pub use wavecut_core as core;

/// Peak decimation and the playback window
pub use wavecut_analysis as analysis;

/// Cut list editing
pub use wavecut_timeline as timeline;

/// Track export
pub use wavecut_export as export;

pub use wavecut_core::{
    AudioMetadata, LoadHandle, LoadStatus, LoadedAudio, PlaybackEvent, PlaybackFacade,
    PlaybackState, SampleKind, Transport, WavSource, WavecutConfig, WavecutConfigBuilder,
};

pub use wavecut_analysis::{decimate, PeakColumn, WindowedView};

pub use wavecut_timeline::{Cut, CutTimeline, DeletePolicy, Rgb};

pub use wavecut_export::{
    BitDepth, CutExporter, ExportHandle, ExportSettings, ExportStatus, ExportSummary,
    ExportedTrack, OutputFormat, ResampleQuality,
};

mod error;
mod session;

pub use error::{Error, Result};
pub use session::Session;

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{Error, Result, Session};

    pub use crate::core::{LoadHandle, LoadStatus, PlaybackFacade, PlaybackState, WavecutConfig};

    pub use crate::timeline::{Cut, CutTimeline, DeletePolicy};

    pub use crate::export::{BitDepth, ExportSettings, ExportStatus, ExportSummary, ExportedTrack};

    pub use std::time::Duration;
}

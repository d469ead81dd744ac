//! # wavecut-export
//!
//! Writes the selected cuts of a source file as individual WAV tracks.
//!
//! - **Original format**: the cut's bytes are copied unchanged, in
//!   frame-aligned chunks, under the source's own header fields.
//! - **Converted**: samples are decoded, resampled with `rubato` when the
//!   rate changes, clamped and requantized to 8, 16 or 24-bit integer or
//!   32-bit float.
//!
//! ```ignore
//! let tracks = export_cuts(
//!     timeline.cuts(),
//!     &source,
//!     &default_output_dir(source.path(), "tracks"),
//!     &ExportSettings::original(),
//!     4096,
//!     |pct| println!("{pct}%"),
//! )?;
//! ```

pub mod dsp;
pub mod error;
mod exporter;
pub mod format;
mod handle;
mod options;
mod summary;

pub use dsp::ResampleQuality;
pub use error::{ExportError, Result};
pub use exporter::{export_cuts, CutExporter, ExportedTrack};
pub use handle::{ExportHandle, ExportStatus};
pub use options::{BitDepth, ExportSettings, OutputFormat};
pub use summary::{default_output_dir, ExportSummary};

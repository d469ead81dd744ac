//! Waveform analysis for wavecut.
//!
//! - [`decimate`]: reduce a sample series to a target length, keeping the
//!   signed peak of each block so transients survive.
//! - [`peak_range_for_pixel`]: min/max under one display column.
//! - [`WindowedView`]: a fixed-length slice of the display series that
//!   follows the playhead and only re-slices on block boundaries or jumps.

pub mod decimate;
pub mod window;

pub use decimate::{column_peaks, decimate, overview_target_len, peak_range_for_pixel, PeakColumn};
pub use window::WindowedView;

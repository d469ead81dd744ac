//! DSP utilities for audio export.

mod quantize;
mod resample;

pub(crate) use quantize::{float_to_i16, float_to_i24, float_to_u8};
pub use resample::{ChunkResampler, ResampleQuality};

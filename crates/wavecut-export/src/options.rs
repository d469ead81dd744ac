//! Export settings.

use crate::dsp::ResampleQuality;
use crate::error::{ExportError, Result};
use std::time::Duration;
use wavecut_core::{AudioMetadata, SampleKind};

/// Bit depth of a converted export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitDepth {
    /// Unsigned 8-bit PCM
    Int8,
    #[default]
    Int16,
    Int24,
    Float32,
}

impl BitDepth {
    /// Bits per sample.
    pub fn bits(&self) -> u16 {
        match self {
            BitDepth::Int8 => 8,
            BitDepth::Int16 => 16,
            BitDepth::Int24 => 24,
            BitDepth::Float32 => 32,
        }
    }

    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            8 => Some(BitDepth::Int8),
            16 => Some(BitDepth::Int16),
            24 => Some(BitDepth::Int24),
            32 => Some(BitDepth::Float32),
            _ => None,
        }
    }

    pub fn bytes_per_sample(&self) -> u64 {
        self.bits() as u64 / 8
    }

    /// Whether samples stored this way need no conversion.
    pub fn matches(&self, metadata: &AudioMetadata) -> bool {
        let kind = match self {
            BitDepth::Float32 => SampleKind::Float,
            _ => SampleKind::Int,
        };
        metadata.bits_per_sample == self.bits() && metadata.sample_kind == kind
    }
}

/// How a cut is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Source bytes copied unchanged.
    Original,
    /// Decoded, resampled if needed and requantized.
    Converted { sample_rate: u32, bit_depth: BitDepth },
}

/// Export settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    /// Copy source bytes; the rate and depth below are ignored.
    pub use_original_format: bool,
    /// Target sample rate in Hz.
    pub sample_rate: u32,
    pub bit_depth: BitDepth,
    pub resample_quality: ResampleQuality,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            use_original_format: true,
            sample_rate: 44100,
            bit_depth: BitDepth::Int16,
            resample_quality: ResampleQuality::Medium,
        }
    }
}

impl ExportSettings {
    /// Keep the source format.
    pub fn original() -> Self {
        Self::default()
    }

    /// Convert to `sample_rate` at `bits_per_sample` (8, 16, 24 or 32).
    pub fn converted(sample_rate: u32, bits_per_sample: u16) -> Result<Self> {
        let bit_depth = BitDepth::from_bits(bits_per_sample).ok_or_else(|| {
            ExportError::InvalidOptions(format!(
                "unsupported bit depth {bits_per_sample} (8, 16, 24 or 32)"
            ))
        })?;
        let settings = Self {
            use_original_format: false,
            sample_rate,
            bit_depth,
            ..Self::default()
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn resample_quality(mut self, quality: ResampleQuality) -> Self {
        self.resample_quality = quality;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.use_original_format && !(8000..=384_000).contains(&self.sample_rate) {
            return Err(ExportError::InvalidOptions(format!(
                "sample_rate {} out of range (8000-384000 Hz)",
                self.sample_rate
            )));
        }
        Ok(())
    }

    /// Resolve against the source: a conversion to the source's own rate
    /// and depth is a copy.
    pub fn output_format(&self, source: &AudioMetadata) -> OutputFormat {
        if self.use_original_format
            || (self.sample_rate == source.sample_rate && self.bit_depth.matches(source))
        {
            OutputFormat::Original
        } else {
            OutputFormat::Converted {
                sample_rate: self.sample_rate,
                bit_depth: self.bit_depth,
            }
        }
    }

    /// Data bytes written for a cut of `length`.
    pub fn track_bytes(&self, source: &AudioMetadata, length: Duration) -> u64 {
        match self.output_format(source) {
            OutputFormat::Original => original_byte_budget(source, length),
            OutputFormat::Converted {
                sample_rate,
                bit_depth,
            } => {
                let frames = (length.as_secs_f64() * sample_rate as f64) as u64;
                frames * source.channels as u64 * bit_depth.bytes_per_sample()
            }
        }
    }
}

/// `floor(seconds * bytes_per_second)`, rounded down to a whole frame.
pub(crate) fn original_byte_budget(source: &AudioMetadata, length: Duration) -> u64 {
    let bytes = (length.as_secs_f64() * source.bytes_per_second() as f64) as u64;
    let align = source.block_align() as u64;
    bytes - bytes % align
}

//! Decoded audio and its format description.

use std::time::Duration;

/// Storage of a sample in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    Int,
    Float,
}

/// Format of a source file: rate, channels, bit depth and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioMetadata {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    pub sample_kind: SampleKind,
    /// Length in frames (one sample per channel).
    pub frames: u64,
}

impl AudioMetadata {
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames as f64 / self.sample_rate as f64)
    }

    pub fn bytes_per_sample(&self) -> u32 {
        (self.bits_per_sample as u32).div_ceil(8)
    }

    /// Bytes per interleaved frame.
    pub fn block_align(&self) -> u32 {
        self.bytes_per_sample() * self.channels as u32
    }

    pub fn bytes_per_second(&self) -> u64 {
        self.sample_rate as u64 * self.block_align() as u64
    }

    /// Whole frames spanned by `length` at this rate, rounded down.
    pub fn frames_in(&self, length: Duration) -> u64 {
        (length.as_secs_f64() * self.sample_rate as f64) as u64
    }
}

/// Interleaved, normalized samples in [-1.0, 1.0].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl SampleBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }
}

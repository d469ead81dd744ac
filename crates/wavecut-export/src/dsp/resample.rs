//! Audio resampling using rubato
//!
//! Streams interleaved audio of any channel count through a fixed-input
//! FFT resampler, buffering input until a full chunk is available.

use crate::error::Result;
use rubato::{FftFixedIn, Resampler};

/// Resampling quality presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleQuality {
    /// Fast resampling (lower quality)
    Fast,
    /// Balanced quality/speed (default)
    #[default]
    Medium,
    /// High quality
    High,
    /// Best quality (slowest)
    Best,
}

impl ResampleQuality {
    fn chunk_size(&self) -> usize {
        match self {
            ResampleQuality::Fast => 512,
            ResampleQuality::Medium => 1024,
            ResampleQuality::High => 2048,
            ResampleQuality::Best => 4096,
        }
    }

    fn sub_chunks(&self) -> usize {
        match self {
            ResampleQuality::Fast => 1,
            ResampleQuality::Medium => 2,
            ResampleQuality::High => 4,
            ResampleQuality::Best => 8,
        }
    }
}

/// Streaming sample rate converter for interleaved audio.
///
/// The resampler's own latency is trimmed from the front of the output, so
/// output frame `n` lines up with input time `n / target_rate`.
pub struct ChunkResampler {
    resampler: FftFixedIn<f32>,
    channels: usize,
    /// Per-channel input waiting for a full chunk.
    pending: Vec<Vec<f32>>,
    /// Leading output frames still to discard.
    delay: usize,
}

impl ChunkResampler {
    pub fn new(
        channels: usize,
        source_rate: u32,
        target_rate: u32,
        quality: ResampleQuality,
    ) -> Result<Self> {
        let resampler = FftFixedIn::<f32>::new(
            source_rate as usize,
            target_rate as usize,
            quality.chunk_size(),
            quality.sub_chunks(),
            channels,
        )?;
        let delay = resampler.output_delay();
        Ok(Self {
            resampler,
            channels,
            pending: vec![Vec::with_capacity(quality.chunk_size()); channels],
            delay,
        })
    }

    /// Output frames of latency removed from the start of the stream.
    pub fn output_delay(&self) -> usize {
        self.resampler.output_delay()
    }

    /// Feed interleaved input; converted output is appended to `out`.
    pub fn push_interleaved(&mut self, input: &[f32], out: &mut Vec<f32>) -> Result<()> {
        for frame in input.chunks_exact(self.channels) {
            for (ch, &sample) in frame.iter().enumerate() {
                self.pending[ch].push(sample);
            }
        }

        loop {
            let needed = self.resampler.input_frames_next();
            if self.pending[0].len() < needed {
                return Ok(());
            }
            let chunk: Vec<Vec<f32>> = self
                .pending
                .iter_mut()
                .map(|ch| ch.drain(..needed).collect())
                .collect();
            self.process(&chunk, out)?;
        }
    }

    /// Pad buffered input with silence and convert it, pushing out the
    /// resampler's delay line. May be called repeatedly at end of input.
    pub fn flush(&mut self, out: &mut Vec<f32>) -> Result<()> {
        let needed = self.resampler.input_frames_next();
        let chunk: Vec<Vec<f32>> = self
            .pending
            .iter_mut()
            .map(|ch| {
                let mut block: Vec<f32> = ch.drain(..).collect();
                block.resize(needed, 0.0);
                block
            })
            .collect();
        self.process(&chunk, out)
    }

    fn process(&mut self, chunk: &[Vec<f32>], out: &mut Vec<f32>) -> Result<()> {
        let output = self.resampler.process(chunk, None)?;
        let frames = output.first().map_or(0, |ch| ch.len());
        let skip = self.delay.min(frames);
        self.delay -= skip;

        out.reserve((frames - skip) * self.channels);
        for i in skip..frames {
            for ch in &output {
                out.push(ch[i]);
            }
        }
        Ok(())
    }
}

//! Whole-file loading with a coarse display series.

use crate::audio::{AudioMetadata, SampleBuffer};
use crate::source::WavSource;
use crate::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

const READ_CHUNK: usize = 16 * 1024;

/// A fully decoded file plus its display series.
#[derive(Debug, Clone)]
pub struct LoadedAudio {
    pub source: WavSource,
    pub samples: SampleBuffer,
    /// Interleaved `(max, min)` pairs, one pair per display block.
    pub display: Arc<[f32]>,
}

impl LoadedAudio {
    pub fn metadata(&self) -> AudioMetadata {
        self.source.metadata()
    }

    pub fn duration(&self) -> Duration {
        self.source.duration()
    }
}

/// Folds an interleaved stream into per-block `(max, min)` pairs.
///
/// Both accumulators start at zero, so an all-positive block reports a
/// minimum of 0.0. A trailing partial block is emitted by [`finish`].
///
/// [`finish`]: DisplayAccumulator::finish
#[derive(Debug)]
pub struct DisplayAccumulator {
    block: usize,
    filled: usize,
    max: f32,
    min: f32,
    out: Vec<f32>,
}

impl DisplayAccumulator {
    pub fn new(metadata: &AudioMetadata, display_rate: u32) -> Self {
        let per_second = metadata.sample_rate as usize * metadata.channels as usize;
        let block = (per_second / display_rate.max(1) as usize).max(1);
        let expected = (metadata.frames as usize * metadata.channels as usize) / block * 2 + 2;
        Self {
            block,
            filled: 0,
            max: 0.0,
            min: 0.0,
            out: Vec::with_capacity(expected),
        }
    }

    /// Samples folded into each pair.
    pub fn block_size(&self) -> usize {
        self.block
    }

    pub fn push(&mut self, samples: &[f32]) {
        for &s in samples {
            self.max = self.max.max(s);
            self.min = self.min.min(s);
            self.filled += 1;
            if self.filled == self.block {
                self.flush();
            }
        }
    }

    pub fn finish(mut self) -> Vec<f32> {
        if self.filled > 0 {
            self.flush();
        }
        self.out
    }

    fn flush(&mut self) {
        self.out.push(self.max);
        self.out.push(self.min);
        self.max = 0.0;
        self.min = 0.0;
        self.filled = 0;
    }
}

/// Decode `path` completely, reporting progress in percent.
///
/// Progress goes 0, then 10 once the header is read, then up to 99 while
/// samples are read, then 100.
pub fn load_with_progress(
    path: impl AsRef<Path>,
    display_rate: u32,
    mut on_progress: impl FnMut(u8),
) -> Result<LoadedAudio> {
    on_progress(0);
    let source = WavSource::open(path)?;
    let metadata = source.metadata();
    on_progress(10);

    let total = metadata.frames as usize * metadata.channels as usize;
    let mut reader = source.reader()?;
    let mut samples = Vec::with_capacity(total);
    let mut display = DisplayAccumulator::new(&metadata, display_rate);
    let mut last_reported = 10u8;

    loop {
        let start = samples.len();
        let read = reader.read_samples(READ_CHUNK, &mut samples)?;
        if read == 0 {
            break;
        }
        display.push(&samples[start..]);

        if total > 0 {
            let pct = (10 + samples.len() * 90 / total).min(99) as u8;
            if pct != last_reported {
                last_reported = pct;
                on_progress(pct);
            }
        }
    }

    let block = display.block_size();
    let display_series: Arc<[f32]> = display.finish().into();
    tracing::info!(
        path = %source.path().display(),
        samples = samples.len(),
        display_points = display_series.len(),
        block,
        "loaded source"
    );
    on_progress(100);

    Ok(LoadedAudio {
        samples: SampleBuffer::new(samples, metadata.sample_rate, metadata.channels),
        source,
        display: display_series,
    })
}

/// Decode `path` completely.
pub fn load(path: impl AsRef<Path>, display_rate: u32) -> Result<LoadedAudio> {
    load_with_progress(path, display_rate, |_| {})
}

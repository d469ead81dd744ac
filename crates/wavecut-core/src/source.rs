//! Source audio service over `hound`.
//!
//! A [`WavSource`] validates a file once and then hands out independent
//! [`SourceReader`]s, so the loader, the exporter and any playback backend
//! can each hold their own read position.

use crate::audio::{AudioMetadata, SampleKind};
use crate::{Error, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// An opened WAV file and its format.
#[derive(Debug, Clone)]
pub struct WavSource {
    path: PathBuf,
    metadata: AudioMetadata,
}

impl WavSource {
    /// Open a WAV file and read its header.
    ///
    /// Fails with [`Error::FileNotFound`] when the path does not exist and
    /// with [`Error::UnsupportedFormat`] when the file is not a PCM or float
    /// WAV file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let is_wav = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"));
        if !is_wav {
            return Err(Error::UnsupportedFormat(format!(
                "{}: only .wav files are supported",
                path.display()
            )));
        }

        let reader = hound::WavReader::open(path).map_err(|e| Error::from_decoder(path, e))?;
        let metadata = metadata_from(&reader)?;

        tracing::info!(
            path = %path.display(),
            sample_rate = metadata.sample_rate,
            channels = metadata.channels,
            bits = metadata.bits_per_sample,
            frames = metadata.frames,
            "opened source"
        );

        Ok(Self {
            path: path.to_path_buf(),
            metadata,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata(&self) -> AudioMetadata {
        self.metadata
    }

    pub fn duration(&self) -> Duration {
        self.metadata.duration()
    }

    /// Open an independent read handle positioned at the start.
    pub fn reader(&self) -> Result<SourceReader> {
        let inner =
            hound::WavReader::open(&self.path).map_err(|e| Error::from_decoder(&self.path, e))?;
        Ok(SourceReader {
            inner,
            metadata: self.metadata,
        })
    }

    /// Read up to `count` normalized interleaved samples starting at `start`.
    pub fn read_samples(&self, start: Duration, count: usize) -> Result<Vec<f32>> {
        let mut reader = self.reader()?;
        reader.seek(start)?;
        let mut out = Vec::with_capacity(count);
        reader.read_samples(count, &mut out)?;
        Ok(out)
    }
}

fn metadata_from<R: std::io::Read>(reader: &hound::WavReader<R>) -> Result<AudioMetadata> {
    let spec = reader.spec();
    if spec.channels == 0 || spec.sample_rate == 0 {
        return Err(Error::UnsupportedFormat(format!(
            "{} channels at {} Hz",
            spec.channels, spec.sample_rate
        )));
    }
    let sample_kind = match spec.sample_format {
        hound::SampleFormat::Int => SampleKind::Int,
        hound::SampleFormat::Float => SampleKind::Float,
    };
    if sample_kind == SampleKind::Float && spec.bits_per_sample != 32 {
        return Err(Error::UnsupportedFormat(format!(
            "{}-bit float samples",
            spec.bits_per_sample
        )));
    }
    Ok(AudioMetadata {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        bits_per_sample: spec.bits_per_sample,
        sample_kind,
        frames: reader.duration() as u64,
    })
}

/// Samples in their stored representation, for bit-exact copies.
#[derive(Debug, Clone, PartialEq)]
pub enum RawSamples {
    Int(Vec<i32>),
    Float(Vec<f32>),
}

impl RawSamples {
    pub fn for_kind(kind: SampleKind) -> Self {
        match kind {
            SampleKind::Int => RawSamples::Int(Vec::new()),
            SampleKind::Float => RawSamples::Float(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RawSamples::Int(v) => v.len(),
            RawSamples::Float(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn truncate(&mut self, len: usize) {
        match self {
            RawSamples::Int(v) => v.truncate(len),
            RawSamples::Float(v) => v.truncate(len),
        }
    }
}

/// A read position into a [`WavSource`].
pub struct SourceReader {
    inner: hound::WavReader<BufReader<File>>,
    metadata: AudioMetadata,
}

impl SourceReader {
    pub fn metadata(&self) -> AudioMetadata {
        self.metadata
    }

    /// Move to the frame at `offset`, clamped to the end of the file.
    pub fn seek(&mut self, offset: Duration) -> Result<()> {
        let frame = self.metadata.frames_in(offset).min(self.metadata.frames);
        self.inner.seek(frame as u32)?;
        Ok(())
    }

    /// Append up to `count` normalized samples to `out`.
    ///
    /// Returns the number of samples appended; zero means end of file.
    pub fn read_samples(&mut self, count: usize, out: &mut Vec<f32>) -> Result<usize> {
        let before = out.len();
        match self.metadata.sample_kind {
            SampleKind::Float => {
                for sample in self.inner.samples::<f32>().take(count) {
                    out.push(sample?);
                }
            }
            SampleKind::Int => {
                let scale = 1.0 / (1i64 << (self.metadata.bits_per_sample - 1)) as f32;
                for sample in self.inner.samples::<i32>().take(count) {
                    out.push(sample? as f32 * scale);
                }
            }
        }
        Ok(out.len() - before)
    }

    /// Replace the contents of `out` with up to `count` stored samples.
    ///
    /// Returns the number of samples read; zero means end of file.
    pub fn read_raw(&mut self, count: usize, out: &mut RawSamples) -> Result<usize> {
        match (self.metadata.sample_kind, &mut *out) {
            (SampleKind::Int, RawSamples::Int(buf)) => {
                buf.clear();
                for sample in self.inner.samples::<i32>().take(count) {
                    buf.push(sample?);
                }
            }
            (SampleKind::Float, RawSamples::Float(buf)) => {
                buf.clear();
                for sample in self.inner.samples::<f32>().take(count) {
                    buf.push(sample?);
                }
            }
            (kind, _) => {
                *out = RawSamples::for_kind(kind);
                return self.read_raw(count, out);
            }
        }
        Ok(out.len())
    }
}

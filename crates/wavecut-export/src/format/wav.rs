//! WAV track writer using hound
//!
//! Writes either converted float samples at 8, 16 or 24-bit integer or
//! 32-bit float, or raw source samples under the source's own spec.

use crate::dsp::{float_to_i16, float_to_i24, float_to_u8};
use crate::error::{ExportError, Result};
use crate::options::BitDepth;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use wavecut_core::{AudioMetadata, RawSamples, SampleKind};

/// WAV encoder configuration
#[derive(Debug, Clone)]
pub struct WavConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bit depth
    pub bit_depth: BitDepth,
    /// Number of channels
    pub channels: u16,
}

/// Create hound WavSpec from our config
fn create_wav_spec(config: &WavConfig) -> WavSpec {
    let sample_format = match config.bit_depth {
        BitDepth::Float32 => SampleFormat::Float,
        _ => SampleFormat::Int,
    };

    WavSpec {
        channels: config.channels,
        sample_rate: config.sample_rate,
        bits_per_sample: config.bit_depth.bits(),
        sample_format,
    }
}

/// Spec identical to the source file's
fn source_wav_spec(metadata: &AudioMetadata) -> WavSpec {
    WavSpec {
        channels: metadata.channels,
        sample_rate: metadata.sample_rate,
        bits_per_sample: metadata.bits_per_sample,
        sample_format: match metadata.sample_kind {
            SampleKind::Int => SampleFormat::Int,
            SampleKind::Float => SampleFormat::Float,
        },
    }
}

enum Encoding {
    Converted(BitDepth),
    Raw,
}

/// One output track file.
pub struct TrackWriter {
    writer: WavWriter<BufWriter<File>>,
    encoding: Encoding,
}

impl TrackWriter {
    /// Writer for float samples quantized per `config`.
    pub fn converted(path: &Path, config: &WavConfig) -> Result<Self> {
        Ok(Self {
            writer: WavWriter::create(path, create_wav_spec(config))?,
            encoding: Encoding::Converted(config.bit_depth),
        })
    }

    /// Writer for raw samples in the source's own format.
    pub fn original(path: &Path, metadata: &AudioMetadata) -> Result<Self> {
        Ok(Self {
            writer: WavWriter::create(path, source_wav_spec(metadata))?,
            encoding: Encoding::Raw,
        })
    }

    /// Write interleaved float samples, clamped and quantized.
    pub fn write_converted(&mut self, samples: &[f32]) -> Result<()> {
        let Encoding::Converted(depth) = self.encoding else {
            return Err(ExportError::InvalidOptions(
                "converted samples written to an original-format track".to_string(),
            ));
        };
        match depth {
            BitDepth::Int8 => {
                for &s in samples {
                    // hound stores 8-bit as unsigned, offsetting signed input by 128
                    let stored = float_to_u8(s) as i16 - 128;
                    self.writer.write_sample(stored as i8)?;
                }
            }
            BitDepth::Int16 => {
                for &s in samples {
                    self.writer.write_sample(float_to_i16(s))?;
                }
            }
            BitDepth::Int24 => {
                for &s in samples {
                    self.writer.write_sample(float_to_i24(s))?;
                }
            }
            BitDepth::Float32 => {
                for &s in samples {
                    self.writer.write_sample(s)?;
                }
            }
        }
        Ok(())
    }

    /// Write samples exactly as read from the source.
    pub fn write_raw(&mut self, samples: &RawSamples) -> Result<()> {
        match samples {
            RawSamples::Int(values) => {
                for &v in values {
                    self.writer.write_sample(v)?;
                }
            }
            RawSamples::Float(values) => {
                for &v in values {
                    self.writer.write_sample(v)?;
                }
            }
        }
        Ok(())
    }

    /// Patch the header sizes and close the file.
    pub fn finalize(self) -> Result<()> {
        self.writer.finalize()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_chunk(bytes: &[u8]) -> &[u8] {
        let at = bytes
            .windows(4)
            .position(|w| w == b"data")
            .expect("data chunk");
        &bytes[at + 8..]
    }

    #[test]
    fn test_24_bit_little_endian() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let config = WavConfig {
            sample_rate: 8000,
            bit_depth: BitDepth::Int24,
            channels: 1,
        };
        let mut writer = TrackWriter::converted(&path, &config).unwrap();
        writer.write_converted(&[0.5, -1.0]).unwrap();
        writer.finalize().unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // 0.5 -> 4194303 = 0x3FFFFF, -1.0 -> -8388607 = 0x800001
        assert_eq!(data_chunk(&bytes), &[0xFF, 0xFF, 0x3F, 0x01, 0x00, 0x80]);
    }

    #[test]
    fn test_8_bit_unsigned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let config = WavConfig {
            sample_rate: 8000,
            bit_depth: BitDepth::Int8,
            channels: 1,
        };
        let mut writer = TrackWriter::converted(&path, &config).unwrap();
        writer.write_converted(&[-1.0, 0.0, 1.0, 3.0]).unwrap();
        writer.finalize().unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(data_chunk(&bytes), &[0, 127, 255, 255]);
    }

    #[test]
    fn test_raw_samples_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let meta = AudioMetadata {
            sample_rate: 22050,
            channels: 2,
            bits_per_sample: 16,
            sample_kind: SampleKind::Int,
            frames: 2,
        };
        let mut writer = TrackWriter::original(&path, &meta).unwrap();
        writer
            .write_raw(&RawSamples::Int(vec![1, -1, 256, -32768]))
            .unwrap();
        writer.finalize().unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(
            data_chunk(&bytes),
            &[0x01, 0x00, 0xFF, 0xFF, 0x00, 0x01, 0x00, 0x80]
        );
        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 22050);
        assert_eq!(reader.spec().channels, 2);
    }
}

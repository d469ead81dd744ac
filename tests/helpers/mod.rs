//! Test helpers and fixtures for wavecut integration tests
//!
//! Fixtures are small WAV files written with hound into a temp directory
//! that lives as long as the returned [`Fixture`].

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temp directory holding one source file.
pub struct Fixture {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl Fixture {
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

/// Generate one channel of a sine wave.
pub fn generate_sine(frequency: f64, sample_rate: u32, frames: usize) -> Vec<f32> {
    (0..frames)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            (2.0 * std::f64::consts::PI * frequency * t).sin() as f32 * 0.5
        })
        .collect()
}

/// 16-bit sine, same signal on every channel.
pub fn sine_fixture(name: &str, seconds: f64, sample_rate: u32, channels: u16) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    let frames = (seconds * sample_rate as f64) as usize;
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for s in generate_sine(440.0, sample_rate, frames) {
        let v = (s * i16::MAX as f32) as i16;
        for _ in 0..channels {
            writer.write_sample(v).unwrap();
        }
    }
    writer.finalize().unwrap();
    Fixture { dir, path }
}

/// 16-bit stereo where left holds the frame index (mod 2^15) and right its
/// negation, so copied samples can be traced back to their source frame.
pub fn ramp_fixture(name: &str, frames: usize, sample_rate: u32) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for i in 0..frames {
        let v = (i % 32768) as i16;
        writer.write_sample(v).unwrap();
        writer.write_sample(-v).unwrap();
    }
    writer.finalize().unwrap();
    Fixture { dir, path }
}

/// All samples of a 16-bit file.
pub fn read_i16(path: &Path) -> (hound::WavSpec, Vec<i16>) {
    let mut reader = hound::WavReader::open(path).unwrap();
    let spec = reader.spec();
    let samples = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    (spec, samples)
}

pub fn secs(s: f64) -> std::time::Duration {
    std::time::Duration::from_secs_f64(s)
}

/// Route library logs to the test output; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

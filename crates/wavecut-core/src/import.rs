//! Non-blocking file load with progress polling.

use crate::load::{load_with_progress, LoadedAudio};
use crate::{Error, Result};
use crossbeam_channel::Receiver;
use std::path::Path;
use std::sync::Arc;
use std::thread::JoinHandle;

#[derive(Debug)]
pub enum LoadStatus {
    /// Progress in percent, 0..=100.
    Running(u8),
    Complete(Arc<LoadedAudio>),
    Failed(Error),
    Pending,
}

/// Handle to a background file load.
/// Poll with [`progress()`](LoadHandle::progress) from the UI loop.
pub struct LoadHandle {
    progress_rx: Receiver<u8>,
    thread: Option<JoinHandle<Result<Arc<LoadedAudio>>>>,
    last_progress: Option<u8>,
}

impl LoadHandle {
    /// Start loading `path` on a dedicated thread.
    pub fn start(path: impl AsRef<Path>, display_rate: u32) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let (tx, rx) = crossbeam_channel::bounded(64);

        let thread = std::thread::Builder::new()
            .name("wavecut-load".into())
            .spawn(move || {
                let loaded = load_with_progress(&path, display_rate, |p| {
                    let _ = tx.try_send(p);
                })?;
                Ok(Arc::new(loaded))
            })?;

        Ok(Self {
            progress_rx: rx,
            thread: Some(thread),
            last_progress: None,
        })
    }

    /// Poll for the latest load progress (non-blocking).
    pub fn progress(&mut self) -> LoadStatus {
        while let Ok(p) = self.progress_rx.try_recv() {
            self.last_progress = Some(p);
        }

        match self.thread.take() {
            Some(thread) if thread.is_finished() => {
                return match thread.join() {
                    Ok(Ok(loaded)) => LoadStatus::Complete(loaded),
                    Ok(Err(e)) => LoadStatus::Failed(e),
                    Err(_) => LoadStatus::Failed(Error::ThreadPanicked("load")),
                };
            }
            Some(thread) => self.thread = Some(thread),
            None => return LoadStatus::Failed(Error::HandleConsumed),
        }

        match self.last_progress {
            Some(p) => LoadStatus::Running(p),
            None => LoadStatus::Pending,
        }
    }

    pub fn wait(mut self) -> Result<Arc<LoadedAudio>> {
        match self.thread.take() {
            Some(thread) => thread
                .join()
                .unwrap_or(Err(Error::ThreadPanicked("load"))),
            None => Err(Error::HandleConsumed),
        }
    }

    pub fn is_done(&self) -> bool {
        self.thread
            .as_ref()
            .map(|t| t.is_finished())
            .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn write_silence(path: &Path, frames: u32) {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for _ in 0..frames * 2 {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_wait_returns_loaded_audio() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("silence.wav");
        write_silence(&path, 22050);

        let handle = LoadHandle::start(&path, 4000).unwrap();
        let loaded = handle.wait().unwrap();
        assert_eq!(loaded.duration(), Duration::from_secs(1));
        assert_eq!(loaded.samples.channels(), 2);
    }

    #[test]
    fn test_progress_until_complete() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("silence.wav");
        write_silence(&path, 44100);

        let mut handle = LoadHandle::start(&path, 4000).unwrap();
        let loaded = loop {
            match handle.progress() {
                LoadStatus::Complete(loaded) => break loaded,
                LoadStatus::Failed(e) => panic!("load failed: {e}"),
                LoadStatus::Running(p) => assert!(p <= 100),
                LoadStatus::Pending => {}
            }
            std::thread::sleep(Duration::from_millis(1));
        };
        assert_eq!(loaded.samples.frames(), 44100);
        assert!(handle.is_done());
    }

    #[test]
    fn test_failed_load_reports_error() {
        let mut handle = LoadHandle::start("/nonexistent/wavecut.wav", 4000).unwrap();
        let status = loop {
            match handle.progress() {
                LoadStatus::Running(_) | LoadStatus::Pending => {
                    std::thread::sleep(Duration::from_millis(1))
                }
                other => break other,
            }
        };
        assert!(matches!(status, LoadStatus::Failed(Error::FileNotFound(_))));
    }
}

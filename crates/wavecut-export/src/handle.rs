//! Non-blocking export handle with progress polling.

use crate::error::{ExportError, Result};
use crate::exporter::ExportedTrack;
use crossbeam_channel::Receiver;
use std::thread::JoinHandle;

/// Status of a background export operation.
#[derive(Debug)]
pub enum ExportStatus {
    /// Export is in progress; percentage of cuts finished.
    Running(u8),
    /// Export completed successfully.
    Complete(Vec<ExportedTrack>),
    /// Export failed.
    Failed(ExportError),
    /// No progress yet (just started).
    Pending,
}

/// Handle to a background export operation.
///
/// Created by [`CutExporter::start()`](crate::CutExporter::start). Poll with
/// [`progress()`](ExportHandle::progress) each frame.
///
/// # Example
/// ```ignore
/// let mut export = CutExporter::new(source, "tracks")
///     .cuts(timeline.cuts())
///     .start()?;
///
/// loop {
///     match export.progress() {
///         ExportStatus::Running(p) => println!("{p}%"),
///         ExportStatus::Complete(tracks) => { println!("{} tracks", tracks.len()); break; }
///         ExportStatus::Failed(e) => { eprintln!("Error: {e}"); break; }
///         ExportStatus::Pending => {}
///     }
/// }
/// ```
pub struct ExportHandle {
    progress_rx: Receiver<u8>,
    thread: Option<JoinHandle<Result<Vec<ExportedTrack>>>>,
    last_progress: Option<u8>,
}

impl ExportHandle {
    pub(crate) fn new(
        progress_rx: Receiver<u8>,
        thread: JoinHandle<Result<Vec<ExportedTrack>>>,
    ) -> Self {
        Self {
            progress_rx,
            thread: Some(thread),
            last_progress: None,
        }
    }

    /// Poll for the latest export progress (non-blocking).
    ///
    /// Drains all pending progress messages and returns the latest one.
    /// Once the export thread has finished, returns `Complete` or `Failed`
    /// exactly once.
    pub fn progress(&mut self) -> ExportStatus {
        while let Ok(p) = self.progress_rx.try_recv() {
            self.last_progress = Some(p);
        }

        match self.thread.take() {
            Some(thread) if thread.is_finished() => {
                return match thread.join() {
                    Ok(Ok(tracks)) => ExportStatus::Complete(tracks),
                    Ok(Err(e)) => ExportStatus::Failed(e),
                    Err(_) => ExportStatus::Failed(ExportError::ThreadPanicked),
                };
            }
            Some(thread) => self.thread = Some(thread),
            None => return ExportStatus::Failed(ExportError::HandleConsumed),
        }

        match self.last_progress {
            Some(p) => ExportStatus::Running(p),
            None => ExportStatus::Pending,
        }
    }

    /// Block until the export finishes and return the result.
    pub fn wait(mut self) -> Result<Vec<ExportedTrack>> {
        match self.thread.take() {
            Some(thread) => thread.join().unwrap_or(Err(ExportError::ThreadPanicked)),
            None => Err(ExportError::HandleConsumed),
        }
    }

    /// Check if the export has finished (non-blocking).
    pub fn is_done(&self) -> bool {
        self.thread
            .as_ref()
            .map(|t| t.is_finished())
            .unwrap_or(true)
    }
}

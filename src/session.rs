//! Editing session: one loaded file and everything derived from it.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use wavecut_analysis::{column_peaks, decimate, overview_target_len, PeakColumn, WindowedView};
use wavecut_core::{
    load, LoadHandle, LoadedAudio, PlaybackFacade, PlaybackSubscriber, Transport, TransportUpdate,
    WavecutConfig,
};
use wavecut_export::{
    default_output_dir, CutExporter, ExportHandle, ExportSettings, ExportSummary, ExportedTrack,
};
use wavecut_timeline::CutTimeline;

/// Owns the loaded audio, its overview, the cut timeline, the playback
/// window and the transport, and keeps them in step.
///
/// # Example
/// ```ignore
/// let mut session = Session::new(WavecutConfig::default())?;
/// session.open("live-set.wav")?;
///
/// session.play();
/// session.advance(Duration::from_secs(95));
/// session.cut_at_cursor()?;
///
/// let tracks = session.export(session.default_output_dir()?, ExportSettings::original())?;
/// ```
pub struct Session {
    config: WavecutConfig,
    audio: Option<Arc<LoadedAudio>>,
    timeline: Option<CutTimeline>,
    overview: Vec<f32>,
    display_width: usize,
    window: WindowedView,
    transport: Transport,
    events: PlaybackSubscriber,
}

impl Session {
    pub fn new(config: WavecutConfig) -> Result<Self> {
        config.validate()?;
        let transport = Transport::new(Duration::ZERO, config.position_interval());
        let events = transport.subscribe();
        Ok(Self {
            window: WindowedView::new(config.window_length()),
            config,
            audio: None,
            timeline: None,
            overview: Vec::new(),
            display_width: 0,
            transport,
            events,
        })
    }

    pub fn config(&self) -> &WavecutConfig {
        &self.config
    }

    /// Load `path` on the calling thread and make it the current file.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let loaded = load(path, self.config.display_rate)?;
        self.attach(Arc::new(loaded))
    }

    /// Start loading `path` in the background; pass the result to
    /// [`attach`](Session::attach).
    pub fn start_open(&self, path: impl AsRef<Path>) -> Result<LoadHandle> {
        Ok(LoadHandle::start(path, self.config.display_rate)?)
    }

    /// Make `audio` the current file: seeds the timeline with one cut,
    /// rebuilds the overview, resets the window and rewinds the transport.
    pub fn attach(&mut self, audio: Arc<LoadedAudio>) -> Result<()> {
        let duration = audio.duration();
        let base_name = audio
            .source
            .path()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "track".to_string());

        let timeline = CutTimeline::new(base_name, duration)?;

        self.window
            .set_source(audio.display.clone(), duration, self.config.display_rate);
        self.transport.set_duration(duration);
        self.pump();

        self.timeline = Some(timeline);
        self.audio = Some(audio);
        self.rebuild_overview();

        tracing::info!(duration = ?duration, "session attached audio");
        Ok(())
    }

    /// Forget the current file.
    pub fn close(&mut self) {
        self.audio = None;
        self.timeline = None;
        self.overview.clear();
        self.window.clear();
        self.transport.set_duration(Duration::ZERO);
        self.events.poll();
    }

    pub fn audio(&self) -> Option<&LoadedAudio> {
        self.audio.as_deref()
    }

    fn loaded(&self) -> Result<&Arc<LoadedAudio>> {
        self.audio.as_ref().ok_or(Error::NoAudioLoaded)
    }

    pub fn duration(&self) -> Duration {
        self.transport.duration()
    }

    // Overview

    /// Overview series for the whole file.
    pub fn overview(&self) -> &[f32] {
        &self.overview
    }

    /// Resize the overview for a display `width` pixels wide.
    pub fn set_display_width(&mut self, width: usize) {
        if width != self.display_width {
            self.display_width = width;
            self.rebuild_overview();
        }
    }

    /// Min/max per column of the overview at `width` pixels.
    pub fn overview_columns(&self, width: usize) -> Vec<PeakColumn> {
        column_peaks(&self.overview, width)
    }

    fn rebuild_overview(&mut self) {
        let Some(audio) = &self.audio else {
            self.overview.clear();
            return;
        };
        let target = overview_target_len(
            audio.display.len(),
            self.display_width,
            self.config.max_display_points,
        );
        self.overview = decimate(&audio.display, target);
    }

    // Playback

    pub fn window(&self) -> &WindowedView {
        &self.window
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn position(&self) -> Duration {
        self.transport.position()
    }

    pub fn play(&mut self) {
        self.transport.play();
    }

    pub fn pause(&mut self) {
        self.transport.pause();
    }

    pub fn stop(&mut self) {
        self.transport.stop();
        self.window.seek(Duration::ZERO);
    }

    /// Move the playhead; a target outside the window re-slices it there.
    pub fn seek(&mut self, position: Duration) {
        self.transport.seek(position);
        self.window.seek(self.transport.position());
    }

    /// Advance the transport clock and route the result to the window.
    pub fn advance(&mut self, elapsed: Duration) -> TransportUpdate {
        self.transport.advance(elapsed);
        self.pump()
    }

    /// Drain pending transport events; the newest position moves the window.
    pub fn pump(&mut self) -> TransportUpdate {
        let update = self.events.poll();
        if let Some(position) = update.position {
            self.window.update_position(position);
        }
        update
    }

    // Timeline

    pub fn timeline(&self) -> Result<&CutTimeline> {
        self.timeline.as_ref().ok_or(Error::NoAudioLoaded)
    }

    pub fn timeline_mut(&mut self) -> Result<&mut CutTimeline> {
        self.timeline.as_mut().ok_or(Error::NoAudioLoaded)
    }

    /// Split at the playhead.
    pub fn cut_at_cursor(&mut self) -> Result<usize> {
        let position = self.transport.position();
        self.split_at(position)
    }

    pub fn split_at(&mut self, position: Duration) -> Result<usize> {
        Ok(self.timeline_mut()?.split(position)?)
    }

    pub fn delete_cut(&mut self, index: usize) -> Result<()> {
        self.timeline_mut()?.delete(index)?;
        Ok(())
    }

    pub fn rename_cut(&mut self, index: usize, name: &str) -> Result<bool> {
        Ok(self.timeline_mut()?.rename(index, name)?)
    }

    pub fn set_cut_selected(&mut self, index: usize, selected: bool) -> Result<()> {
        Ok(self.timeline_mut()?.set_selected(index, selected)?)
    }

    /// Seek to the start of cut `index`.
    pub fn seek_to_cut(&mut self, index: usize) -> Result<()> {
        let timeline = self.timeline()?;
        let start = timeline
            .get(index)
            .map(|c| c.start)
            .ok_or(wavecut_timeline::Error::IndexOutOfRange {
                index,
                len: timeline.len(),
            })?;
        self.seek(start);
        Ok(())
    }

    /// Import cut boundaries from cue sheet text.
    #[cfg(feature = "cue")]
    pub fn import_cue(&mut self, text: &str) -> Result<()> {
        Ok(self.timeline_mut()?.import_cue(text)?)
    }

    /// Cue sheet for the current cuts.
    #[cfg(feature = "cue")]
    pub fn export_cue(&self) -> Result<String> {
        let audio = self.loaded()?;
        let file_name = audio
            .source
            .path()
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(self.timeline()?.to_cue(&file_name))
    }

    // Export

    /// `<source dir>/<tracks_dir_name>`
    pub fn default_output_dir(&self) -> Result<PathBuf> {
        let audio = self.loaded()?;
        Ok(default_output_dir(
            audio.source.path(),
            &self.config.tracks_dir_name,
        ))
    }

    pub fn export_summary(&self, settings: &ExportSettings) -> Result<ExportSummary> {
        let audio = self.loaded()?;
        Ok(ExportSummary::new(
            self.timeline()?.cuts(),
            &audio.metadata(),
            settings,
        ))
    }

    /// Exporter preloaded with this session's source, cuts and chunk size.
    pub fn exporter(
        &self,
        output_dir: impl Into<PathBuf>,
        settings: ExportSettings,
    ) -> Result<CutExporter> {
        let audio = self.loaded()?;
        Ok(CutExporter::new(audio.source.clone(), output_dir)
            .cuts(self.timeline()?.cuts())
            .settings(settings)
            .chunk_bytes(self.config.chunk_bytes))
    }

    /// Export the selected cuts on the calling thread.
    pub fn export(
        &self,
        output_dir: impl Into<PathBuf>,
        settings: ExportSettings,
    ) -> Result<Vec<ExportedTrack>> {
        Ok(self.exporter(output_dir, settings)?.run()?)
    }

    /// Export the selected cuts in the background.
    pub fn start_export(
        &self,
        output_dir: impl Into<PathBuf>,
        settings: ExportSettings,
    ) -> Result<ExportHandle> {
        Ok(self.exporter(output_dir, settings)?.start()?)
    }
}

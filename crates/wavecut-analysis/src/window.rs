//! Scrolling playback window
//!
//! [`WindowedView`] keeps a fixed-length slice of the display series around
//! the playhead. During normal playback the window start snaps to multiples
//! of the window length, so the slice is rebuilt once per window rather than
//! once per position update. After a new source or a seek outside the window
//! the next rebuild starts exactly at the playhead instead.

use std::sync::Arc;
use std::time::Duration;

/// Fixed-length slice of a display series that follows the playhead.
#[derive(Debug)]
pub struct WindowedView {
    window_length: Duration,
    source: Arc<[f32]>,
    duration: Duration,
    sample_rate: u32,
    window_start: Duration,
    /// Block index the current slice was built for.
    window_block: u64,
    data: Vec<f32>,
    position: Duration,
    dirty: bool,
    reslices: u64,
}

impl WindowedView {
    pub fn new(window_length: Duration) -> Self {
        Self {
            window_length,
            source: Arc::from(Vec::new()),
            duration: Duration::ZERO,
            sample_rate: 0,
            window_start: Duration::ZERO,
            window_block: 0,
            data: Vec::new(),
            position: Duration::ZERO,
            dirty: false,
            reslices: 0,
        }
    }

    /// Install a new display series covering `duration`.
    ///
    /// The window is reset to `[0, window_length)` and sliced immediately;
    /// the next position update is treated as a jump.
    pub fn set_source(&mut self, source: Arc<[f32]>, duration: Duration, sample_rate: u32) {
        self.source = source;
        self.duration = duration;
        self.sample_rate = sample_rate;
        self.window_start = Duration::ZERO;
        self.window_block = 0;
        self.position = Duration::ZERO;
        self.fill(Duration::ZERO);
        self.dirty = true;
    }

    /// Drop the source and the current slice.
    pub fn clear(&mut self) {
        self.source = Arc::from(Vec::new());
        self.duration = Duration::ZERO;
        self.sample_rate = 0;
        self.window_start = Duration::ZERO;
        self.window_block = 0;
        self.position = Duration::ZERO;
        self.data.clear();
        self.dirty = false;
    }

    /// Move the playhead. Returns `true` if the slice was rebuilt.
    ///
    /// Constant time unless a rebuild happens, which copies at most one
    /// window of samples into the reused buffer.
    pub fn update_position(&mut self, position: Duration) -> bool {
        self.position = position;
        if self.duration.is_zero() {
            return false;
        }

        let block = self.block_of(position);
        let outside = position < self.window_start || position >= self.window_end();
        if !self.dirty && block == self.window_block && !outside {
            return false;
        }

        let (start, block) = if self.dirty {
            (position, block)
        } else {
            (self.block_start(block), block)
        };
        let start = start.min(self.max_start());

        let jump = self.dirty;
        self.dirty = false;
        self.window_block = block;
        if start == self.window_start && !outside && jump {
            // Jumped to where the current slice already starts
            return false;
        }

        self.window_start = start;
        self.fill(start);
        tracing::debug!(
            start = ?start,
            samples = self.data.len(),
            jump,
            "re-sliced playback window"
        );
        true
    }

    /// Move the playhead after a user seek.
    ///
    /// A target outside the current window rebuilds the slice starting at
    /// the target; a target inside it only moves the cursor.
    pub fn seek(&mut self, position: Duration) -> bool {
        if position < self.window_start || position >= self.window_end() {
            self.dirty = true;
        }
        self.update_position(position)
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn window_start(&self) -> Duration {
        self.window_start
    }

    pub fn window_end(&self) -> Duration {
        self.window_start + self.window_length
    }

    pub fn window_length(&self) -> Duration {
        self.window_length
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of rebuilds since creation.
    pub fn reslice_count(&self) -> u64 {
        self.reslices
    }

    /// Playhead offset within the window, in `[0, 1]`, or `None` when the
    /// playhead is outside it.
    pub fn cursor_ratio(&self) -> Option<f64> {
        if self.position < self.window_start || self.position > self.window_end() {
            return None;
        }
        let offset = (self.position - self.window_start).as_secs_f64();
        Some(offset / self.window_length.as_secs_f64())
    }

    /// Time under a click at `ratio` of the window width, clamped to the
    /// source duration. A non-finite ratio maps to the window start.
    pub fn time_at(&self, ratio: f64) -> Duration {
        let ratio = if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let offset = self.window_length.as_secs_f64() * ratio;
        (self.window_start + Duration::from_secs_f64(offset)).min(self.duration)
    }

    fn block_of(&self, position: Duration) -> u64 {
        (position.as_secs_f64() / self.window_length.as_secs_f64()) as u64
    }

    fn block_start(&self, block: u64) -> Duration {
        Duration::from_secs_f64(block as f64 * self.window_length.as_secs_f64())
    }

    /// Latest start that still leaves a full window inside the source.
    fn max_start(&self) -> Duration {
        self.duration.saturating_sub(self.window_length)
    }

    fn fill(&mut self, start: Duration) {
        self.data.clear();
        self.reslices += 1;
        if self.duration.is_zero() || self.source.is_empty() {
            return;
        }

        let per_second = self.source.len() as f64 / self.duration.as_secs_f64();
        let from = ((start.as_secs_f64() * per_second) as usize).min(self.source.len());
        let count = (self.window_length.as_secs_f64() * per_second) as usize;
        let to = from.saturating_add(count).min(self.source.len());
        self.data.extend_from_slice(&self.source[from..to]);
    }
}

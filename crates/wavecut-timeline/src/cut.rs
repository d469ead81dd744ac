use crate::palette::{self, Rgb};
use std::time::Duration;

/// A contiguous, named span of the source that becomes one exported track.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Cut {
    pub name: String,
    pub start: Duration,
    pub length: Duration,
    /// Slot in [`PALETTE`](crate::PALETTE).
    pub color_index: usize,
    /// Included in the next export.
    pub selected: bool,
}

impl Cut {
    pub fn new(name: impl Into<String>, start: Duration, length: Duration) -> Self {
        Self {
            name: name.into(),
            start,
            length,
            color_index: 0,
            selected: true,
        }
    }

    pub fn end(&self) -> Duration {
        self.start + self.length
    }

    /// Whether `position` falls in `[start, end)`.
    pub fn contains(&self, position: Duration) -> bool {
        position >= self.start && position < self.end()
    }

    pub fn color(&self) -> Rgb {
        palette::color(self.color_index)
    }
}

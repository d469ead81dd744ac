//! Cut timeline for wavecut.
//!
//! A [`CutTimeline`] splits a source file into named, coloured, selectable
//! [`Cut`]s that together cover the whole file. Structural edits keep the
//! cuts sorted and renumber them; cue sheets carry the boundaries in and
//! out.
//!
//! ```ignore
//! let mut timeline = CutTimeline::new("album", Duration::from_secs(600))?;
//! timeline.split(Duration::from_secs(240))?;
//! timeline.rename(1, "Side B")?;
//! std::fs::write("album.cue", timeline.to_cue("album.wav"))?;
//! ```

mod cut;
pub mod cue;
pub mod error;
pub mod palette;
pub mod time;
mod timeline;

pub use cue::{format_cue_time, parse_cue, parse_cue_time, write_cue};
pub use cut::Cut;
pub use error::{Error, Result};
pub use palette::{Rgb, PALETTE};
pub use time::{format_clock, format_timestamp};
pub use timeline::{CutTimeline, DeletePolicy};

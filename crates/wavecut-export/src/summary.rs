//! Pre-export summary and default destination.

use crate::options::ExportSettings;
use std::path::{Path, PathBuf};
use std::time::Duration;
use wavecut_core::AudioMetadata;
use wavecut_timeline::{format_timestamp, Cut};

/// What an export of the current selection would produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportSummary {
    pub selected: usize,
    pub total_duration: Duration,
    /// Sample data bytes, excluding headers.
    pub estimated_bytes: u64,
}

impl ExportSummary {
    pub fn new(cuts: &[Cut], source: &AudioMetadata, settings: &ExportSettings) -> Self {
        cuts.iter()
            .filter(|c| c.selected)
            .fold(Self::default(), |acc, cut| Self {
                selected: acc.selected + 1,
                total_duration: acc.total_duration + cut.length,
                estimated_bytes: acc.estimated_bytes + settings.track_bytes(source, cut.length),
            })
    }

    /// e.g. `3 tracks, 12:04:50, 41.3 MB`
    pub fn describe(&self) -> String {
        let noun = if self.selected == 1 { "track" } else { "tracks" };
        format!(
            "{} {}, {}, {:.1} MB",
            self.selected,
            noun,
            format_timestamp(self.total_duration),
            self.estimated_bytes as f64 / (1024.0 * 1024.0)
        )
    }
}

/// `<source dir>/<dir_name>`
pub fn default_output_dir(source: &Path, dir_name: &str) -> PathBuf {
    source
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(dir_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavecut_core::SampleKind;

    fn meta() -> AudioMetadata {
        AudioMetadata {
            sample_rate: 44100,
            channels: 2,
            bits_per_sample: 16,
            sample_kind: SampleKind::Int,
            frames: 44100 * 60,
        }
    }

    #[test]
    fn test_summary_counts_selected() {
        let mut cuts = vec![
            Cut::new("a", Duration::ZERO, Duration::from_secs(10)),
            Cut::new("b", Duration::from_secs(10), Duration::from_secs(20)),
            Cut::new("c", Duration::from_secs(30), Duration::from_secs(30)),
        ];
        cuts[1].selected = false;

        let summary = ExportSummary::new(&cuts, &meta(), &ExportSettings::default());
        assert_eq!(summary.selected, 2);
        assert_eq!(summary.total_duration, Duration::from_secs(40));
        assert_eq!(summary.estimated_bytes, 40 * 176_400);
        assert_eq!(summary.describe(), "2 tracks, 00:40:00, 6.7 MB");
    }

    #[test]
    fn test_default_output_dir() {
        assert_eq!(
            default_output_dir(Path::new("/music/live/set.wav"), "tracks"),
            PathBuf::from("/music/live/tracks")
        );
        assert_eq!(
            default_output_dir(Path::new("set.wav"), "tracks"),
            PathBuf::from("tracks")
        );
    }
}

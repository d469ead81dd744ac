//! Cue sheet import and export
//!
//! Only the parts needed to carry cut boundaries are understood: each
//! `INDEX 01 MM:SS:FF` line starts a track, where `FF` counts 1/75-second
//! frames. Everything else in an imported sheet is ignored.
//!
//! Written times are rounded to the nearest frame. Cuts that would land on
//! the same frame as the previous track are pushed one frame later, so the
//! sheet always has strictly increasing starts and imports back.

use crate::cut::Cut;
use crate::timeline::CutTimeline;
use crate::{Error, Result};
use std::fmt::Write;
use std::time::Duration;

const FRAMES_PER_SECOND: u64 = 75;
const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// `d` in 1/75-second frames, rounded to the nearest frame.
fn cue_frames(d: Duration) -> u64 {
    ((d.as_nanos() * FRAMES_PER_SECOND as u128 + NANOS_PER_SECOND / 2) / NANOS_PER_SECOND) as u64
}

/// Format `d` as `MM:SS:FF`, rounded to the nearest frame.
pub fn format_cue_time(d: Duration) -> String {
    format_frames(cue_frames(d))
}

fn format_frames(frames: u64) -> String {
    let seconds = frames / FRAMES_PER_SECOND;
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 60,
        seconds % 60,
        frames % FRAMES_PER_SECOND
    )
}

/// Parse a `MM:SS:FF` cue time.
pub fn parse_cue_time(text: &str) -> Option<Duration> {
    let mut parts = text.split(':');
    let minutes: u64 = parts.next()?.parse().ok()?;
    let seconds: u64 = parts.next()?.parse().ok()?;
    let frames: u64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || seconds >= 60 || frames >= FRAMES_PER_SECOND {
        return None;
    }
    let nanos = frames as u128 * NANOS_PER_SECOND / FRAMES_PER_SECOND as u128;
    Some(Duration::from_secs(minutes * 60 + seconds) + Duration::from_nanos(nanos as u64))
}

/// Track start times from every `INDEX 01` line, in file order.
pub fn parse_cue(text: &str) -> Result<Vec<Duration>> {
    let mut starts = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        let is_index = tokens
            .next()
            .is_some_and(|t| t.eq_ignore_ascii_case("INDEX"));
        if !is_index || tokens.next() != Some("01") {
            continue;
        }
        let time = tokens.next().ok_or_else(|| Error::CueSheet {
            line: n + 1,
            message: "INDEX 01 without a time".to_string(),
        })?;
        let start = parse_cue_time(time).ok_or_else(|| Error::CueSheet {
            line: n + 1,
            message: format!("malformed time {time:?}, expected MM:SS:FF"),
        })?;
        starts.push(start);
    }

    if starts.is_empty() {
        return Err(Error::CueSheet {
            line: 0,
            message: "no INDEX 01 entries".to_string(),
        });
    }
    Ok(starts)
}

/// Render `cuts` as a cue sheet for `file_name`.
///
/// Starts are written on strictly increasing frames even when two cuts
/// fall within the same 1/75 s.
pub fn write_cue(cuts: &[Cut], file_name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "FILE \"{file_name}\" WAVE");
    let mut previous: Option<u64> = None;
    for (i, cut) in cuts.iter().enumerate() {
        let mut frame = cue_frames(cut.start);
        if let Some(prev) = previous {
            frame = frame.max(prev + 1);
        }
        previous = Some(frame);

        let _ = writeln!(out, "  TRACK {:02} AUDIO", i + 1);
        let _ = writeln!(out, "    TITLE \"{}\"", cut.name.replace('"', "'"));
        let _ = writeln!(out, "    INDEX 01 {}", format_frames(frame));
    }
    out
}

impl CutTimeline {
    /// Replace all cuts with the tracks of a cue sheet.
    ///
    /// The timeline is left untouched when the sheet is malformed or its
    /// times are not strictly increasing within the file.
    pub fn import_cue(&mut self, text: &str) -> Result<()> {
        let starts = parse_cue(text)?;
        self.replace_with_starts(&starts)?;
        tracing::info!(tracks = self.len(), "imported cue sheet");
        Ok(())
    }

    /// Cue sheet with one track per cut.
    pub fn to_cue(&self, file_name: &str) -> String {
        write_cue(self.cuts(), file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = r#"REM GENRE Ambient
PERFORMER "Someone"
FILE "album.wav" WAVE
  TRACK 01 AUDIO
    TITLE "First"
    INDEX 01 00:00:00
  TRACK 02 AUDIO
    TITLE "Second"
    INDEX 00 03:58:10
    INDEX 01 04:00:37
  TRACK 03 AUDIO
    INDEX 01 09:12:74
"#;

    #[test]
    fn test_parse_cue_time() {
        assert_eq!(parse_cue_time("00:00:00"), Some(Duration::ZERO));
        assert_eq!(parse_cue_time("01:02:00"), Some(Duration::from_secs(62)));
        assert_eq!(
            parse_cue_time("00:01:15"),
            Some(Duration::from_millis(1200))
        );
        assert_eq!(parse_cue_time("00:60:00"), None);
        assert_eq!(parse_cue_time("00:00:75"), None);
        assert_eq!(parse_cue_time("00:00"), None);
        assert_eq!(parse_cue_time("00:00:00:00"), None);
    }

    #[test]
    fn test_format_cue_time() {
        assert_eq!(format_cue_time(Duration::ZERO), "00:00:00");
        assert_eq!(format_cue_time(Duration::from_millis(1200)), "00:01:15");
        assert_eq!(format_cue_time(Duration::from_secs(3725)), "62:05:00");
    }

    #[test]
    fn test_cue_time_survives_parse() {
        for text in ["00:00:01", "04:00:37", "09:12:74", "99:59:74"] {
            let d = parse_cue_time(text).unwrap();
            assert_eq!(format_cue_time(d), text);
        }
    }

    #[test]
    fn test_parse_only_index_01() {
        let starts = parse_cue(SHEET).unwrap();
        assert_eq!(starts.len(), 3);
        assert_eq!(starts[1], parse_cue_time("04:00:37").unwrap());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_cue("TRACK 01 AUDIO"),
            Err(Error::CueSheet { line: 0, .. })
        ));
        assert!(matches!(
            parse_cue("TRACK 01 AUDIO\nINDEX 01 1:2"),
            Err(Error::CueSheet { line: 2, .. })
        ));
    }

    #[test]
    fn test_import_builds_cuts() {
        let mut t = CutTimeline::new("album", Duration::from_secs(600)).unwrap();
        t.import_cue(SHEET).unwrap();

        assert_eq!(t.len(), 3);
        assert_eq!(t.cuts()[0].length, parse_cue_time("04:00:37").unwrap());
        assert_eq!(t.cuts()[2].end(), Duration::from_secs(600));
        assert!(t.cuts().iter().all(|c| c.selected));
        assert_eq!(t.cuts()[2].name, "album_003");
    }

    #[test]
    fn test_import_past_end_leaves_timeline() {
        let mut t = CutTimeline::new("album", Duration::from_secs(60)).unwrap();
        t.split(Duration::from_secs(30)).unwrap();
        let before = t.clone();
        assert!(t.import_cue(SHEET).is_err());
        assert_eq!(t, before);
    }

    #[test]
    fn test_export_then_import() {
        let mut t = CutTimeline::new("live", Duration::from_secs(300)).unwrap();
        t.split(Duration::from_secs(75)).unwrap();
        t.split(Duration::from_millis(190_400)).unwrap();

        let sheet = t.to_cue("live.wav");
        assert!(sheet.starts_with("FILE \"live.wav\" WAVE\n"));
        assert!(sheet.contains("  TRACK 02 AUDIO\n"));
        assert!(sheet.contains("    INDEX 01 01:15:00\n"));
        assert!(sheet.contains("    INDEX 01 03:10:30\n"));

        let mut other = CutTimeline::new("live", Duration::from_secs(300)).unwrap();
        other.import_cue(&sheet).unwrap();
        assert_eq!(other.cuts(), t.cuts());
    }

    #[test]
    fn test_sub_frame_cuts_stay_distinct() {
        let mut t = CutTimeline::new("close", Duration::from_secs(10)).unwrap();
        t.split(Duration::from_secs(1)).unwrap();
        t.split(Duration::from_millis(1005)).unwrap();

        let sheet = t.to_cue("close.wav");
        assert!(sheet.contains("    INDEX 01 00:01:00\n"));
        assert!(sheet.contains("    INDEX 01 00:01:01\n"));

        let mut other = CutTimeline::new("close", Duration::from_secs(10)).unwrap();
        other.import_cue(&sheet).unwrap();
        assert_eq!(other.len(), 3);
        assert_eq!(other.cuts()[1].start, Duration::from_secs(1));
        assert_eq!(other.cuts()[2].start, parse_cue_time("00:01:01").unwrap());
        assert!(other.is_contiguous());
    }
}

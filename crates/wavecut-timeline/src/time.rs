//! Time formatting for cut tables and the time readout.

use std::time::Duration;

fn split(d: Duration) -> (u64, u64, u64) {
    let centis = d.as_millis() as u64 / 10;
    (centis / 6000, centis / 100 % 60, centis % 100)
}

/// `MM:SS:CC` with total minutes, as shown in the start and length columns.
pub fn format_timestamp(d: Duration) -> String {
    let (m, s, c) = split(d);
    format!("{m:02}:{s:02}:{c:02}")
}

/// `MM:SS.CC` for the position readout.
pub fn format_clock(d: Duration) -> String {
    let (m, s, c) = split(d);
    format!("{m:02}:{s:02}.{c:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(Duration::ZERO), "00:00:00");
        assert_eq!(format_timestamp(Duration::from_millis(83_456)), "01:23:45");
        assert_eq!(format_timestamp(Duration::from_secs(3_725)), "62:05:00");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(Duration::from_millis(5_070)), "00:05.07");
        assert_eq!(format_clock(Duration::from_millis(599_999)), "09:59.99");
    }
}

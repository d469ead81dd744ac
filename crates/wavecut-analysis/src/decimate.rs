//! Peak-preserving decimation
//!
//! Reduces a series to a fixed number of points for drawing. Each output
//! point is the sample with the largest magnitude in its block, sign
//! included, so a plotted line still reaches every transient.

/// Min/max pair for one display column.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct PeakColumn {
    pub min: f32,
    pub max: f32,
}

/// Reduce `source` to `target_len` points.
///
/// Sources that already fit are returned unchanged. Otherwise the series is
/// split into `target_len` blocks of `source.len() / target_len` samples,
/// the last block absorbing the remainder, and each block contributes its
/// maximum-magnitude sample. On equal magnitude the maximum wins. A target
/// of zero yields an empty series.
pub fn decimate(source: &[f32], target_len: usize) -> Vec<f32> {
    if source.len() <= target_len {
        return source.to_vec();
    }
    if target_len == 0 {
        return Vec::new();
    }

    let step = source.len() / target_len;
    let mut out = Vec::with_capacity(target_len);

    for i in 0..target_len {
        let start = i * step;
        let end = if i + 1 == target_len {
            source.len()
        } else {
            start + step
        };
        out.push(signed_peak(&source[start..end]));
    }

    out
}

fn signed_peak(block: &[f32]) -> f32 {
    let (min, max) = block
        .iter()
        .fold((0.0f32, 0.0f32), |(lo, hi), &s| (lo.min(s), hi.max(s)));
    if min.abs() > max.abs() {
        min
    } else {
        max
    }
}

/// Min and max of the samples under column `pixel` of `total_pixels`.
///
/// Column `p` covers `[floor(p * len / total), floor((p + 1) * len / total))`,
/// clamped to the data. Both extremes start at zero, so a column that only
/// holds positive samples reports a minimum of 0.0. Empty data, a zero
/// width or an empty column give `(0.0, 0.0)`.
pub fn peak_range_for_pixel(data: &[f32], pixel: usize, total_pixels: usize) -> (f32, f32) {
    if data.is_empty() || total_pixels == 0 {
        return (0.0, 0.0);
    }

    let per_pixel = data.len() as f64 / total_pixels as f64;
    let start = ((pixel as f64 * per_pixel) as usize).min(data.len());
    let end = (((pixel + 1) as f64 * per_pixel) as usize).min(data.len());

    let mut min = 0.0f32;
    let mut max = 0.0f32;
    for &s in &data[start..end] {
        min = min.min(s);
        max = max.max(s);
    }
    (min, max)
}

/// Min/max for every column of a `width`-pixel display.
pub fn column_peaks(data: &[f32], width: usize) -> Vec<PeakColumn> {
    (0..width)
        .map(|pixel| {
            let (min, max) = peak_range_for_pixel(data, pixel, width);
            PeakColumn { min, max }
        })
        .collect()
}

/// Number of overview points for a display `width` pixels wide.
///
/// Never fewer than `max_display_points` (or two per pixel when wider),
/// and never more than the series holds.
pub fn overview_target_len(len: usize, width: usize, max_display_points: usize) -> usize {
    len.min(max_display_points.max(width.saturating_mul(2)))
}

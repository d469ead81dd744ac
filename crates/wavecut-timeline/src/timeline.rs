//! Ordered cut list over a source file.

use crate::cut::Cut;
use crate::palette::{self, Rgb};
use crate::{Error, Result};
use std::time::Duration;

/// What happens to the span of a deleted cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// The previous cut grows over the span; deleting the first cut grows
    /// the next one back to zero. Coverage stays complete.
    #[default]
    MergeIntoPrevious,
    /// The span is left uncovered and will not be exported.
    LeaveGap,
}

/// An ordered list of cuts covering `[0, total_duration)`.
///
/// Cuts are sorted by start, never overlap, and each has a non-zero length.
/// Unless [`DeletePolicy::LeaveGap`] is in use they are also contiguous.
/// Every structural change renames the cuts `{base}_{NNN}` in order and
/// reassigns their colours by position.
#[derive(Debug, Clone, PartialEq)]
pub struct CutTimeline {
    base_name: String,
    total: Duration,
    cuts: Vec<Cut>,
    delete_policy: DeletePolicy,
}

impl CutTimeline {
    /// A timeline with one selected cut spanning `total`.
    pub fn new(base_name: impl Into<String>, total: Duration) -> Result<Self> {
        let mut timeline = Self {
            base_name: base_name.into(),
            total: Duration::ZERO,
            cuts: Vec::new(),
            delete_policy: DeletePolicy::default(),
        };
        timeline.initialize(total)?;
        Ok(timeline)
    }

    pub fn with_delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }

    /// Reset to a single cut spanning `total`.
    pub fn initialize(&mut self, total: Duration) -> Result<()> {
        if total.is_zero() {
            return Err(Error::EmptyDuration);
        }
        self.total = total;
        self.cuts.clear();
        self.cuts.push(Cut::new(String::new(), Duration::ZERO, total));
        self.renumber_and_recolor();
        tracing::debug!(total = ?total, "timeline initialized");
        Ok(())
    }

    /// Rebuild from ascending boundary times, as read from a cue sheet.
    ///
    /// Each start opens a cut that runs to the next start; the last runs to
    /// the end. A first start after zero gets a leading cut for the gap.
    pub fn replace_with_starts(&mut self, starts: &[Duration]) -> Result<()> {
        let mut bounds = Vec::with_capacity(starts.len() + 1);
        if !starts.first().is_some_and(|s| s.is_zero()) {
            bounds.push(Duration::ZERO);
        }
        for &start in starts {
            if start >= self.total || bounds.last().is_some_and(|&prev| start <= prev) {
                return Err(Error::InvalidPosition {
                    position: start,
                    total: self.total,
                });
            }
            bounds.push(start);
        }

        self.cuts = bounds
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let end = bounds.get(i + 1).copied().unwrap_or(self.total);
                Cut::new(String::new(), start, end - start)
            })
            .collect();
        self.renumber_and_recolor();
        tracing::debug!(cuts = self.cuts.len(), "timeline rebuilt from boundaries");
        Ok(())
    }

    /// Split the cut containing `position` in two.
    ///
    /// Returns the index of the new second half. Positions at zero, at or
    /// past the end, on an existing boundary or inside a gap are rejected.
    /// Both halves come out selected.
    pub fn split(&mut self, position: Duration) -> Result<usize> {
        let invalid = Error::InvalidPosition {
            position,
            total: self.total,
        };
        if position.is_zero() || position >= self.total {
            return Err(invalid);
        }

        let index = self
            .cuts
            .iter()
            .position(|c| c.start < position && position < c.end())
            .ok_or(invalid)?;

        let cut = &mut self.cuts[index];
        let tail_length = cut.end() - position;
        cut.length = position - cut.start;
        cut.selected = true;
        self.cuts
            .insert(index + 1, Cut::new(String::new(), position, tail_length));

        self.renumber_and_recolor();
        tracing::debug!(position = ?position, index = index + 1, "split cut");
        Ok(index + 1)
    }

    /// Remove the cut at `index`, applying the delete policy to its span.
    pub fn delete(&mut self, index: usize) -> Result<Cut> {
        self.check_index(index)?;
        if self.cuts.len() <= 1 {
            return Err(Error::LastCutProtected);
        }

        let removed = self.cuts.remove(index);
        if self.delete_policy == DeletePolicy::MergeIntoPrevious {
            if index == 0 {
                let next = &mut self.cuts[0];
                next.length = next.end() - removed.start;
                next.start = removed.start;
            } else {
                let prev = &mut self.cuts[index - 1];
                prev.length = removed.end() - prev.start;
            }
        }

        self.renumber_and_recolor();
        tracing::debug!(index, name = %removed.name, policy = ?self.delete_policy, "deleted cut");
        Ok(removed)
    }

    /// Rename the cut at `index`. Blank names are ignored and leave the cut
    /// unchanged; returns whether the name changed.
    pub fn rename(&mut self, index: usize, name: &str) -> Result<bool> {
        self.check_index(index)?;
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }
        self.cuts[index].name = name.to_string();
        Ok(true)
    }

    pub fn set_selected(&mut self, index: usize, selected: bool) -> Result<()> {
        self.check_index(index)?;
        self.cuts[index].selected = selected;
        Ok(())
    }

    pub fn select_all(&mut self, selected: bool) {
        for cut in &mut self.cuts {
            cut.selected = selected;
        }
    }

    /// Sort by start, name cuts `{base}_{NNN}` from 001 and colour them by
    /// position.
    pub fn renumber_and_recolor(&mut self) {
        self.cuts.sort_by_key(|c| c.start);
        for (i, cut) in self.cuts.iter_mut().enumerate() {
            cut.name = format!("{}_{:03}", self.base_name, i + 1);
            cut.color_index = palette::color_index(i);
        }
    }

    pub fn cuts(&self) -> &[Cut] {
        &self.cuts
    }

    pub fn get(&self, index: usize) -> Option<&Cut> {
        self.cuts.get(index)
    }

    pub fn len(&self) -> usize {
        self.cuts.len()
    }

    /// Always false for an initialized timeline.
    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }

    pub fn selected(&self) -> impl Iterator<Item = &Cut> {
        self.cuts.iter().filter(|c| c.selected)
    }

    pub fn total_duration(&self) -> Duration {
        self.total
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    pub fn set_delete_policy(&mut self, policy: DeletePolicy) {
        self.delete_policy = policy;
    }

    /// Index of the cut containing `position`.
    pub fn cut_at(&self, position: Duration) -> Option<usize> {
        let index = self.cuts.partition_point(|c| c.start <= position);
        let index = index.checked_sub(1)?;
        self.cuts[index].contains(position).then_some(index)
    }

    /// Colour of the cut under `position`, if any.
    pub fn color_at(&self, position: Duration) -> Option<Rgb> {
        self.cut_at(position).map(|i| self.cuts[i].color())
    }

    /// Interior cut starts, for drawing markers.
    pub fn boundaries(&self) -> impl Iterator<Item = Duration> + '_ {
        self.cuts.iter().skip(1).map(|c| c.start)
    }

    /// Whether the cuts cover `[0, total)` without gaps.
    pub fn is_contiguous(&self) -> bool {
        let starts_at_zero = self.cuts.first().is_some_and(|c| c.start.is_zero());
        let ends_at_total = self.cuts.last().is_some_and(|c| c.end() == self.total);
        starts_at_zero
            && ends_at_total
            && self.cuts.windows(2).all(|w| w[0].end() == w[1].start)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.cuts.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.cuts.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn album() -> CutTimeline {
        CutTimeline::new("album", secs(300)).unwrap()
    }

    fn names(t: &CutTimeline) -> Vec<&str> {
        t.cuts().iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_initialize_single_cut() {
        let t = album();
        assert_eq!(t.len(), 1);
        let cut = &t.cuts()[0];
        assert_eq!(cut.name, "album_001");
        assert_eq!(cut.start, Duration::ZERO);
        assert_eq!(cut.length, secs(300));
        assert_eq!(cut.color_index, 0);
        assert!(cut.selected);
    }

    #[test]
    fn test_initialize_rejects_zero_duration() {
        assert_eq!(
            CutTimeline::new("x", Duration::ZERO).unwrap_err(),
            Error::EmptyDuration
        );
    }

    #[test]
    fn test_split_and_renumber() {
        let mut t = album();
        assert_eq!(t.split(secs(120)).unwrap(), 1);
        assert_eq!(t.split(secs(60)).unwrap(), 1);

        assert_eq!(names(&t), ["album_001", "album_002", "album_003"]);
        let starts: Vec<_> = t.cuts().iter().map(|c| c.start).collect();
        assert_eq!(starts, [secs(0), secs(60), secs(120)]);
        assert_eq!(t.cuts()[2].length, secs(180));
        let colors: Vec<_> = t.cuts().iter().map(|c| c.color_index).collect();
        assert_eq!(colors, [0, 1, 2]);
        assert!(t.is_contiguous());
    }

    #[test]
    fn test_split_ten_seconds_at_four() {
        let mut t = CutTimeline::new("take", secs(10)).unwrap();
        t.split(secs(4)).unwrap();
        let spans: Vec<_> = t.cuts().iter().map(|c| (c.start, c.end())).collect();
        assert_eq!(spans, [(secs(0), secs(4)), (secs(4), secs(10))]);
        assert_eq!(names(&t), ["take_001", "take_002"]);
        assert!(t.cuts().iter().all(|c| c.selected));
    }

    #[test]
    fn test_split_rejects_edges_and_boundaries() {
        let mut t = album();
        assert!(matches!(t.split(Duration::ZERO), Err(Error::InvalidPosition { .. })));
        assert!(matches!(t.split(secs(300)), Err(Error::InvalidPosition { .. })));
        assert!(matches!(t.split(secs(400)), Err(Error::InvalidPosition { .. })));
        t.split(secs(100)).unwrap();
        assert!(matches!(t.split(secs(100)), Err(Error::InvalidPosition { .. })));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_split_selects_both_halves() {
        let mut t = album();
        t.set_selected(0, false).unwrap();
        t.split(secs(10)).unwrap();
        assert!(t.cuts().iter().all(|c| c.selected));
    }

    #[test]
    fn test_delete_last_cut_refused() {
        let mut t = album();
        assert_eq!(t.delete(0).unwrap_err(), Error::LastCutProtected);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_delete_merges_into_previous() {
        let mut t = album();
        t.split(secs(100)).unwrap();
        t.split(secs(200)).unwrap();

        let removed = t.delete(1).unwrap();
        assert_eq!(removed.start, secs(100));
        assert_eq!(names(&t), ["album_001", "album_002"]);
        assert_eq!(t.cuts()[0].length, secs(200));
        assert_eq!(t.cuts()[1].start, secs(200));
        assert!(t.is_contiguous());
    }

    #[test]
    fn test_delete_first_merges_into_next() {
        let mut t = album();
        t.split(secs(100)).unwrap();
        t.delete(0).unwrap();
        assert_eq!(t.cuts()[0].start, Duration::ZERO);
        assert_eq!(t.cuts()[0].length, secs(300));
        assert!(t.is_contiguous());
    }

    #[test]
    fn test_delete_leave_gap() {
        let mut t = album().with_delete_policy(DeletePolicy::LeaveGap);
        t.split(secs(100)).unwrap();
        t.split(secs(200)).unwrap();
        t.delete(1).unwrap();

        assert!(!t.is_contiguous());
        assert_eq!(t.cut_at(secs(150)), None);
        assert!(matches!(t.split(secs(150)), Err(Error::InvalidPosition { .. })));
        assert_eq!(names(&t), ["album_001", "album_002"]);
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut t = album();
        t.split(secs(1)).unwrap();
        assert_eq!(
            t.delete(5).unwrap_err(),
            Error::IndexOutOfRange { index: 5, len: 2 }
        );
    }

    #[test]
    fn test_rename_ignores_blank() {
        let mut t = album();
        assert!(!t.rename(0, "   ").unwrap());
        assert_eq!(t.cuts()[0].name, "album_001");
        assert!(t.rename(0, " Intro ").unwrap());
        assert_eq!(t.cuts()[0].name, "Intro");
    }

    #[test]
    fn test_rename_reverted_by_structural_change() {
        let mut t = album();
        t.rename(0, "Intro").unwrap();
        t.split(secs(30)).unwrap();
        assert_eq!(names(&t), ["album_001", "album_002"]);
    }

    #[test]
    fn test_cut_at_and_color_at() {
        let mut t = album();
        t.split(secs(100)).unwrap();
        assert_eq!(t.cut_at(Duration::ZERO), Some(0));
        assert_eq!(t.cut_at(secs(99)), Some(0));
        assert_eq!(t.cut_at(secs(100)), Some(1));
        assert_eq!(t.cut_at(secs(300)), None);
        assert_eq!(t.color_at(secs(150)), Some(crate::PALETTE[1]));
        assert_eq!(t.boundaries().collect::<Vec<_>>(), [secs(100)]);
    }

    #[test]
    fn test_replace_with_starts() {
        let mut t = album();
        t.replace_with_starts(&[secs(0), secs(90), secs(200)]).unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(t.cuts()[1].length, secs(110));
        assert_eq!(t.cuts()[2].end(), secs(300));
        assert!(t.is_contiguous());
    }

    #[test]
    fn test_replace_with_late_first_start() {
        let mut t = album();
        t.replace_with_starts(&[secs(5), secs(50)]).unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(t.cuts()[0].length, secs(5));
        assert!(t.is_contiguous());
    }

    #[test]
    fn test_replace_rejects_unordered() {
        let mut t = album();
        assert!(t.replace_with_starts(&[secs(0), secs(50), secs(50)]).is_err());
        assert!(t.replace_with_starts(&[secs(0), secs(301)]).is_err());
        assert_eq!(t.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_splits_and_deletes_keep_coverage(
            ops in proptest::collection::vec((any::<bool>(), 1u64..300_000), 1..60)
        ) {
            let mut t = CutTimeline::new("t", Duration::from_millis(300_000)).unwrap();
            for (split, value) in ops {
                if split {
                    let _ = t.split(Duration::from_millis(value));
                } else {
                    let index = value as usize % t.len();
                    let _ = t.delete(index);
                }
                prop_assert!(t.is_contiguous());
                prop_assert!(!t.is_empty());
                prop_assert!(t.cuts().iter().all(|c| !c.length.is_zero()));
                for (i, cut) in t.cuts().iter().enumerate() {
                    prop_assert_eq!(&cut.name, &format!("t_{:03}", i + 1));
                    prop_assert_eq!(cut.color_index, i % 16);
                }
            }
        }
    }
}

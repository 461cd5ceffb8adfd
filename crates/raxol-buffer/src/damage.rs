//! Per-buffer damage (dirty-region) tracking.

use std::collections::BTreeSet;

/// Coarsening threshold: once more than this many individual rows are
/// dirty, tracking degrades to whole-row marks are already in effect, so
/// the set itself can simply grow; `max_dirty_rects` instead bounds how
/// many discrete row numbers are kept before folding the whole tracker to
/// [`DamageSet::Full`].
pub const MAX_DIRTY_RECTS: usize = 64;

/// A snapshot of what changed since the previous [`DamageTracker::take`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageSet {
    /// No rows changed.
    None,
    /// Exactly these rows changed (0-based, ascending).
    Rows(Vec<usize>),
    /// Too much changed to track precisely; treat the whole viewport as
    /// dirty.
    Full,
}

/// Tracks which grid rows have been written since the last [`take`].
///
/// Starts row-granular and coarsens to [`DamageSet::Full`] once more than
/// half the rows are dirty or the tracked-row count exceeds
/// [`MAX_DIRTY_RECTS`], per the buffer engine's damage-tracking contract.
///
/// [`take`]: DamageTracker::take
#[derive(Debug, Clone)]
pub struct DamageTracker {
    height: usize,
    rows: BTreeSet<usize>,
    full: bool,
    frame_id: u64,
}

impl DamageTracker {
    #[must_use]
    pub fn new(height: usize) -> Self {
        Self {
            height,
            rows: BTreeSet::new(),
            full: false,
            frame_id: 0,
        }
    }

    pub fn resize(&mut self, height: usize) {
        self.height = height;
        self.mark_full();
    }

    pub fn mark_row(&mut self, y: usize) {
        if self.full || y >= self.height {
            return;
        }
        self.rows.insert(y);
        if self.rows.len() > MAX_DIRTY_RECTS || self.rows.len() * 2 > self.height {
            self.mark_full();
        }
    }

    pub fn mark_full(&mut self) {
        self.full = true;
        self.rows.clear();
    }

    /// Returns the current damage without clearing it.
    #[must_use]
    pub fn peek(&self) -> DamageSet {
        if self.full {
            DamageSet::Full
        } else if self.rows.is_empty() {
            DamageSet::None
        } else {
            DamageSet::Rows(self.rows.iter().copied().collect())
        }
    }

    /// Returns and clears the current damage, bumping the frame id.
    pub fn take(&mut self) -> (DamageSet, u64) {
        let damage = self.peek();
        self.rows.clear();
        self.full = false;
        self.frame_id += 1;
        (damage, self.frame_id)
    }

    #[must_use]
    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_row_marks_are_tracked_precisely() {
        let mut d = DamageTracker::new(10);
        d.mark_row(3);
        d.mark_row(5);
        assert_eq!(d.peek(), DamageSet::Rows(vec![3, 5]));
    }

    #[test]
    fn majority_dirty_coarsens_to_full() {
        let mut d = DamageTracker::new(10);
        for y in 0..6 {
            d.mark_row(y);
        }
        assert_eq!(d.peek(), DamageSet::Full);
    }

    #[test]
    fn take_clears_and_advances_frame_id() {
        let mut d = DamageTracker::new(10);
        d.mark_row(0);
        let (damage, frame) = d.take();
        assert_eq!(damage, DamageSet::Rows(vec![0]));
        assert_eq!(frame, 1);
        assert_eq!(d.peek(), DamageSet::None);
    }

    #[test]
    fn exceeding_max_dirty_rects_coarsens_even_on_a_tall_buffer() {
        let mut d = DamageTracker::new(1000);
        for y in 0..=MAX_DIRTY_RECTS {
            d.mark_row(y);
        }
        assert_eq!(d.peek(), DamageSet::Full);
    }
}

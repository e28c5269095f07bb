//! Wavefronts and per-matrix wavefront components.

use std::fmt::Write;

use super::growable::{GrowableArray, Slot};
use super::packed::{PackedCell, Traceback};

/// Cells of one matrix at one score over the diagonals `lo..=hi`.
///
/// An empty wavefront (`hi < lo`) stands for a score that was never reached.
#[derive(Debug, Clone)]
pub struct Wavefront {
    lo: i32,
    hi: i32,
    cells: GrowableArray<PackedCell>,
}

impl Default for Wavefront {
    fn default() -> Self {
        Self {
            lo: 0,
            hi: -1,
            cells: GrowableArray::new(),
        }
    }
}

impl Slot for Wavefront {
    #[inline(always)]
    fn is_set(&self) -> bool {
        self.hi >= self.lo
    }
}

impl Wavefront {
    /// Allocate `lo..=hi`, every cell invalid.
    pub fn new(lo: i32, hi: i32) -> Self {
        Self {
            lo,
            hi,
            cells: GrowableArray::with_range(lo as isize, hi as isize),
        }
    }

    #[inline(always)]
    pub fn lo(&self) -> i32 {
        self.lo
    }

    #[inline(always)]
    pub fn hi(&self) -> i32 {
        self.hi
    }

    #[inline(always)]
    pub fn cell(&self, k: i32) -> PackedCell {
        self.cells.get(k as isize).copied().unwrap_or_default()
    }

    /// `(offset, tag)` on diagonal `k`, if computed.
    #[inline(always)]
    pub fn get(&self, k: i32) -> Option<(u32, Traceback)> {
        self.cell(k).get()
    }

    #[inline(always)]
    pub fn set(&mut self, k: i32, offset: u32, tag: Traceback) {
        assert!(self.lo <= k && k <= self.hi, "diagonal {k} outside [{}, {}]", self.lo, self.hi);
        self.cells.set(k as isize, PackedCell::pack(offset, tag));
    }

    /// Number of valid cells.
    pub fn count_valid(&self) -> usize {
        (self.lo..=self.hi).filter(|&k| self.cell(k).is_valid()).count()
    }
}

/// One of the three matrices (M, I or D) across every score reached so far.
#[derive(Debug, Clone, Default)]
pub struct WavefrontComponent {
    wavefronts: GrowableArray<Wavefront>,
}

impl WavefrontComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve room for `scores` wavefronts up front.
    pub fn preallocate(&mut self, scores: usize) {
        self.wavefronts.preallocate(scores);
    }

    /// Score slots currently allocated.
    pub fn capacity(&self) -> usize {
        self.wavefronts.capacity()
    }

    /// Wavefront at `score`; `None` for negative or unreached scores.
    #[inline(always)]
    pub fn wavefront(&self, score: isize) -> Option<&Wavefront> {
        if score < 0 {
            return None;
        }
        self.wavefronts.get(score)
    }

    #[inline(always)]
    pub fn wavefront_mut(&mut self, score: usize) -> Option<&mut Wavefront> {
        self.wavefronts
            .slot_mut(score as isize)
            .filter(|wf| wf.is_set())
    }

    /// `(lo, hi)` at `score` if that score holds a wavefront.
    #[inline(always)]
    pub fn range(&self, score: isize) -> Option<(i32, i32)> {
        self.wavefront(score).map(|wf| (wf.lo, wf.hi))
    }

    #[inline(always)]
    pub fn get(&self, score: isize, k: i32) -> Option<(u32, Traceback)> {
        self.wavefront(score).and_then(|wf| wf.get(k))
    }

    /// Install a fresh `lo..=hi` wavefront at `score`, replacing anything there.
    pub fn allocate(&mut self, score: usize, lo: i32, hi: i32) {
        self.wavefronts.set(score as isize, Wavefront::new(lo, hi));
    }

    /// Set a cell of an already allocated wavefront.
    ///
    /// # Panics
    ///
    /// If `score` was never allocated.
    pub fn set(&mut self, score: usize, k: i32, offset: u32, tag: Traceback) {
        match self.wavefront_mut(score) {
            Some(wf) => wf.set(k, offset, tag),
            None => panic!("set on diagonal {k} at score {score}, which has no wavefront"),
        }
    }

    /// Scores `0..=max_score` that hold a wavefront.
    pub fn populated_scores(&self, max_score: usize) -> usize {
        (0..=max_score as isize)
            .filter(|&s| self.wavefront(s).is_some())
            .count()
    }

    /// Grid dump of scores `0..=max_score`: offsets on the left, two-letter
    /// traceback codes on the right. `--` marks diagonals outside the live
    /// range, blanks mark invalid cells inside it.
    pub fn render(&self, max_score: usize) -> String {
        let ranges: Vec<(i32, i32)> = (0..=max_score as isize)
            .filter_map(|s| self.range(s))
            .collect();
        let Some(min_lo) = ranges.iter().map(|r| r.0).min() else {
            return String::from("<>\t<>\n");
        };
        let max_hi = ranges.iter().map(|r| r.1).max().unwrap_or(min_lo);

        let header = (min_lo..=max_hi)
            .map(|k| format!("{k:02}"))
            .collect::<Vec<_>>()
            .join("|");
        let mut out = format!("<{header}>\t<{header}>\n");

        for score in 0..=max_score as isize {
            let wf = self.wavefront(score);
            let outside = |k: i32| wf.map_or(true, |wf| k < wf.lo || k > wf.hi);

            let offsets = (min_lo..=max_hi)
                .map(|k| match wf.and_then(|wf| wf.get(k)) {
                    Some((offset, _)) => format!("{offset:02}"),
                    None if outside(k) => "--".to_string(),
                    None => "  ".to_string(),
                })
                .collect::<Vec<_>>()
                .join("|");
            let tags = (min_lo..=max_hi)
                .map(|k| match wf.and_then(|wf| wf.get(k)) {
                    Some((_, tag)) => tag.code(),
                    None if outside(k) => "--",
                    None => "  ",
                })
                .collect::<Vec<_>>()
                .join("|");
            let _ = writeln!(out, "[{offsets}]\t[{tags}]");
        }
        out
    }
}

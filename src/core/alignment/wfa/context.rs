//! Per-request wavefront state and the extend / next recurrences.
//!
//! Coordinates: sequence1 (length `n`) runs vertically, sequence2 (length
//! `m`) horizontally. A cell on diagonal `k` with offset `h` sits at column
//! `h` and row `v = h - k`. Alignment starts at diagonal 0, offset 0 and ends
//! on diagonal `m - n` at offset `m`.

use super::packed::Traceback;
use super::penalty::Penalty;
use super::wavefront::WavefrontComponent;

/// Upper bound on score slots reserved up front by
/// [`WavefrontContext::preallocate`].
pub const MAX_PREALLOCATED_SCORES: usize = 1 << 16;

/// Which of the three matrices a cell lives in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Matrix {
    M,
    I,
    D,
}

/// Everything one alignment request owns: both sequences, the penalties and
/// the match / insertion / deletion wavefront components.
pub struct WavefrontContext<'a> {
    pub(crate) seq1: &'a [u8],
    pub(crate) seq2: &'a [u8],
    pub(crate) penalty: Penalty,
    pub(crate) m: WavefrontComponent,
    pub(crate) i: WavefrontComponent,
    pub(crate) d: WavefrontComponent,
}

impl<'a> WavefrontContext<'a> {
    /// Fresh context with `M[0][0] = (0, End)` and empty `I`/`D`.
    pub fn new(seq1: &'a [u8], seq2: &'a [u8], penalty: Penalty) -> Self {
        let mut m = WavefrontComponent::new();
        m.allocate(0, 0, 0);
        m.set(0, 0, 0, Traceback::End);
        Self {
            seq1,
            seq2,
            penalty,
            m,
            i: WavefrontComponent::new(),
            d: WavefrontComponent::new(),
        }
    }

    /// Size the score axis of all three components for `score_hint` scores.
    ///
    /// Only a hint: the slot count is capped at `n + m + 1` and at
    /// [`MAX_PREALLOCATED_SCORES`], anything beyond grows on demand.
    pub fn preallocate(&mut self, score_hint: usize) {
        let slots = score_hint
            .saturating_add(1)
            .min(self.seq1.len() + self.seq2.len() + 1)
            .min(MAX_PREALLOCATED_SCORES);
        self.m.preallocate(slots);
        self.i.preallocate(slots);
        self.d.preallocate(slots);
    }

    pub fn component(&self, matrix: Matrix) -> &WavefrontComponent {
        match matrix {
            Matrix::M => &self.m,
            Matrix::I => &self.i,
            Matrix::D => &self.d,
        }
    }

    pub fn penalty(&self) -> &Penalty {
        &self.penalty
    }

    /// Diagonal on which the alignment ends.
    #[inline(always)]
    pub fn target_diagonal(&self) -> i32 {
        self.seq2.len() as i32 - self.seq1.len() as i32
    }

    /// Offset on the target diagonal at which the alignment ends.
    #[inline(always)]
    pub fn target_offset(&self) -> u32 {
        self.seq2.len() as u32
    }

    /// True once `M[score]` has reached the bottom-right corner.
    #[inline]
    pub fn reached_end(&self, score: usize) -> bool {
        self.m
            .get(score as isize, self.target_diagonal())
            .is_some_and(|(offset, _)| offset >= self.target_offset())
    }

    /// A cell at offset `h` on diagonal `k` stays inside the alignment
    /// rectangle (`h <= m`, `v <= n`).
    #[inline(always)]
    fn fits(&self, k: i32, h: u32) -> bool {
        h as usize <= self.seq2.len() && h as i64 - k as i64 <= self.seq1.len() as i64
    }

    /// Greedily slide every valid `M[score]` cell along its diagonal while
    /// the sequences match.
    pub fn extend(&mut self, score: usize) {
        let (seq1, seq2) = (self.seq1, self.seq2);
        let Some(wf) = self.m.wavefront_mut(score) else {
            return;
        };

        for k in wf.lo()..=wf.hi() {
            let Some((offset, tag)) = wf.get(k) else {
                continue;
            };
            let mut h = offset as usize;
            let mut v = (offset as i64 - k as i64) as usize;
            while v < seq1.len() && h < seq2.len() && seq1[v] == seq2[h] {
                v += 1;
                h += 1;
            }
            if h != offset as usize {
                wf.set(k, h as u32, tag);
            }
        }
    }

    /// Diagonal range for `score`: one wider on each side than the union of
    /// the live predecessor ranges, or `None` when no predecessor exists.
    pub fn next_range(&self, score: usize) -> Option<(i32, i32)> {
        let s = score as isize;
        let x = self.penalty.mismatch as isize;
        let oe = self.penalty.gap_open_extend() as isize;
        let e = self.penalty.gap_extend as isize;

        let predecessors = [
            self.m.range(s - x),
            self.m.range(s - oe),
            self.i.range(s - e),
            self.d.range(s - e),
        ];
        let lo = predecessors.iter().flatten().map(|r| r.0).min()?;
        let hi = predecessors.iter().flatten().map(|r| r.1).max()?;
        Some((lo - 1, hi + 1))
    }

    /// Populate `M`, `I` and `D` at `score` from earlier scores. Returns
    /// false (and leaves `score` empty) when no predecessor wavefront exists.
    pub fn next(&mut self, score: usize) -> bool {
        let Some((lo, hi)) = self.next_range(score) else {
            return false;
        };

        self.m.allocate(score, lo, hi);
        self.i.allocate(score, lo, hi);
        self.d.allocate(score, lo, hi);

        for k in lo..=hi {
            self.next_i(score, k);
            self.next_d(score, k);
            self.next_m(score, k);
        }
        true
    }

    /// `I[s][k]` from a gap open on `M[s-o-e][k-1]` or an extension of
    /// `I[s-e][k-1]`; consumes one symbol of sequence2.
    fn next_i(&mut self, score: usize, k: i32) {
        let s = score as isize;
        let oe = self.penalty.gap_open_extend() as isize;
        let e = self.penalty.gap_extend as isize;

        let candidates = [
            self.m.get(s - oe, k - 1).map(|(h, _)| (h + 1, Traceback::OpenIns)),
            self.i.get(s - e, k - 1).map(|(h, _)| (h + 1, Traceback::ExtdIns)),
        ];
        if let Some((h, tag)) = self.pick(k, candidates) {
            self.i.set(score, k, h, tag);
        }
    }

    /// `D[s][k]` from a gap open on `M[s-o-e][k+1]` or an extension of
    /// `D[s-e][k+1]`; the diagonal shift consumes one symbol of sequence1.
    fn next_d(&mut self, score: usize, k: i32) {
        let s = score as isize;
        let oe = self.penalty.gap_open_extend() as isize;
        let e = self.penalty.gap_extend as isize;

        let candidates = [
            self.m.get(s - oe, k + 1).map(|(h, _)| (h, Traceback::OpenDel)),
            self.d.get(s - e, k + 1).map(|(h, _)| (h, Traceback::ExtdDel)),
        ];
        if let Some((h, tag)) = self.pick(k, candidates) {
            self.d.set(score, k, h, tag);
        }
    }

    /// `M[s][k]` from a mismatch on `M[s-x][k]` or the `I`/`D` cells just
    /// computed for this score.
    fn next_m(&mut self, score: usize, k: i32) {
        let s = score as isize;
        let x = self.penalty.mismatch as isize;

        let candidates = [
            self.m.get(s - x, k).map(|(h, _)| (h + 1, Traceback::Sub)),
            self.i.get(s, k).map(|(h, _)| (h, Traceback::Ins)),
            self.d.get(s, k).map(|(h, _)| (h, Traceback::Del)),
        ];
        if let Some((h, tag)) = self.pick(k, candidates) {
            self.m.set(score, k, h, tag);
        }
    }

    /// Largest admissible offset; on ties the earliest candidate wins.
    #[inline(always)]
    fn pick<const N: usize>(
        &self,
        k: i32,
        candidates: [Option<(u32, Traceback)>; N],
    ) -> Option<(u32, Traceback)> {
        let mut best: Option<(u32, Traceback)> = None;
        for (h, tag) in candidates.into_iter().flatten() {
            if !self.fits(k, h) {
                continue;
            }
            if best.map_or(true, |(best_h, _)| h > best_h) {
                best = Some((h, tag));
            }
        }
        best
    }
}

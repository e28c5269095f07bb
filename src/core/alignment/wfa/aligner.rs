//! Score loop driving extend / next until the end cell is reached.

use super::context::{Matrix, WavefrontContext};
use super::penalty::Penalty;
use crate::core::alignment::cigar::EditScript;

/// Result of one global alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    /// Total gap-affine penalty of the optimal alignment.
    pub score: usize,
    /// Empty unless an edit script was requested.
    pub edit_script: EditScript,
}

impl Alignment {
    /// The edit script as a run-length string (`""` when not requested).
    pub fn cigar(&self) -> String {
        self.edit_script.to_string()
    }
}

/// Optimal global alignment of `seq1` (vertical) against `seq2`
/// (horizontal) under `penalty`.
///
/// Expects `penalty.mismatch` and `penalty.gap_extend` to be positive and
/// both lengths to fit a packed offset; `crate::align_sequences` checks
/// both before calling in here.
pub fn align(seq1: &[u8], seq2: &[u8], penalty: &Penalty, want_edit_script: bool) -> Alignment {
    align_with_hint(seq1, seq2, penalty, want_edit_script, None)
}

/// [`align`] with an optional number of scores to preallocate.
pub fn align_with_hint(
    seq1: &[u8],
    seq2: &[u8],
    penalty: &Penalty,
    want_edit_script: bool,
    score_hint: Option<usize>,
) -> Alignment {
    let mut ctx = WavefrontContext::new(seq1, seq2, *penalty);
    if let Some(hint) = score_hint {
        ctx.preallocate(hint);
    }

    let score = ctx.run();

    log::debug!(
        "wfa: n={} m={} score={} wavefronts={}",
        seq1.len(),
        seq2.len(),
        score,
        ctx.component(Matrix::M).populated_scores(score)
    );
    if log::log_enabled!(log::Level::Trace) {
        log::trace!("M wavefronts:\n{}", ctx.component(Matrix::M).render(score));
        log::trace!("I wavefronts:\n{}", ctx.component(Matrix::I).render(score));
        log::trace!("D wavefronts:\n{}", ctx.component(Matrix::D).render(score));
    }

    let edit_script = if want_edit_script {
        ctx.backtrace(score)
    } else {
        EditScript::new()
    };

    Alignment { score, edit_script }
}

impl WavefrontContext<'_> {
    /// Alternate extend and next with increasing score until `M` reaches
    /// the end cell; returns that score.
    pub fn run(&mut self) -> usize {
        let mut score = 0;
        loop {
            self.extend(score);
            if self.reached_end(score) {
                return score;
            }
            score += 1;
            self.next(score);
        }
    }
}

/// Rough optimal-score guess used to size the score axis up front:
/// the unavoidable length-difference gap plus `divergence * min(n, m)`
/// mismatches.
pub fn estimate_score(n: usize, m: usize, penalty: &Penalty, divergence: f32) -> usize {
    let gap = penalty.gap_cost(n.abs_diff(m));
    let mismatches = (divergence.clamp(0.0, 1.0) as f64 * n.min(m) as f64).ceil() as u64;
    gap.saturating_add(mismatches.saturating_mul(penalty.mismatch as u64))
        .try_into()
        .unwrap_or(usize::MAX)
}

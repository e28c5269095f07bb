//! Edit-script reconstruction from the traceback tags.

use super::context::{Matrix, WavefrontContext};
use super::packed::Traceback;
use crate::core::alignment::cigar::{EditOp, EditScript};

impl WavefrontContext<'_> {
    /// Walk back from the terminal cell `M[score][m - n]` to the score-0
    /// anchor and return the edit script in forward order.
    ///
    /// # Panics
    ///
    /// If the chain reaches a cell that was never written. That can only
    /// happen when the recurrences are broken, never because of the input.
    pub fn backtrace(&self, score: usize) -> EditScript {
        let x = self.penalty.mismatch as isize;
        let oe = self.penalty.gap_open_extend() as isize;
        let e = self.penalty.gap_extend as isize;

        let mut s = score as isize;
        let mut k = self.target_diagonal();
        let (mut offset, mut tag) = self.traced_cell(Matrix::M, s, k);
        let mut script = EditScript::with_capacity(16);

        loop {
            match tag {
                Traceback::OpenIns => {
                    script.push(EditOp::I, 1);
                    s -= oe;
                    k -= 1;
                    (offset, tag) = self.traced_cell(Matrix::M, s, k);
                }
                Traceback::ExtdIns => {
                    script.push(EditOp::I, 1);
                    s -= e;
                    k -= 1;
                    (offset, tag) = self.traced_cell(Matrix::I, s, k);
                }
                Traceback::OpenDel => {
                    script.push(EditOp::D, 1);
                    s -= oe;
                    k += 1;
                    (offset, tag) = self.traced_cell(Matrix::M, s, k);
                }
                Traceback::ExtdDel => {
                    script.push(EditOp::D, 1);
                    s -= e;
                    k += 1;
                    (offset, tag) = self.traced_cell(Matrix::D, s, k);
                }
                Traceback::Sub => {
                    s -= x;
                    let (next_offset, next_tag) = self.traced_cell(Matrix::M, s, k);
                    // the mismatch itself advanced the offset by one
                    let matches = run_length(offset, next_offset + 1, s, k);
                    script.push(EditOp::M, matches);
                    script.push(EditOp::X, 1);
                    (offset, tag) = (next_offset, next_tag);
                }
                Traceback::Ins | Traceback::Del => {
                    let from = if tag == Traceback::Ins { Matrix::I } else { Matrix::D };
                    let (next_offset, next_tag) = self.traced_cell(from, s, k);
                    script.push(EditOp::M, run_length(offset, next_offset, s, k));
                    (offset, tag) = (next_offset, next_tag);
                }
                Traceback::End => {
                    script.push(EditOp::M, offset);
                    break;
                }
            }
        }

        script.reverse();
        script
    }

    fn traced_cell(&self, matrix: Matrix, score: isize, k: i32) -> (u32, Traceback) {
        match self.component(matrix).get(score, k) {
            Some(cell) => cell,
            None => panic!(
                "backtrace reached unset cell {matrix:?}[{score}][{k}] (n={}, m={})",
                self.seq1.len(),
                self.seq2.len()
            ),
        }
    }
}

/// Matches slid over between two offsets on one diagonal.
#[inline(always)]
fn run_length(offset: u32, from: u32, score: isize, k: i32) -> u32 {
    match offset.checked_sub(from) {
        Some(len) => len,
        None => panic!("backtrace offset went backwards at [{score}][{k}]: {offset} < {from}"),
    }
}

#[cfg(test)]
mod tests {
    use super::super::penalty::Penalty;
    use super::*;

    fn run(seq1: &[u8], seq2: &[u8], penalty: Penalty) -> (usize, String) {
        let mut ctx = WavefrontContext::new(seq1, seq2, penalty);
        let mut score = 0;
        loop {
            ctx.extend(score);
            if ctx.reached_end(score) {
                break;
            }
            score += 1;
            ctx.next(score);
        }
        (score, ctx.backtrace(score).to_string())
    }

    #[test]
    fn test_backtrace_identity() {
        assert_eq!(run(b"ACGTACGT", b"ACGTACGT", Penalty::new(0, 4, 6, 2)), (0, "8M".to_string()));
    }

    #[test]
    fn test_backtrace_single_mismatch() {
        assert_eq!(run(b"ACGTACGT", b"ACGAACGT", Penalty::new(0, 4, 6, 2)), (4, "3M1X4M".to_string()));
    }

    #[test]
    fn test_backtrace_leading_mismatch() {
        assert_eq!(run(b"TCG", b"ACG", Penalty::new(0, 4, 6, 2)), (4, "1X2M".to_string()));
    }

    #[test]
    fn test_backtrace_insertion_and_deletion() {
        // one extra G; the gap lands after the longest common prefix
        assert_eq!(run(b"ACGT", b"ACGGT", Penalty::new(0, 4, 6, 2)), (8, "3M1I1M".to_string()));
        assert_eq!(run(b"ACGGT", b"ACGT", Penalty::new(0, 4, 6, 2)), (8, "3M1D1M".to_string()));
    }

    #[test]
    fn test_backtrace_gap_extension() {
        // a 3-long gap: 6 + 3*2 = 12 beats three mismatches plus a gap
        let (score, script) = run(b"AAAA", b"AAAACCC", Penalty::new(0, 4, 6, 2));
        assert_eq!(score, 12);
        assert_eq!(script, "4M3I");

        let (score, script) = run(b"AAAACCC", b"AAAA", Penalty::new(0, 4, 6, 2));
        assert_eq!(score, 12);
        assert_eq!(script, "4M3D");
    }

    #[test]
    fn test_backtrace_empty_sequences() {
        assert_eq!(run(b"", b"", Penalty::new(0, 4, 6, 2)), (0, String::new()));
        assert_eq!(run(b"", b"AC", Penalty::new(0, 4, 6, 2)), (10, "2I".to_string()));
        assert_eq!(run(b"ACG", b"", Penalty::new(0, 4, 6, 2)), (12, "3D".to_string()));
    }

    #[test]
    #[should_panic(expected = "backtrace reached unset cell")]
    fn test_backtrace_panics_on_unset_cell() {
        let ctx = WavefrontContext::new(b"AC", b"AG", Penalty::new(0, 4, 6, 2));
        ctx.backtrace(4);
    }
}

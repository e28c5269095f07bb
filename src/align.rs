// src/align.rs
//
// Validated entry point: checks options and sequence lengths, then hands the
// request to the wavefront core.

use crate::align_opt::AlignOpt;
use crate::core::alignment::wfa::aligner::{self, Alignment};
use crate::core::alignment::wfa::packed::MAX_OFFSET;
use crate::error::{Result, WfaError};

/// Globally align `seq1` (vertical) against `seq2` (horizontal).
///
/// Symbols are compared byte for byte; case and alphabet are the caller's
/// business.
///
/// # Errors
///
/// [`WfaError::InvalidPenalty`] for a zero mismatch or gap-extend penalty and
/// [`WfaError::SequenceTooLong`] when either sequence exceeds the largest
/// offset a packed cell can hold.
pub fn align_sequences(seq1: &[u8], seq2: &[u8], opt: &AlignOpt) -> Result<Alignment> {
    opt.validate()?;
    check_length("sequence1", seq1.len())?;
    check_length("sequence2", seq2.len())?;

    let hint = opt.preallocate.then(|| {
        aligner::estimate_score(seq1.len(), seq2.len(), &opt.penalty, opt.expected_divergence)
    });

    Ok(aligner::align_with_hint(
        seq1,
        seq2,
        &opt.penalty,
        opt.edit_script,
        hint,
    ))
}

fn check_length(which: &'static str, len: usize) -> Result<()> {
    if len > MAX_OFFSET as usize {
        return Err(WfaError::SequenceTooLong {
            which,
            len,
            max: MAX_OFFSET as usize,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alignment::wfa::penalty::Penalty;

    #[test]
    fn test_align_sequences_default_penalties() {
        let result = align_sequences(b"ACGTACGT", b"ACGAACGT", &AlignOpt::default()).unwrap();
        assert_eq!(result.score, 4);
        assert_eq!(result.cigar(), "3M1X4M");
    }

    #[test]
    fn test_align_sequences_preallocated() {
        let opt = AlignOpt {
            preallocate: true,
            ..AlignOpt::default()
        };
        let result = align_sequences(b"GATTACA", b"GATCACA", &opt).unwrap();
        assert_eq!(result.score, 4);
        assert_eq!(result.cigar(), "3M1X3M");
    }

    #[test]
    fn test_preallocate_with_huge_mismatch_penalty() {
        // the estimate is ~1e12 scores; preallocation must stay a hint
        let seq1 = vec![b'A'; 1000];
        let mut seq2 = seq1.clone();
        seq2[500] = b'C';
        let penalty = Penalty::new(0, 1_000_000_000, 6, 2);

        let plain = align_sequences(&seq1, &seq2, &AlignOpt::with_penalty(penalty)).unwrap();
        let opt = AlignOpt {
            preallocate: true,
            expected_divergence: 1.0,
            ..AlignOpt::with_penalty(penalty)
        };
        let preallocated = align_sequences(&seq1, &seq2, &opt).unwrap();

        // one deletion plus one insertion beats the mismatch
        assert_eq!(plain.score, 16);
        assert_eq!(preallocated, plain);
    }

    #[test]
    fn test_align_sequences_rejects_bad_penalty() {
        let opt = AlignOpt::with_penalty(Penalty::new(0, 0, 6, 2));
        let err = align_sequences(b"A", b"A", &opt).unwrap_err();
        assert!(matches!(err, WfaError::InvalidPenalty { .. }), "{err}");
    }

    #[test]
    fn test_check_length_limit() {
        assert!(check_length("sequence1", 4).is_ok());
        assert!(check_length("sequence2", MAX_OFFSET as usize).is_ok());
        match check_length("sequence1", MAX_OFFSET as usize + 1) {
            Err(WfaError::SequenceTooLong { which, len, max }) => {
                assert_eq!(which, "sequence1");
                assert_eq!(len, MAX_OFFSET as usize + 1);
                assert_eq!(max, MAX_OFFSET as usize);
            }
            other => panic!("expected SequenceTooLong, got {other:?}"),
        }
    }
}

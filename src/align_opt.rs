// src/align_opt.rs
//
// Options for one alignment request (penalties plus driver knobs).

use crate::core::alignment::wfa::penalty::Penalty;
use crate::defaults;
use crate::error::{Result, WfaError};

/// Alignment options.
#[derive(Debug, Clone)]
pub struct AlignOpt {
    pub penalty: Penalty,
    pub edit_script: bool, // Reconstruct the edit script (false = score only)
    pub preallocate: bool, // Size the score axis from estimate_score() up front
    pub expected_divergence: f32, // Mismatch fraction assumed by the estimate
    pub threads: Option<usize>, // Worker threads for batch alignment (None = rayon default)
}

impl Default for AlignOpt {
    fn default() -> Self {
        Self {
            penalty: Penalty::default(),
            edit_script: true,
            preallocate: false,
            expected_divergence: defaults::EXPECTED_DIVERGENCE,
            threads: None,
        }
    }
}

impl AlignOpt {
    /// Options with `penalty` and everything else at its default.
    pub fn with_penalty(penalty: Penalty) -> Self {
        Self {
            penalty,
            ..Self::default()
        }
    }

    /// Parse penalties from a comma-separated string (e.g., "0,4,6,2").
    /// Returns (match, mismatch, gap open, gap extend).
    pub fn parse_penalties(s: &str) -> std::result::Result<Penalty, String> {
        Penalty::parse(s)
    }

    /// Reject penalties the score loop cannot make progress with.
    ///
    /// A zero mismatch or zero gap extension lets `next()` copy a wavefront
    /// onto the same score it came from, so the loop would never advance.
    pub fn validate(&self) -> Result<()> {
        if self.penalty.mismatch == 0 {
            return Err(WfaError::InvalidPenalty {
                field: "mismatch",
                value: self.penalty.mismatch,
                reason: "must be at least 1",
            });
        }
        if self.penalty.gap_extend == 0 {
            return Err(WfaError::InvalidPenalty {
                field: "gap extend",
                value: self.penalty.gap_extend,
                reason: "must be at least 1",
            });
        }
        if self.penalty.gap_open.checked_add(self.penalty.gap_extend).is_none() {
            return Err(WfaError::InvalidPenalty {
                field: "gap open",
                value: self.penalty.gap_open,
                reason: "gap open plus gap extend overflows",
            });
        }
        if self.expected_divergence.is_nan() || !(0.0..=1.0).contains(&self.expected_divergence) {
            log::warn!(
                "expected divergence {} outside [0, 1], preallocation estimate will be clamped",
                self.expected_divergence
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opt = AlignOpt::default();
        assert_eq!(opt.penalty, Penalty::new(0, 4, 6, 2));
        assert!(opt.edit_script);
        assert!(!opt.preallocate);
        assert!(opt.threads.is_none());
        assert!(opt.validate().is_ok());
    }

    #[test]
    fn test_parse_penalties_matches_default_string() {
        assert_eq!(
            AlignOpt::parse_penalties(defaults::PENALTIES),
            Ok(Penalty::default())
        );
        assert!(AlignOpt::parse_penalties("a,b,c,d").is_err());
    }

    #[test]
    fn test_validate_rejects_zero_mismatch_and_extend() {
        let opt = AlignOpt::with_penalty(Penalty::new(0, 0, 6, 2));
        match opt.validate() {
            Err(WfaError::InvalidPenalty { field, .. }) => assert_eq!(field, "mismatch"),
            other => panic!("expected InvalidPenalty, got {other:?}"),
        }

        let opt = AlignOpt::with_penalty(Penalty::new(0, 4, 6, 0));
        match opt.validate() {
            Err(WfaError::InvalidPenalty { field, .. }) => assert_eq!(field, "gap extend"),
            other => panic!("expected InvalidPenalty, got {other:?}"),
        }

        // zero gap open is fine, it degenerates to linear gaps
        assert!(AlignOpt::with_penalty(Penalty::new(0, 1, 0, 1)).validate().is_ok());
    }
}

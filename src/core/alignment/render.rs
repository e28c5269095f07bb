//! Three-line textual view of an alignment.
//!
//! ```text
//! ACG-T      sequence1, '-' where sequence2 has an insertion
//! ||| |      '|' for matches and deletions, ' ' for mismatches and insertions
//! ACGGT      sequence2, '-' where sequence1 has a deletion
//! ```

use std::fmt;

use super::cigar::{EditOp, EditScript};
use crate::error::Result;

/// The three rendered rows, all of equal length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedAlignment {
    pub sequence1: String,
    pub matches: String,
    pub sequence2: String,
}

impl fmt::Display for RenderedAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.sequence1)?;
        writeln!(f, "{}", self.matches)?;
        write!(f, "{}", self.sequence2)
    }
}

/// Render `script` over `seq1` and `seq2`.
///
/// # Errors
/// [`crate::WfaError::EditScriptMismatch`] if the script does not consume
/// exactly both sequences.
pub fn render_alignment(seq1: &[u8], seq2: &[u8], script: &EditScript) -> Result<RenderedAlignment> {
    script.check_coverage(seq1.len(), seq2.len())?;

    let width = script.ops().count();
    let mut sequence1 = String::with_capacity(width);
    let mut matches = String::with_capacity(width);
    let mut sequence2 = String::with_capacity(width);

    let mut i = 0usize; // sequence1 index
    let mut j = 0usize; // sequence2 index

    for op in script.ops() {
        match op {
            EditOp::M | EditOp::X => {
                sequence1.push(seq1[i] as char);
                matches.push(if op == EditOp::M { '|' } else { ' ' });
                sequence2.push(seq2[j] as char);
                i += 1;
                j += 1;
            }
            EditOp::I => {
                sequence1.push('-');
                matches.push(' ');
                sequence2.push(seq2[j] as char);
                j += 1;
            }
            EditOp::D => {
                sequence1.push(seq1[i] as char);
                matches.push('|');
                sequence2.push('-');
                i += 1;
            }
        }
    }

    Ok(RenderedAlignment {
        sequence1,
        matches,
        sequence2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WfaError;

    #[test]
    fn test_render_all_ops() {
        let script: EditScript = "2M1X1I1D1M".parse().unwrap();
        let rendered = render_alignment(b"ACGTA", b"ACTGA", &script).unwrap();
        assert_eq!(rendered.sequence1, "ACG-TA");
        assert_eq!(rendered.matches, "||  ||");
        assert_eq!(rendered.sequence2, "ACTG-A");
        assert_eq!(rendered.to_string(), "ACG-TA\n||  ||\nACTG-A");
    }

    #[test]
    fn test_render_empty() {
        let rendered = render_alignment(b"", b"", &EditScript::new()).unwrap();
        assert_eq!(rendered.to_string(), "\n\n");
    }

    #[test]
    fn test_render_rejects_partial_coverage() {
        let script: EditScript = "3M".parse().unwrap();
        let err = render_alignment(b"ACGT", b"ACG", &script).unwrap_err();
        assert!(matches!(
            err,
            WfaError::EditScriptMismatch {
                expected: (4, 3),
                actual: (3, 3)
            }
        ));
    }
}

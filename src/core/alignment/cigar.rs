//! Edit scripts - run-length encoded alignment operations
//!
//! An edit script is a CIGAR-like list of `(op, len)` runs over the
//! alphabet `M` (match), `X` (mismatch), `I` (insertion, consumes
//! sequence2) and `D` (deletion, consumes sequence1). Serialized as
//! `<len><op>` pairs, e.g. `"12M3X5I2M"`.

use std::fmt::{self, Write};
use std::str::FromStr;

use crate::core::alignment::wfa::penalty::Penalty;
use crate::error::{Result, WfaError};

/// Edit operation with zero-cost conversion to/from bytes
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EditOp {
    M = b'M', // Match
    X = b'X', // Mismatch
    I = b'I', // Insertion (symbol of sequence2 only)
    D = b'D', // Deletion (symbol of sequence1 only)
}

impl EditOp {
    #[inline(always)]
    pub const fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'M' => Some(Self::M),
            b'X' => Some(Self::X),
            b'I' => Some(Self::I),
            b'D' => Some(Self::D),
            _ => None,
        }
    }

    #[inline(always)]
    pub const fn to_byte(self) -> u8 {
        self as u8
    }

    #[inline(always)]
    pub const fn as_char(self) -> char {
        self as u8 as char
    }

    /// Returns true if this operation consumes a symbol of sequence1
    #[inline(always)]
    pub const fn consumes_sequence1(self) -> bool {
        matches!(self, Self::M | Self::X | Self::D)
    }

    /// Returns true if this operation consumes a symbol of sequence2
    #[inline(always)]
    pub const fn consumes_sequence2(self) -> bool {
        matches!(self, Self::M | Self::X | Self::I)
    }

    /// Insertions become deletions and vice versa (swapping the sequences).
    #[inline(always)]
    pub const fn swapped(self) -> Self {
        match self {
            Self::I => Self::D,
            Self::D => Self::I,
            op => op,
        }
    }
}

/// Run-length encoded edit script. Adjacent runs always hold different
/// operations and no run is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EditScript {
    runs: Vec<(EditOp, u32)>,
}

impl EditScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            runs: Vec::with_capacity(capacity),
        }
    }

    /// Append `len` copies of `op`, merging into the last run when it holds
    /// the same operation. Zero-length runs are dropped.
    #[inline]
    pub fn push(&mut self, op: EditOp, len: u32) {
        if len == 0 {
            return;
        }
        match self.runs.last_mut() {
            Some((last, count)) if *last == op => *count += len,
            _ => self.runs.push((op, len)),
        }
    }

    /// [`Self::push`] that refuses to overflow a merged run length.
    fn try_push(&mut self, op: EditOp, len: u32) -> Option<()> {
        match self.runs.last_mut() {
            Some((last, count)) if *last == op => *count = count.checked_add(len)?,
            _ if len == 0 => {}
            _ => self.runs.push((op, len)),
        }
        Some(())
    }

    /// Reverse run order (the backtrace builds scripts end-first).
    #[inline]
    pub fn reverse(&mut self) {
        self.runs.reverse();
    }

    pub fn runs(&self) -> &[(EditOp, u32)] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Iterate one operation per alignment column.
    pub fn ops(&self) -> impl Iterator<Item = EditOp> + '_ {
        self.runs
            .iter()
            .flat_map(|&(op, len)| std::iter::repeat(op).take(len as usize))
    }

    /// Number of sequence1 symbols consumed (M, X, D).
    pub fn len_sequence1(&self) -> usize {
        self.runs
            .iter()
            .filter(|(op, _)| op.consumes_sequence1())
            .map(|&(_, len)| len as usize)
            .sum()
    }

    /// Number of sequence2 symbols consumed (M, X, I).
    pub fn len_sequence2(&self) -> usize {
        self.runs
            .iter()
            .filter(|(op, _)| op.consumes_sequence2())
            .map(|&(_, len)| len as usize)
            .sum()
    }

    /// Total length of all runs of `op`.
    pub fn count(&self, op: EditOp) -> usize {
        self.runs
            .iter()
            .filter(|(o, _)| *o == op)
            .map(|&(_, len)| len as usize)
            .sum()
    }

    /// The script describing the same alignment with the sequences swapped.
    pub fn swapped(&self) -> Self {
        Self {
            runs: self.runs.iter().map(|&(op, len)| (op.swapped(), len)).collect(),
        }
    }

    /// Replay the penalty model over this script: `match_penalty` per M,
    /// `mismatch` per X, `gap_open + gap_extend` for the first position of
    /// a gap run and `gap_extend` for every further position.
    pub fn score(&self, penalty: &Penalty) -> u64 {
        score_ops(self.ops().map(Some), penalty)
    }

    /// Check the script consumes exactly `n` symbols of sequence1 and `m`
    /// of sequence2.
    pub fn check_coverage(&self, n: usize, m: usize) -> Result<()> {
        let actual = (self.len_sequence1(), self.len_sequence2());
        if actual == (n, m) {
            Ok(())
        } else {
            Err(WfaError::EditScriptMismatch {
                expected: (n, m),
                actual,
            })
        }
    }

    /// Write to an existing string buffer (avoids allocation).
    pub fn write_to_string(&self, buf: &mut String) {
        for &(op, len) in &self.runs {
            // Writing to a String cannot fail.
            let _ = write!(buf, "{}{}", len, op.as_char());
        }
    }
}

impl fmt::Display for EditScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &(op, len) in &self.runs {
            write!(f, "{}{}", len, op.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for EditScript {
    type Err = WfaError;

    /// Strict parse: every operation needs a count, only `MXID` are
    /// accepted, and the string cannot end in digits.
    fn from_str(s: &str) -> Result<Self> {
        let malformed = |reason: String| WfaError::MalformedEditScript {
            script: s.to_string(),
            reason,
        };

        let mut script = EditScript::new();
        let mut len: Option<u32> = None;
        for (pos, b) in s.bytes().enumerate() {
            if b.is_ascii_digit() {
                let digit = (b - b'0') as u32;
                let next = len
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(digit))
                    .ok_or_else(|| malformed(format!("run length overflow at byte {pos}")))?;
                len = Some(next);
                continue;
            }
            let op = EditOp::from_byte(b)
                .ok_or_else(|| malformed(format!("unknown operation {:?} at byte {pos}", b as char)))?;
            let run = len
                .take()
                .ok_or_else(|| malformed(format!("operation {:?} without a count", op.as_char())))?;
            script.try_push(op, run).ok_or_else(|| {
                malformed(format!("merged {:?} run overflows at byte {pos}", op.as_char()))
            })?;
        }
        if len.is_some() {
            return Err(malformed("trailing run length without an operation".to_string()));
        }
        Ok(script)
    }
}

/// Expand a run-length string into one character per position, e.g.
/// `"3M1X"` into `"MMMX"`.
///
/// Lenient by construction: any character repeats as many times as the
/// digits before it say, and a character without digits repeats zero times.
/// Use [`EditScript::from_str`] for validation.
pub fn decode_run_length(encoded: &str) -> String {
    let bytes = encoded.as_bytes();
    let mut decoded = String::with_capacity(encoded.len() * 4);
    let mut i = 0;

    while i < bytes.len() {
        let mut run_length: usize = 0;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            run_length = run_length
                .saturating_mul(10)
                .saturating_add((bytes[i] - b'0') as usize);
            i += 1;
        }
        if let Some(c) = encoded[i..].chars().next() {
            decoded.extend(std::iter::repeat(c).take(run_length));
            i += c.len_utf8();
        }
    }
    decoded
}

/// Replay the penalty model over a decoded run-length string. Characters
/// other than `MXID` are ignored and break gap runs.
pub fn score_edit_script(encoded: &str, penalty: &Penalty) -> u64 {
    let decoded = decode_run_length(encoded);
    score_ops(decoded.bytes().map(EditOp::from_byte), penalty)
}

/// `None` entries score nothing and end the current gap run.
fn score_ops(ops: impl Iterator<Item = Option<EditOp>>, penalty: &Penalty) -> u64 {
    let mut previous: Option<EditOp> = None;
    let mut score = 0u64;
    for op in ops {
        let Some(op) = op else {
            previous = None;
            continue;
        };
        score += match op {
            EditOp::M => penalty.match_penalty as u64,
            EditOp::X => penalty.mismatch as u64,
            EditOp::I | EditOp::D if previous == Some(op) => penalty.gap_extend as u64,
            EditOp::I | EditOp::D => penalty.gap_open_extend() as u64,
        };
        previous = Some(op);
    }
    score
}

//! Error types for ferrous-wfa

/// Result type alias for ferrous-wfa operations
pub type Result<T> = std::result::Result<T, WfaError>;

/// Errors surfaced by the boundary layer. The wavefront core itself never
/// fails on validated input.
#[derive(Debug, thiserror::Error)]
pub enum WfaError {
    #[error("invalid {field} penalty {value}: {reason}")]
    InvalidPenalty {
        field: &'static str,
        value: u32,
        reason: &'static str,
    },

    #[error("{which} has length {len}, the maximum alignable length is {max}")]
    SequenceTooLong {
        which: &'static str,
        len: usize,
        max: usize,
    },

    #[error("malformed edit script {script:?}: {reason}")]
    MalformedEditScript { script: String, reason: String },

    #[error("edit script consumes {actual:?} symbols, sequences have {expected:?}")]
    EditScriptMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("parse error at line {line}: {msg}")]
    Parse { line: usize, msg: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

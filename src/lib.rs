//! Gap-affine global pairwise alignment with the wavefront algorithm (WFA).
//!
//! ```
//! use ferrous_wfa::{align_sequences, AlignOpt};
//!
//! let result = align_sequences(b"GATTACA", b"GATCACA", &AlignOpt::default()).unwrap();
//! assert_eq!(result.score, 4);
//! assert_eq!(result.cigar(), "3M1X3M");
//! ```

pub mod align;
pub mod align_opt;
pub mod batch;
pub mod core;
pub mod defaults;
pub mod error;

pub use align::align_sequences;
pub use align_opt::AlignOpt;
pub use crate::core::alignment::cigar::{decode_run_length, score_edit_script, EditOp, EditScript};
pub use crate::core::alignment::render::{render_alignment, RenderedAlignment};
pub use crate::core::alignment::wfa::{align, Alignment, Penalty};
pub use error::{Result, WfaError};

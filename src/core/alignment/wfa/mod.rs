//! Wavefront alignment (WFA) for gap-affine global alignment.
//!
//! Instead of filling the full `n x m` dynamic-programming matrix, WFA
//! tracks, per score and per diagonal, the furthest-reaching cell of the
//! match (`M`), insertion (`I`) and deletion (`D`) matrices. Runtime is
//! `O(n * s)` for optimal score `s`, which makes similar sequences cheap.

pub mod aligner;
pub mod backtrace;
pub mod context;
pub mod growable;
pub mod packed;
pub mod penalty;
pub mod wavefront;

pub use aligner::{align, align_with_hint, estimate_score, Alignment};
pub use context::{Matrix, WavefrontContext};
pub use packed::{PackedCell, Traceback, MAX_OFFSET};
pub use penalty::Penalty;
pub use wavefront::{Wavefront, WavefrontComponent};

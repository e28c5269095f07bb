//! Core alignment kernels: the wavefront aligner plus edit-script helpers.
//!
//! Nothing in here validates input; the boundary checks live in
//! [`crate::align`].

pub mod cigar;
pub mod render;
pub mod wfa;

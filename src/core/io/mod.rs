//! Readers for the pairwise test-corpus files.

pub mod pairs;

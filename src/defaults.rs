// src/defaults.rs

// Scoring Constants (costs, lower is better)
pub const MATCH_PENALTY: u32 = 0;
pub const MISMATCH_PENALTY: u32 = 4;
pub const GAP_OPEN_PENALTY: u32 = 6;
pub const GAP_EXTEND_PENALTY: u32 = 2;
pub const PENALTIES: &str = "0,4,6,2";

// Preallocation
pub const EXPECTED_DIVERGENCE: f32 = 0.05;

// Other Constants
pub const VERBOSITY: i32 = 3;

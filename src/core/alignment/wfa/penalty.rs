//! Gap-affine penalties.

use crate::defaults;

/// Gap-affine penalty model. All values are costs (non-negative); a gap of
/// length `l` costs `gap_open + l * gap_extend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Penalty {
    /// Cost of a matching position. Never used by the recurrence, only when
    /// replaying an edit script.
    pub match_penalty: u32,
    pub mismatch: u32,
    pub gap_open: u32,
    pub gap_extend: u32,
}

impl Default for Penalty {
    fn default() -> Self {
        Self {
            match_penalty: defaults::MATCH_PENALTY,
            mismatch: defaults::MISMATCH_PENALTY,
            gap_open: defaults::GAP_OPEN_PENALTY,
            gap_extend: defaults::GAP_EXTEND_PENALTY,
        }
    }
}

impl Penalty {
    pub const fn new(match_penalty: u32, mismatch: u32, gap_open: u32, gap_extend: u32) -> Self {
        Self {
            match_penalty,
            mismatch,
            gap_open,
            gap_extend,
        }
    }

    /// Cost of opening a gap, including its first position.
    #[inline(always)]
    pub const fn gap_open_extend(&self) -> u32 {
        self.gap_open + self.gap_extend
    }

    /// Cost of a gap of `len` positions; zero for an empty gap.
    pub fn gap_cost(&self, len: usize) -> u64 {
        if len == 0 {
            0
        } else {
            self.gap_open as u64 + self.gap_extend as u64 * len as u64
        }
    }

    /// Parse `"M,X,O,E"` (match, mismatch, gap open, gap extend).
    pub fn parse(s: &str) -> Result<Self, String> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(format!("Penalties must be M,X,O,E: {}", s));
        }
        let mut values = [0u32; 4];
        for (value, (part, name)) in values
            .iter_mut()
            .zip(parts.iter().zip(["match", "mismatch", "gap open", "gap extend"]))
        {
            *value = part
                .parse::<u32>()
                .map_err(|_| format!("Invalid {} penalty: {}", name, part))?;
        }
        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }
}

//! Bit-packed wavefront cells.
//!
//! Every cell of every wavefront is a single `u32`:
//!
//! ```text
//!  31 | 30..28 | 27..0
//! ----+--------+---------
//!  V  |  tag   | offset
//! ```
//!
//! `V` is the validity flag. The all-zero word is the invalid cell, which is
//! also `PackedCell::default()`, so freshly allocated wavefront buffers are
//! invalid without an extra validity array.

const VALID_BIT: u32 = 1 << 31;
const TAG_SHIFT: u32 = 28;
const TAG_MASK: u32 = 0b111 << TAG_SHIFT;
const OFFSET_BITS: u32 = 28;

/// Largest offset a cell can hold (2^28 - 1). Sequences longer than this are
/// rejected before alignment starts.
pub const MAX_OFFSET: u32 = (1 << OFFSET_BITS) - 1;

/// Which branch of the recurrence produced a cell.
///
/// `I` cells only carry `OpenIns`/`ExtdIns`, `D` cells only
/// `OpenDel`/`ExtdDel`; `M` cells carry `Sub`, `Ins`, `Del` or the `End`
/// anchor at score 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Traceback {
    OpenIns = 0,
    ExtdIns = 1,
    OpenDel = 2,
    ExtdDel = 3,
    Sub = 4,
    Ins = 5,
    Del = 6,
    End = 7,
}

impl Traceback {
    pub const ALL: [Traceback; 8] = [
        Traceback::OpenIns,
        Traceback::ExtdIns,
        Traceback::OpenDel,
        Traceback::ExtdDel,
        Traceback::Sub,
        Traceback::Ins,
        Traceback::Del,
        Traceback::End,
    ];

    #[inline(always)]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => Traceback::OpenIns,
            1 => Traceback::ExtdIns,
            2 => Traceback::OpenDel,
            3 => Traceback::ExtdDel,
            4 => Traceback::Sub,
            5 => Traceback::Ins,
            6 => Traceback::Del,
            _ => Traceback::End,
        }
    }

    /// Two-letter code used by the wavefront dumps.
    pub const fn code(self) -> &'static str {
        match self {
            Traceback::OpenIns => "OI",
            Traceback::ExtdIns => "EI",
            Traceback::OpenDel => "OD",
            Traceback::ExtdDel => "ED",
            Traceback::Sub => "SB",
            Traceback::Ins => "IN",
            Traceback::Del => "DL",
            Traceback::End => "EN",
        }
    }
}

/// A single wavefront cell: validity, traceback tag and offset in one word.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct PackedCell(u32);

impl PackedCell {
    pub const INVALID: PackedCell = PackedCell(0);

    /// Pack an offset and tag into a valid cell.
    ///
    /// Offsets above [`MAX_OFFSET`] would bleed into the tag bits; the
    /// boundary layer keeps sequence lengths below it.
    #[inline(always)]
    pub const fn pack(offset: u32, tag: Traceback) -> Self {
        debug_assert!(offset <= MAX_OFFSET);
        PackedCell(VALID_BIT | ((tag as u32) << TAG_SHIFT) | (offset & MAX_OFFSET))
    }

    /// Inverse of [`PackedCell::pack`]. Offset and tag are meaningless when
    /// the cell is invalid.
    #[inline(always)]
    pub const fn unpack(self) -> (bool, u32, Traceback) {
        (self.is_valid(), self.offset(), self.tag())
    }

    #[inline(always)]
    pub const fn is_valid(self) -> bool {
        self.0 & VALID_BIT != 0
    }

    #[inline(always)]
    pub const fn offset(self) -> u32 {
        self.0 & MAX_OFFSET
    }

    #[inline(always)]
    pub const fn tag(self) -> Traceback {
        Traceback::from_bits(((self.0 & TAG_MASK) >> TAG_SHIFT) as u8)
    }

    /// Same tag, new offset. Used by the extend step.
    #[inline(always)]
    pub const fn with_offset(self, offset: u32) -> Self {
        PackedCell::pack(offset, self.tag())
    }

    /// `(offset, tag)` for valid cells.
    #[inline(always)]
    pub const fn get(self) -> Option<(u32, Traceback)> {
        if self.is_valid() {
            Some((self.offset(), self.tag()))
        } else {
            None
        }
    }

    #[inline(always)]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_invalid() {
        let cell = PackedCell::default();
        assert_eq!(cell, PackedCell::INVALID);
        assert!(!cell.is_valid());
        assert_eq!(cell.get(), None);
        assert_eq!(cell.raw(), 0);
    }

    #[test]
    fn test_pack_never_yields_zero_word() {
        for tag in Traceback::ALL {
            assert_ne!(PackedCell::pack(0, tag).raw(), 0);
        }
    }

    #[test]
    fn test_round_trip_edges() {
        for tag in Traceback::ALL {
            for offset in [0, 1, 2, 1000, MAX_OFFSET - 1, MAX_OFFSET] {
                let cell = PackedCell::pack(offset, tag);
                assert_eq!(cell.unpack(), (true, offset, tag));
            }
        }
    }

    #[test]
    fn test_with_offset_keeps_tag() {
        let cell = PackedCell::pack(3, Traceback::Del).with_offset(17);
        assert_eq!(cell.get(), Some((17, Traceback::Del)));
    }

    #[test]
    fn test_tag_bits_roundtrip() {
        for (i, tag) in Traceback::ALL.iter().enumerate() {
            assert_eq!(*tag as usize, i);
            assert_eq!(Traceback::from_bits(i as u8), *tag);
        }
        assert_eq!(Traceback::Sub.code(), "SB");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_pack_unpack_inverse(offset in 0u32..=MAX_OFFSET, bits in 0u8..8) {
                let tag = Traceback::from_bits(bits);
                let cell = PackedCell::pack(offset, tag);
                prop_assert_eq!(cell.unpack(), (true, offset, tag));
            }
        }
    }
}

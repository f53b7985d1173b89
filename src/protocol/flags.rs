//! Query option flags
//!
//! Bitmask sent as the `<flags>` argument of a query command. Bit positions
//! are fixed by the protocol (bit 2 is reserved and unused).

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Set of query option flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryFlags(u32);

impl QueryFlags {
    /// No options
    pub const NONE: QueryFlags = QueryFlags(0);

    /// Query by sketch rather than photograph
    pub const SKETCH: QueryFlags = QueryFlags(1 << 0);

    /// Ignore color information
    pub const GRAYSCALE: QueryFlags = QueryFlags(1 << 1);

    /// Order results by width then image ID instead of score
    pub const WIDTH_ID: QueryFlags = QueryFlags(1 << 3);

    /// Discard signatures common to many images before matching
    pub const DISCARD_COMMON: QueryFlags = QueryFlags(1 << 4);

    /// Raw bitmask value as sent on the wire
    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Reconstruct from a raw wire value
    pub fn from_bits(bits: u32) -> Self {
        QueryFlags(bits)
    }

    /// Whether all flags in `other` are set in `self`
    pub fn contains(&self, other: QueryFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for QueryFlags {
    type Output = QueryFlags;

    fn bitor(self, rhs: QueryFlags) -> QueryFlags {
        QueryFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for QueryFlags {
    fn bitor_assign(&mut self, rhs: QueryFlags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for QueryFlags {
    /// Formats as the decimal wire value
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

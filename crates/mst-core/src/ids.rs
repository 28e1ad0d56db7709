//! Strongly typed node identifiers and the canonical unordered pair key.
//!
//! A `NodeIndex` is the position of a city in the ordered dataset for the
//! duration of one compute cycle.  The inner integer is `pub` so callers can
//! index `Vec`s via `id.0 as usize`, but `.index()` reads better.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[derive(Serialize, Deserialize)]
        #[serde(transparent)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID", equivalent to the inner `MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a city in the current dataset.  Max ~4.3 billion cities,
    /// far beyond what an O(n²) matrix can hold.
    pub struct NodeIndex(u32);
}

impl NodeIndex {
    /// Build from a loop counter.  Datasets are bounded far below `u32::MAX`
    /// by the dense matrix, so the narrowing cast cannot truncate in practice.
    #[inline(always)]
    pub fn from_usize(i: usize) -> Self {
        NodeIndex(i as u32)
    }
}

// ── PairKey ───────────────────────────────────────────────────────────────────

/// Canonical key for an unordered node pair: `lo <= hi` always holds.
///
/// The fields are private so the ordering invariant is enforced at
/// construction; `PairKey::new(a, b) == PairKey::new(b, a)`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[derive(Serialize, Deserialize)]
#[serde(into = "(NodeIndex, NodeIndex)", from = "(NodeIndex, NodeIndex)")]
pub struct PairKey {
    lo: NodeIndex,
    hi: NodeIndex,
}

impl PairKey {
    #[inline]
    pub fn new(a: NodeIndex, b: NodeIndex) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    #[inline]
    pub fn lo(self) -> NodeIndex {
        self.lo
    }

    #[inline]
    pub fn hi(self) -> NodeIndex {
        self.hi
    }
}

impl From<(NodeIndex, NodeIndex)> for PairKey {
    fn from((a, b): (NodeIndex, NodeIndex)) -> Self {
        PairKey::new(a, b)
    }
}

impl From<PairKey> for (NodeIndex, NodeIndex) {
    fn from(key: PairKey) -> Self {
        (key.lo, key.hi)
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.lo, self.hi)
    }
}

//! Simulation time model.
//!
//! Time is a monotonically increasing `Turn` counter starting at 0.  One turn
//! is one full cycle of the engine: view building, decisions, resolution,
//! commit.  There is no wall-clock mapping — runs are reproducible artifacts,
//! not real-time processes.

use std::fmt;

/// An absolute turn counter.
///
/// `u32` is comfortably larger than any configured `max_turns`; arithmetic
/// stays exact and comparisons are O(1).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Turn(pub u32);

impl Turn {
    pub const ZERO: Turn = Turn(0);

    /// The turn `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u32) -> Turn {
        Turn(self.0 + n)
    }

    /// Turns elapsed from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: Turn) -> u32 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u32> for Turn {
    type Output = Turn;
    #[inline]
    fn add(self, rhs: u32) -> Turn {
        Turn(self.0 + rhs)
    }
}

impl std::ops::Sub for Turn {
    type Output = u32;
    #[inline]
    fn sub(self, rhs: Turn) -> u32 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

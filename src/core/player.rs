//! Seat identification and per-seat data storage.
//!
//! ## Side
//!
//! Every game here is played by exactly two seats. Solitaire games (2048)
//! simply never consult the side.
//!
//! ## PerSide
//!
//! Fixed two-slot storage indexed by `Side`, used for scores and counters.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two seats at the table.
///
/// `One` conventionally moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    One,
    Two,
}

impl Side {
    /// Get the other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    /// Get the 0-based seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }

    /// Both seats in turn order.
    ///
    /// ```
    /// use rust_parlor::core::Side;
    ///
    /// let sides: Vec<_> = Side::all().collect();
    /// assert_eq!(sides, vec![Side::One, Side::Two]);
    /// ```
    pub fn all() -> impl Iterator<Item = Side> {
        [Side::One, Side::Two].into_iter()
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

/// Per-seat data with O(1) access.
///
/// ## Example
///
/// ```
/// use rust_parlor::core::{PerSide, Side};
///
/// let mut boxes: PerSide<u32> = PerSide::default();
/// boxes[Side::Two] += 3;
/// assert_eq!(boxes[Side::One], 0);
/// assert_eq!(boxes[Side::Two], 3);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerSide<T> {
    data: [T; 2],
}

impl<T> PerSide<T> {
    /// Create from explicit values for `One` and `Two`.
    pub fn new(one: T, two: T) -> Self {
        Self { data: [one, two] }
    }
}

impl<T> Index<Side> for PerSide<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        &self.data[side.index()]
    }
}

impl<T> IndexMut<Side> for PerSide<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        &mut self.data[side.index()]
    }
}

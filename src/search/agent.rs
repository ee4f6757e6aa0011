//! The decision API the shell calls on an engine's turn or for a hint.

use crate::core::{GameRng, Side};

/// A move-picking engine for one game.
///
/// Engines read a snapshot of the board and never mutate it. They keep no
/// state between calls; all randomness comes from the `rng` the caller
/// lends, so the same seed reproduces the same choice.
///
/// `None` means no legal move exists (or the game is already over).
pub trait Agent {
    type Board;
    type Move: Copy + std::fmt::Debug;

    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Pick a move for `side`. Solitaire engines ignore `side`.
    fn best_move(&self, board: &Self::Board, side: Side, rng: &mut GameRng) -> Option<Self::Move>;
}

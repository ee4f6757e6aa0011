//! Two-player game trait.
//!
//! Adversarial games implement `TwoPlayerGame` to define:
//! - What moves are legal on a board
//! - How a move changes the board
//! - Win/draw conditions

use smallvec::SmallVec;

use crate::core::Side;

/// Moves available on a board. Both adversarial games have at most 9.
pub type MoveList<M> = SmallVec<[M; 9]>;

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameResult {
    /// Single winner.
    Winner(Side),
    /// Board filled without a winner.
    Draw,
}

/// Board of a two-player, perfect-information game.
///
/// ## Implementation Notes
///
/// - The board does not track whose turn it is; callers pass the side.
/// - `legal_moves` is recomputed from the cells every time.
/// - `play` assumes the move is legal.
/// - `outcome` returns `None` while the game continues.
pub trait TwoPlayerGame: Clone {
    type Move: Copy + PartialEq + std::fmt::Debug;

    /// Legal moves in a fixed, board-determined order.
    fn legal_moves(&self) -> MoveList<Self::Move>;

    /// Place `side`'s piece.
    fn play(&mut self, mv: Self::Move, side: Side);

    /// Check if the game is over.
    fn outcome(&self) -> Option<GameResult>;

    /// Whether `mv` is currently legal.
    fn is_legal(&self, mv: Self::Move) -> bool {
        self.legal_moves().contains(&mv)
    }
}

//! Turn-tracking wrapper around an authoritative board.
//!
//! The shell owns a `Match`. Engines only ever see `match.board()` and hand
//! back a move; the shell then calls `apply`.

use crate::core::{MatchError, Side};

use super::engine::{GameResult, TwoPlayerGame};

/// An in-progress or finished two-player game.
#[derive(Clone, Debug)]
pub struct Match<G: TwoPlayerGame> {
    initial: G,
    board: G,
    first: Side,
    to_move: Side,
    result: Option<GameResult>,
    history: Vec<(Side, G::Move)>,
}

impl<G: TwoPlayerGame> Match<G> {
    /// Start a match on `board` with `first` to move.
    pub fn new(board: G, first: Side) -> Self {
        let result = board.outcome();
        Self {
            initial: board.clone(),
            board,
            first,
            to_move: first,
            result,
            history: Vec::new(),
        }
    }

    /// The authoritative board.
    #[must_use]
    pub fn board(&self) -> &G {
        &self.board
    }

    /// Side whose turn it is.
    #[must_use]
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Final result, once the board is frozen.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Moves applied so far, in order.
    #[must_use]
    pub fn history(&self) -> &[(Side, G::Move)] {
        &self.history
    }

    /// Apply a move for the side to move.
    ///
    /// Returns the result if this move ended the game.
    pub fn apply(&mut self, mv: G::Move) -> Result<Option<GameResult>, MatchError> {
        if self.result.is_some() {
            return Err(MatchError::GameOver);
        }
        if !self.board.is_legal(mv) {
            return Err(MatchError::IllegalMove(format!("{mv:?}")));
        }

        let side = self.to_move;
        self.board.play(mv, side);
        self.history.push((side, mv));

        self.result = self.board.outcome();
        if self.result.is_none() {
            self.to_move = side.opponent();
        }
        Ok(self.result)
    }

    /// Return to the starting board.
    pub fn reset(&mut self) {
        self.board = self.initial.clone();
        self.to_move = self.first;
        self.result = self.board.outcome();
        self.history.clear();
    }
}

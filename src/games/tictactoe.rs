//! Tic-tac-toe with an exhaustive minimax engine.
//!
//! The game tree is small enough to search to the end from any board, so
//! the engine never loses: against perfect play every game is a draw.

use std::fmt;

use crate::core::{GameRng, MinimaxConfig, Side};
use crate::rules::{GameResult, MoveList, TwoPlayerGame};
use crate::search::{Agent, Minimax, NullEvaluator, SearchOutcome};

/// The eight winning lines: rows, columns, diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Tic-tac-toe board.
///
/// Cells are indexed 0-8, row-major:
/// ```text
/// 0 | 1 | 2
/// ---------
/// 3 | 4 | 5
/// ---------
/// 6 | 7 | 8
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TicTacToe {
    cells: [Option<Side>; 9],
}

impl TicTacToe {
    /// An empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from explicit cells.
    #[must_use]
    pub fn from_cells(cells: [Option<Side>; 9]) -> Self {
        Self { cells }
    }

    /// Get the piece at a cell, if any.
    #[must_use]
    pub fn get(&self, cell: usize) -> Option<Side> {
        self.cells.get(cell).copied().flatten()
    }

    #[must_use]
    pub fn cells(&self) -> &[Option<Side>; 9] {
        &self.cells
    }

    /// Side owning a complete line, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        LINES.iter().find_map(|&[a, b, c]| {
            let side = self.cells[a]?;
            (self.cells[b] == Some(side) && self.cells[c] == Some(side)).then_some(side)
        })
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

impl TwoPlayerGame for TicTacToe {
    type Move = usize;

    fn legal_moves(&self) -> MoveList<usize> {
        (0..9).filter(|&i| self.cells[i].is_none()).collect()
    }

    fn play(&mut self, cell: usize, side: Side) {
        self.cells[cell] = Some(side);
    }

    fn outcome(&self) -> Option<GameResult> {
        match self.winner() {
            Some(side) => Some(GameResult::Winner(side)),
            None if self.is_full() => Some(GameResult::Draw),
            None => None,
        }
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f, "-----------")?;
            }
            for col in 0..3 {
                if col > 0 {
                    write!(f, "|")?;
                }
                match self.cells[row * 3 + col] {
                    Some(Side::One) => write!(f, " X ")?,
                    Some(Side::Two) => write!(f, " O ")?,
                    None => write!(f, "   ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Exhaustive minimax player.
#[derive(Clone, Debug)]
pub struct TicTacToeEngine {
    search: Minimax<TicTacToe, NullEvaluator>,
}

impl Default for TicTacToeEngine {
    fn default() -> Self {
        Self::new(MinimaxConfig::exhaustive())
    }
}

impl TicTacToeEngine {
    pub fn new(config: MinimaxConfig) -> Self {
        Self {
            search: Minimax::new(config, NullEvaluator),
        }
    }

    /// Full analysis, including per-cell scores and search stats.
    pub fn analyze(&self, board: &TicTacToe, side: Side, rng: &mut GameRng) -> SearchOutcome<usize> {
        self.search.analyze(board, side, rng)
    }
}

impl Agent for TicTacToeEngine {
    type Board = TicTacToe;
    type Move = usize;

    fn name(&self) -> &'static str {
        "tictactoe-minimax"
    }

    fn best_move(&self, board: &TicTacToe, side: Side, rng: &mut GameRng) -> Option<usize> {
        self.analyze(board, side, rng).best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Option<Side> = Some(Side::One);
    const O: Option<Side> = Some(Side::Two);
    const E: Option<Side> = None;

    #[test]
    fn test_every_line_wins() {
        for side in Side::all() {
            for line in LINES {
                let mut board = TicTacToe::new();
                for cell in line {
                    board.play(cell, side);
                }
                assert_eq!(board.winner(), Some(side), "line {line:?}");
                assert_eq!(board.outcome(), Some(GameResult::Winner(side)));
            }
        }
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        for line in LINES {
            let mut board = TicTacToe::new();
            board.play(line[0], Side::One);
            board.play(line[1], Side::Two);
            board.play(line[2], Side::One);
            assert_eq!(board.winner(), None, "line {line:?}");
        }
    }

    #[test]
    fn test_full_board_draw() {
        let board = TicTacToe::from_cells([X, O, X, X, O, O, O, X, X]);
        assert_eq!(board.winner(), None);
        assert_eq!(board.outcome(), Some(GameResult::Draw));
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_engine_takes_win() {
        // O to move can complete the middle column.
        let board = TicTacToe::from_cells([X, O, X, E, O, E, E, E, X]);
        let engine = TicTacToeEngine::default();
        assert_eq!(engine.best_move(&board, Side::Two, &mut GameRng::new(0)), Some(7));
    }

    #[test]
    fn test_engine_blocks() {
        // X threatens the top row; O must take cell 2.
        let board = TicTacToe::from_cells([X, X, E, E, O, E, E, E, E]);
        let engine = TicTacToeEngine::default();
        assert_eq!(engine.best_move(&board, Side::Two, &mut GameRng::new(0)), Some(2));
    }

    #[test]
    fn test_finished_board_yields_no_move() {
        let engine = TicTacToeEngine::default();
        let won = TicTacToe::from_cells([X, X, X, O, O, E, E, E, E]);
        assert_eq!(engine.best_move(&won, Side::Two, &mut GameRng::new(0)), None);

        let drawn = TicTacToe::from_cells([X, O, X, X, O, O, O, X, X]);
        assert_eq!(engine.best_move(&drawn, Side::One, &mut GameRng::new(0)), None);
    }

    #[test]
    fn test_display() {
        let board = TicTacToe::from_cells([X, E, E, E, O, E, E, E, E]);
        let text = board.to_string();
        assert!(text.starts_with(" X |   |   \n"));
        assert!(text.contains("   | O |   "));
    }
}

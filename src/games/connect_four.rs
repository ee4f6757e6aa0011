//! Connect four with a depth-limited minimax engine.
//!
//! Before searching, the engine checks two shortcuts in order:
//! 1. a column that wins on the spot
//! 2. a column the opponent would win with next turn (block it)
//!
//! Only if neither exists does the 4-ply alpha-beta search run, scoring
//! cutoff boards with `WindowEvaluator`.

use std::fmt;

use log::trace;

use crate::core::{ConnectFourConfig, GameRng, Side, WindowWeights};
use crate::rules::{GameResult, MoveList, TwoPlayerGame};
use crate::search::{Agent, Evaluator, Minimax, SearchOutcome};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const CENTER_COL: usize = COLS / 2;

/// Row/column steps for horizontal, vertical, and both diagonals.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Connect-four board. Row 0 is the top; pieces fall toward row 5.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ConnectFour {
    cells: [[Option<Side>; COLS]; ROWS],
}

impl ConnectFour {
    /// An empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from explicit cells (row 0 on top).
    #[must_use]
    pub fn from_cells(cells: [[Option<Side>; COLS]; ROWS]) -> Self {
        Self { cells }
    }

    /// Build a board by dropping pieces column by column, alternating
    /// sides starting with `first`.
    #[must_use]
    pub fn from_drops(first: Side, columns: &[usize]) -> Self {
        let mut board = Self::new();
        let mut side = first;
        for &col in columns {
            board.play(col, side);
            side = side.opponent();
        }
        board
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Side> {
        self.cells[row][col]
    }

    /// Lowest empty row in `col`, if the column has room.
    #[must_use]
    pub fn next_open_row(&self, col: usize) -> Option<usize> {
        (0..ROWS).rev().find(|&row| self.cells[row][col].is_none())
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells[0].iter().all(Option::is_some)
    }

    /// Every run of four cells in any direction.
    pub fn windows(&self) -> impl Iterator<Item = [Option<Side>; 4]> + '_ {
        DIRECTIONS.iter().flat_map(move |&(dr, dc)| {
            (0..ROWS).flat_map(move |row| {
                (0..COLS).filter_map(move |col| self.window(row, col, dr, dc))
            })
        })
    }

    fn window(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<[Option<Side>; 4]> {
        let mut out = [None; 4];
        for (i, slot) in out.iter_mut().enumerate() {
            let r = row.checked_add_signed(dr * i as isize)?;
            let c = col.checked_add_signed(dc * i as isize)?;
            if r >= ROWS || c >= COLS {
                return None;
            }
            *slot = self.cells[r][c];
        }
        Some(out)
    }

    /// Side owning four in a row, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        self.windows().find_map(|w| {
            let side = w[0]?;
            w.iter().all(|&c| c == Some(side)).then_some(side)
        })
    }

    /// Whether `side` dropping into `col` wins immediately.
    fn wins_with(&self, col: usize, side: Side) -> bool {
        let mut probe = *self;
        probe.play(col, side);
        probe.winner() == Some(side)
    }
}

impl TwoPlayerGame for ConnectFour {
    type Move = usize;

    fn legal_moves(&self) -> MoveList<usize> {
        (0..COLS).filter(|&col| self.cells[0][col].is_none()).collect()
    }

    fn play(&mut self, col: usize, side: Side) {
        if let Some(row) = self.next_open_row(col) {
            self.cells[row][col] = Some(side);
        }
    }

    fn outcome(&self) -> Option<GameResult> {
        match self.winner() {
            Some(side) => Some(GameResult::Winner(side)),
            None if self.is_full() => Some(GameResult::Draw),
            None => None,
        }
    }
}

impl fmt::Display for ConnectFour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let c = match cell {
                    Some(Side::One) => 'X',
                    Some(Side::Two) => 'O',
                    None => '.',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Window-counting heuristic.
///
/// Sums a score over every 4-cell window, then adds a flat bonus per own
/// piece in the center column.
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowEvaluator {
    pub weights: WindowWeights,
}

impl WindowEvaluator {
    pub fn new(weights: WindowWeights) -> Self {
        Self { weights }
    }

    /// Score one window for `side`.
    #[must_use]
    pub fn score_window(&self, window: &[Option<Side>; 4], side: Side) -> i32 {
        let own = window.iter().filter(|&&c| c == Some(side)).count();
        let theirs = window.iter().filter(|&&c| c == Some(side.opponent())).count();
        let empty = 4 - own - theirs;
        let w = &self.weights;

        let mut score = match (own, empty) {
            (4, _) => w.four,
            (3, 1) => w.three,
            (2, 2) => w.two,
            _ => 0,
        };
        if theirs == 3 && empty == 1 {
            score += w.opponent_three;
        }
        score
    }
}

impl Evaluator<ConnectFour> for WindowEvaluator {
    fn evaluate(&self, board: &ConnectFour, side: Side) -> i32 {
        let center = (0..ROWS)
            .filter(|&row| board.get(row, CENTER_COL) == Some(side))
            .count() as i32;

        board
            .windows()
            .map(|w| self.score_window(&w, side))
            .sum::<i32>()
            + center * self.weights.center
    }
}

/// How the engine arrived at its column.
#[derive(Clone, Debug)]
pub enum Decision {
    /// Dropping here wins immediately.
    Win(usize),
    /// The opponent would win here next turn.
    Block(usize),
    /// Chosen by minimax.
    Search(SearchOutcome<usize>),
    /// Board is full or already won.
    NoMove,
}

impl Decision {
    /// The column to play, if any.
    #[must_use]
    pub fn column(&self) -> Option<usize> {
        match self {
            Decision::Win(col) | Decision::Block(col) => Some(*col),
            Decision::Search(outcome) => outcome.best,
            Decision::NoMove => None,
        }
    }
}

/// Shortcut-then-search player.
#[derive(Clone, Debug)]
pub struct ConnectFourEngine {
    search: Minimax<ConnectFour, WindowEvaluator>,
}

impl Default for ConnectFourEngine {
    fn default() -> Self {
        Self::new(ConnectFourConfig::default())
    }
}

impl ConnectFourEngine {
    pub fn new(config: ConnectFourConfig) -> Self {
        Self {
            search: Minimax::new(config.search, WindowEvaluator::new(config.weights)),
        }
    }

    /// Pick a column and report which rule chose it.
    pub fn decide(&self, board: &ConnectFour, side: Side, rng: &mut GameRng) -> Decision {
        if board.outcome().is_some() {
            return Decision::NoMove;
        }
        let moves = board.legal_moves();

        if let Some(&col) = moves.iter().find(|&&col| board.wins_with(col, side)) {
            trace!("connect four: winning drop in column {col}");
            return Decision::Win(col);
        }

        let opponent = side.opponent();
        if let Some(&col) = moves.iter().find(|&&col| board.wins_with(col, opponent)) {
            trace!("connect four: blocking column {col}");
            return Decision::Block(col);
        }

        Decision::Search(self.search.analyze(board, side, rng))
    }

    /// Cutoff evaluator, exposed for the shell's position display.
    #[must_use]
    pub fn evaluate(&self, board: &ConnectFour, side: Side) -> i32 {
        self.search.evaluator().evaluate(board, side)
    }
}

impl Agent for ConnectFourEngine {
    type Board = ConnectFour;
    type Move = usize;

    fn name(&self) -> &'static str {
        "connect-four-minimax"
    }

    fn best_move(&self, board: &ConnectFour, side: Side, rng: &mut GameRng) -> Option<usize> {
        self.decide(board, side, rng).column()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Option<Side> = Some(Side::One);
    const O: Option<Side> = Some(Side::Two);

    #[test]
    fn test_pieces_fall() {
        let mut board = ConnectFour::new();
        board.play(3, Side::One);
        board.play(3, Side::Two);

        assert_eq!(board.get(5, 3), X);
        assert_eq!(board.get(4, 3), O);
        assert_eq!(board.next_open_row(3), Some(3));
        assert_eq!(board.next_open_row(0), Some(5));
    }

    #[test]
    fn test_full_column_is_illegal() {
        let board = ConnectFour::from_drops(Side::One, &[0, 0, 0, 0, 0, 0]);
        assert_eq!(board.next_open_row(0), None);
        assert!(!board.legal_moves().contains(&0));
        assert_eq!(board.legal_moves().len(), COLS - 1);
    }

    #[test]
    fn test_window_count() {
        // 24 horizontal + 21 vertical + 12 + 12 diagonal.
        assert_eq!(ConnectFour::new().windows().count(), 69);
    }

    #[test]
    fn test_winner_in_every_direction() {
        let horizontal = ConnectFour::from_drops(Side::One, &[0, 0, 1, 1, 2, 2, 3]);
        assert_eq!(horizontal.winner(), Some(Side::One));

        let vertical = ConnectFour::from_drops(Side::One, &[4, 5, 4, 5, 4, 5, 4]);
        assert_eq!(vertical.winner(), Some(Side::One));

        let mut rising = ConnectFour::new();
        for (col, height) in [(0, 1), (1, 2), (2, 3), (3, 4)] {
            for _ in 0..height - 1 {
                rising.play(col, Side::Two);
            }
            rising.play(col, Side::One);
        }
        assert_eq!(rising.winner(), Some(Side::One));

        let mut falling = ConnectFour::new();
        for (col, height) in [(3, 1), (2, 2), (1, 3), (0, 4)] {
            for _ in 0..height - 1 {
                falling.play(col, Side::One);
            }
            falling.play(col, Side::Two);
        }
        assert_eq!(falling.winner(), Some(Side::Two));
    }

    #[test]
    fn test_score_window() {
        let eval = WindowEvaluator::default();
        let side = Side::Two;

        assert_eq!(eval.score_window(&[O, O, O, O], side), 100);
        assert_eq!(eval.score_window(&[O, O, O, None], side), 5);
        assert_eq!(eval.score_window(&[O, None, O, None], side), 2);
        assert_eq!(eval.score_window(&[X, X, None, X], side), -4);
        assert_eq!(eval.score_window(&[X, O, None, None], side), 0);
    }

    #[test]
    fn test_center_bonus() {
        let eval = WindowEvaluator::default();
        let mut center = ConnectFour::new();
        center.play(CENTER_COL, Side::One);
        let mut edge = ConnectFour::new();
        edge.play(0, Side::One);

        assert!(eval.evaluate(&center, Side::One) > eval.evaluate(&edge, Side::One));
    }

    #[test]
    fn test_evaluator_defined_on_finished_board() {
        let won = ConnectFour::from_drops(Side::One, &[0, 0, 1, 1, 2, 2, 3]);
        let eval = WindowEvaluator::default();
        assert!(eval.evaluate(&won, Side::One) >= 100);
    }

    #[test]
    fn test_finished_board_yields_no_move() {
        let won = ConnectFour::from_drops(Side::One, &[0, 0, 1, 1, 2, 2, 3]);
        let engine = ConnectFourEngine::default();
        assert!(matches!(
            engine.decide(&won, Side::Two, &mut GameRng::new(0)),
            Decision::NoMove
        ));
    }
}

//! Dots and boxes with a three-tier greedy classifier.
//!
//! ## Board
//!
//! A grid of `rows × cols` boxes has `(rows + 1) × cols` horizontal edges
//! and `rows × (cols + 1)` vertical edges. Box `(r, c)` is bounded by
//! horizontal edges `(r, c)` and `(r + 1, c)` and vertical edges `(r, c)`
//! and `(r, c + 1)`. Drawing a box's fourth edge gives it to the drawer,
//! who then moves again.
//!
//! ## Engine tiers
//!
//! 1. **Completing**: an edge that finishes a 3-sided box.
//! 2. **Safe**: an edge that leaves no unowned box with exactly 3 sides.
//! 3. **Fallback**: any undrawn edge.
//!
//! Each tier picks uniformly at random among its candidates. The safe tier
//! does not look through chains of forced captures.

use std::fmt;
use std::ops::Deref;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::core::{GameRng, MatchError, PerSide, Side};
use crate::rules::GameResult;
use crate::search::Agent;

pub const DEFAULT_ROWS: usize = 4;
pub const DEFAULT_COLS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One edge between two adjacent dots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub orientation: Orientation,
    pub row: usize,
    pub col: usize,
}

impl Edge {
    #[must_use]
    pub const fn horizontal(row: usize, col: usize) -> Self {
        Self { orientation: Orientation::Horizontal, row, col }
    }

    #[must_use]
    pub const fn vertical(row: usize, col: usize) -> Self {
        Self { orientation: Orientation::Vertical, row, col }
    }
}

/// Drawn edges plus the box-ownership grid derived from them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DotsBoard {
    rows: usize,
    cols: usize,
    horizontal: Vec<Vec<bool>>,
    vertical: Vec<Vec<bool>>,
    owners: Vec<Vec<Option<Side>>>,
}

impl Default for DotsBoard {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl DotsBoard {
    /// An empty board of `rows × cols` boxes.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "Board needs at least one box");
        Self {
            rows,
            cols,
            horizontal: vec![vec![false; cols]; rows + 1],
            vertical: vec![vec![false; cols + 1]; rows],
            owners: vec![vec![None; cols]; rows],
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn is_drawn(&self, edge: Edge) -> bool {
        match edge.orientation {
            Orientation::Horizontal => self.horizontal[edge.row][edge.col],
            Orientation::Vertical => self.vertical[edge.row][edge.col],
        }
    }

    fn set(&mut self, edge: Edge, drawn: bool) {
        match edge.orientation {
            Orientation::Horizontal => self.horizontal[edge.row][edge.col] = drawn,
            Orientation::Vertical => self.vertical[edge.row][edge.col] = drawn,
        }
    }

    /// Whether `edge` exists on this board.
    #[must_use]
    pub fn contains(&self, edge: Edge) -> bool {
        match edge.orientation {
            Orientation::Horizontal => edge.row <= self.rows && edge.col < self.cols,
            Orientation::Vertical => edge.row < self.rows && edge.col <= self.cols,
        }
    }

    /// The four edges of box `(row, col)`: top, bottom, left, right.
    #[must_use]
    pub fn box_edges(row: usize, col: usize) -> [Edge; 4] {
        [
            Edge::horizontal(row, col),
            Edge::horizontal(row + 1, col),
            Edge::vertical(row, col),
            Edge::vertical(row, col + 1),
        ]
    }

    /// Number of drawn edges around box `(row, col)`.
    #[must_use]
    pub fn box_sides(&self, row: usize, col: usize) -> usize {
        Self::box_edges(row, col)
            .into_iter()
            .filter(|&e| self.is_drawn(e))
            .count()
    }

    #[must_use]
    pub fn owner(&self, row: usize, col: usize) -> Option<Side> {
        self.owners[row][col]
    }

    /// Boxes on either side of `edge`.
    fn adjacent_boxes(&self, edge: Edge) -> impl Iterator<Item = (usize, usize)> {
        let (r, c) = (edge.row, edge.col);
        let (before, after) = match edge.orientation {
            Orientation::Horizontal => (
                r.checked_sub(1).map(|r0| (r0, c)),
                (r < self.rows).then_some((r, c)),
            ),
            Orientation::Vertical => (
                c.checked_sub(1).map(|c0| (r, c0)),
                (c < self.cols).then_some((r, c)),
            ),
        };
        before.into_iter().chain(after)
    }

    /// Unowned boxes, row-major.
    fn open_boxes(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows)
            .flat_map(move |r| (0..self.cols).map(move |c| (r, c)))
            .filter(|&(r, c)| self.owners[r][c].is_none())
    }

    /// Undrawn edges: horizontal row-major, then vertical row-major.
    #[must_use]
    pub fn available_edges(&self) -> Vec<Edge> {
        let horizontal = (0..=self.rows)
            .flat_map(|r| (0..self.cols).map(move |c| Edge::horizontal(r, c)));
        let vertical = (0..self.rows)
            .flat_map(|r| (0..=self.cols).map(move |c| Edge::vertical(r, c)));
        horizontal
            .chain(vertical)
            .filter(|&e| !self.is_drawn(e))
            .collect()
    }

    /// Draw `edge` for `side`, awarding any boxes it completes.
    ///
    /// Returns the number of boxes completed (0, 1 or 2). Drawing an edge
    /// that is already drawn does nothing.
    pub fn draw(&mut self, edge: Edge, side: Side) -> usize {
        if self.is_drawn(edge) {
            return 0;
        }
        self.set(edge, true);

        let completed: Vec<(usize, usize)> = self
            .adjacent_boxes(edge)
            .filter(|&(r, c)| self.owners[r][c].is_none() && self.box_sides(r, c) == 4)
            .collect();
        for &(r, c) in &completed {
            self.owners[r][c] = Some(side);
        }
        completed.len()
    }

    /// Whether every edge is drawn.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.horizontal.iter().flatten().all(|&d| d) && self.vertical.iter().flatten().all(|&d| d)
    }

    /// Boxes owned by each side.
    #[must_use]
    pub fn scores(&self) -> PerSide<usize> {
        let mut scores = PerSide::default();
        for side in self.owners.iter().flatten().flatten() {
            scores[*side] += 1;
        }
        scores
    }

    /// Missing edges of unowned boxes that have exactly 3 sides, deduplicated.
    #[must_use]
    pub fn completing_edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        for (r, c) in self.open_boxes() {
            if self.box_sides(r, c) != 3 {
                continue;
            }
            if let Some(missing) = Self::box_edges(r, c).into_iter().find(|&e| !self.is_drawn(e)) {
                if !edges.contains(&missing) {
                    edges.push(missing);
                }
            }
        }
        edges
    }

    /// Whether any unowned box has exactly 3 drawn sides.
    #[must_use]
    pub fn has_three_sided_box(&self) -> bool {
        self.open_boxes().any(|(r, c)| self.box_sides(r, c) == 3)
    }

    /// Whether drawing `edge` leaves no unowned box with exactly 3 sides.
    ///
    /// The edge is marked only for the duration of the check; the board
    /// is identical afterwards whatever the answer. An edge that is already
    /// drawn is judged on the board as it stands.
    pub fn is_safe_edge(&mut self, edge: Edge) -> bool {
        let probe = ProvisionalEdge::new(self, edge);
        !probe.has_three_sided_box()
    }
}

/// Marks an edge drawn until dropped, then puts back whatever was there.
///
/// Ownership is not touched, so the check never awards boxes.
struct ProvisionalEdge<'a> {
    board: &'a mut DotsBoard,
    edge: Edge,
    was_drawn: bool,
}

impl<'a> ProvisionalEdge<'a> {
    fn new(board: &'a mut DotsBoard, edge: Edge) -> Self {
        let was_drawn = board.is_drawn(edge);
        board.set(edge, true);
        Self { board, edge, was_drawn }
    }
}

impl Deref for ProvisionalEdge<'_> {
    type Target = DotsBoard;

    fn deref(&self) -> &DotsBoard {
        self.board
    }
}

impl Drop for ProvisionalEdge<'_> {
    fn drop(&mut self) {
        self.board.set(self.edge, self.was_drawn);
    }
}

impl fmt::Display for DotsBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..=self.rows {
            for c in 0..self.cols {
                let line = if self.horizontal[r][c] { "---" } else { "   " };
                write!(f, "+{line}")?;
            }
            writeln!(f, "+")?;
            if r == self.rows {
                break;
            }
            for c in 0..=self.cols {
                write!(f, "{}", if self.vertical[r][c] { '|' } else { ' ' })?;
                if c < self.cols {
                    let owner = match self.owners[r][c] {
                        Some(Side::One) => " 1 ",
                        Some(Side::Two) => " 2 ",
                        None => "   ",
                    };
                    write!(f, "{owner}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Which tier produced an engine move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Completing,
    Safe,
    Fallback,
}

/// An engine move and the tier that chose it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Classification {
    pub tier: Tier,
    pub edge: Edge,
}

/// Greedy three-tier player.
#[derive(Clone, Copy, Debug, Default)]
pub struct DotsEngine;

impl DotsEngine {
    pub fn new() -> Self {
        Self
    }

    /// Pick an edge and report its tier. `None` once every edge is drawn.
    ///
    /// Works on a private copy; `board` is never touched.
    pub fn classify(&self, board: &DotsBoard, rng: &mut GameRng) -> Option<Classification> {
        let completing = board.completing_edges();
        if let Some(&edge) = rng.choose(&completing) {
            trace!("dots: completing edge {edge:?} of {}", completing.len());
            return Some(Classification { tier: Tier::Completing, edge });
        }

        let available = board.available_edges();
        let mut working = board.clone();
        let safe: Vec<Edge> = available
            .iter()
            .copied()
            .filter(|&e| working.is_safe_edge(e))
            .collect();
        if let Some(&edge) = rng.choose(&safe) {
            trace!("dots: safe edge {edge:?} of {}", safe.len());
            return Some(Classification { tier: Tier::Safe, edge });
        }

        let edge = *rng.choose(&available)?;
        trace!("dots: no safe edge, falling back to {edge:?}");
        Some(Classification { tier: Tier::Fallback, edge })
    }
}

impl Agent for DotsEngine {
    type Board = DotsBoard;
    type Move = Edge;

    fn name(&self) -> &'static str {
        "dots-tiered"
    }

    fn best_move(&self, board: &DotsBoard, _side: Side, rng: &mut GameRng) -> Option<Edge> {
        self.classify(board, rng).map(|c| c.edge)
    }
}

/// Outcome of one edge drawn through a `DotsMatch`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub completed: usize,
    /// Side to move next (unchanged when a box was completed).
    pub next: Side,
    pub result: Option<GameResult>,
}

/// A dots-and-boxes game with the extra-turn rule.
#[derive(Clone, Debug)]
pub struct DotsMatch {
    board: DotsBoard,
    first: Side,
    to_move: Side,
}

impl DotsMatch {
    pub fn new(rows: usize, cols: usize, first: Side) -> Self {
        Self {
            board: DotsBoard::new(rows, cols),
            first,
            to_move: first,
        }
    }

    #[must_use]
    pub fn board(&self) -> &DotsBoard {
        &self.board
    }

    #[must_use]
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    #[must_use]
    pub fn scores(&self) -> PerSide<usize> {
        self.board.scores()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.board.is_complete()
    }

    /// Final result once every edge is drawn.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        if !self.is_over() {
            return None;
        }
        let scores = self.scores();
        Some(match scores[Side::One].cmp(&scores[Side::Two]) {
            std::cmp::Ordering::Greater => GameResult::Winner(Side::One),
            std::cmp::Ordering::Less => GameResult::Winner(Side::Two),
            std::cmp::Ordering::Equal => GameResult::Draw,
        })
    }

    /// Draw an edge for the side to move.
    pub fn apply(&mut self, edge: Edge) -> Result<TurnReport, MatchError> {
        if self.is_over() {
            return Err(MatchError::GameOver);
        }
        if !self.board.contains(edge) || self.board.is_drawn(edge) {
            return Err(MatchError::IllegalMove(format!("{edge:?}")));
        }

        let completed = self.board.draw(edge, self.to_move);
        if completed == 0 {
            self.to_move = self.to_move.opponent();
        }
        Ok(TurnReport {
            completed,
            next: self.to_move,
            result: self.result(),
        })
    }

    pub fn reset(&mut self) {
        self.board = DotsBoard::new(self.board.rows(), self.board.cols());
        self.to_move = self.first;
    }
}

//! The 4×4 sliding-merge tile game (2048).
//!
//! ## Move semantics
//!
//! A left move on one row:
//! 1. drops empty cells, keeping tile order
//! 2. scans left to right merging each adjacent equal pair once
//!    (a merged tile cannot merge again in the same move)
//! 3. pads with empties on the right
//!
//! Right mirrors each row around a left move; up and down transpose the
//! grid around a left or right move. A direction is legal only if it
//! changes at least one row.

use std::fmt;

use log::trace;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ExpectimaxConfig, GameRng, GameRngState, Side, SpawnOdds};
use crate::search::{Agent, Expectimax, ExpectimaxOutcome};

pub const SIZE: usize = 4;

pub type Row = [u32; SIZE];

/// A direction to slide tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions in the order the engine tries them.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];
}

/// Slide one row to the left. Returns the new row and the merge score.
///
/// ```
/// use rust_parlor::games::slide::slide_row_left;
///
/// assert_eq!(slide_row_left([2, 2, 4, 0]), ([4, 4, 0, 0], 4));
/// assert_eq!(slide_row_left([2, 2, 2, 2]), ([4, 4, 0, 0], 8));
/// ```
#[must_use]
pub fn slide_row_left(row: Row) -> (Row, u32) {
    let tiles: SmallVec<[u32; SIZE]> = row.iter().copied().filter(|&v| v != 0).collect();

    let mut out = [0; SIZE];
    let mut gained = 0;
    let mut write = 0;
    let mut i = 0;
    while i < tiles.len() {
        if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
            out[write] = tiles[i] * 2;
            gained += tiles[i] * 2;
            i += 2;
        } else {
            out[write] = tiles[i];
            i += 1;
        }
        write += 1;
    }
    (out, gained)
}

/// A 4×4 grid of tile values; 0 is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    rows: [Row; SIZE],
}

impl Grid {
    /// An empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_rows(rows: [Row; SIZE]) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[Row; SIZE] {
        &self.rows
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.rows[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: u32) {
        self.rows[row][col] = value;
    }

    /// Swap rows and columns.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut out = Self::new();
        for r in 0..SIZE {
            for c in 0..SIZE {
                out.rows[c][r] = self.rows[r][c];
            }
        }
        out
    }

    /// Reverse every row.
    #[must_use]
    pub fn mirror(&self) -> Self {
        let mut out = *self;
        for row in &mut out.rows {
            row.reverse();
        }
        out
    }

    /// Slide in `dir`. Returns the new grid and the merge score; the grid
    /// may be unchanged.
    #[must_use]
    pub fn slide(&self, dir: Direction) -> (Self, u32) {
        match dir {
            Direction::Left => self.slide_left(),
            Direction::Right => {
                let (grid, gained) = self.mirror().slide_left();
                (grid.mirror(), gained)
            }
            Direction::Up => {
                let (grid, gained) = self.transpose().slide_left();
                (grid.transpose(), gained)
            }
            Direction::Down => {
                let (grid, gained) = self.transpose().slide(Direction::Right);
                (grid.transpose(), gained)
            }
        }
    }

    fn slide_left(&self) -> (Self, u32) {
        let mut out = *self;
        let mut gained = 0;
        for row in &mut out.rows {
            let (slid, score) = slide_row_left(*row);
            *row = slid;
            gained += score;
        }
        (out, gained)
    }

    /// The grid after sliding in `dir`, or `None` if nothing moves.
    #[must_use]
    pub fn moved(&self, dir: Direction) -> Option<Self> {
        let (next, _) = self.slide(dir);
        (next != *self).then_some(next)
    }

    /// Directions that change the grid, in `Direction::ALL` order.
    #[must_use]
    pub fn legal_directions(&self) -> SmallVec<[Direction; 4]> {
        Direction::ALL
            .into_iter()
            .filter(|&dir| self.moved(dir).is_some())
            .collect()
    }

    /// Whether any direction changes the grid.
    #[must_use]
    pub fn can_move(&self) -> bool {
        Direction::ALL.into_iter().any(|dir| self.moved(dir).is_some())
    }

    /// Coordinates of empty cells, row-major.
    #[must_use]
    pub fn empty_cells(&self) -> SmallVec<[(usize, usize); 16]> {
        let mut cells = SmallVec::new();
        for r in 0..SIZE {
            for c in 0..SIZE {
                if self.rows[r][c] == 0 {
                    cells.push((r, c));
                }
            }
        }
        cells
    }

    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.rows.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Per row, the larger of its non-decreasing and non-increasing
    /// adjacent-pair counts, summed over rows.
    #[must_use]
    pub fn monotonicity(&self) -> u32 {
        self.rows
            .iter()
            .map(|row| {
                let pairs = row.windows(2);
                let increasing = pairs.clone().filter(|p| p[0] <= p[1]).count();
                let decreasing = pairs.filter(|p| p[0] >= p[1]).count();
                increasing.max(decreasing) as u32
            })
            .sum()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|&v| if v == 0 { ".".to_string() } else { v.to_string() })
                .collect();
            writeln!(f, "{}", cells.join("\t"))?;
        }
        Ok(())
    }
}

/// What happened when the player slid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveReport {
    /// Whether the grid changed (and a tile spawned).
    pub moved: bool,
    /// Merge score gained by this move.
    pub gained: u32,
    /// Whether the running score passed the best score.
    pub new_best: bool,
}

/// A 2048 game in progress: grid, score, and the spawn RNG.
#[derive(Clone, Debug)]
pub struct SlideGame {
    grid: Grid,
    score: u64,
    best_score: u64,
    rng: GameRng,
    spawns: Vec<SpawnOdds>,
}

/// Everything needed to pause a game and pick it up later with the same
/// spawn sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlideSnapshot {
    pub grid: Grid,
    pub score: u64,
    pub best_score: u64,
    pub rng: GameRngState,
    pub spawns: Vec<SpawnOdds>,
}

impl SlideGame {
    /// Start a game with two spawned tiles. `best_score` comes from the
    /// shell's store (0 if it could not be read).
    pub fn new(seed: u64, best_score: u64) -> Self {
        Self::with_spawns(seed, best_score, ExpectimaxConfig::default().spawns)
    }

    /// Like `new`, drawing spawned tiles from `spawns` instead of the
    /// default 2/4 table. Pass the same table the engine searches with.
    pub fn with_spawns(seed: u64, best_score: u64, spawns: Vec<SpawnOdds>) -> Self {
        let mut game = Self {
            grid: Grid::new(),
            score: 0,
            best_score,
            rng: GameRng::new(seed),
            spawns,
        };
        game.spawn_tile();
        game.spawn_tile();
        game
    }

    /// Resume from a known grid without spawning.
    pub fn from_grid(grid: Grid, seed: u64) -> Self {
        Self {
            grid,
            score: 0,
            best_score: 0,
            rng: GameRng::new(seed),
            spawns: ExpectimaxConfig::default().spawns,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SlideSnapshot {
        SlideSnapshot {
            grid: self.grid,
            score: self.score,
            best_score: self.best_score,
            rng: self.rng.state(),
            spawns: self.spawns.clone(),
        }
    }

    #[must_use]
    pub fn restore(snapshot: &SlideSnapshot) -> Self {
        Self {
            grid: snapshot.grid,
            score: snapshot.score,
            best_score: snapshot.best_score,
            rng: GameRng::from_state(&snapshot.rng),
            spawns: snapshot.spawns.clone(),
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        !self.grid.can_move()
    }

    /// Place a tile drawn from the spawn table on a random empty cell.
    ///
    /// Returns the cell and value, or `None` if the grid is full.
    pub fn spawn_tile(&mut self) -> Option<(usize, usize, u32)> {
        let empty = self.grid.empty_cells();
        let &(row, col) = self.rng.choose(&empty)?;
        let value = self.draw_spawn_value();
        self.grid.set(row, col, value);
        Some((row, col, value))
    }

    /// Pick a value by cumulative odds. Rounding slack falls to the last entry.
    fn draw_spawn_value(&mut self) -> u32 {
        let roll = self.rng.gen_unit();
        let mut acc = 0.0;
        for odds in &self.spawns {
            acc += odds.probability;
            if roll < acc {
                return odds.value;
            }
        }
        self.spawns.last().map_or(2, |odds| odds.value)
    }

    /// Slide, score, and spawn a tile if anything moved.
    pub fn apply(&mut self, dir: Direction) -> MoveReport {
        let (next, gained) = self.grid.slide(dir);
        if next == self.grid {
            return MoveReport {
                moved: false,
                gained: 0,
                new_best: false,
            };
        }

        self.grid = next;
        self.score += u64::from(gained);
        self.spawn_tile();

        let new_best = self.score > self.best_score;
        if new_best {
            self.best_score = self.score;
        }
        MoveReport {
            moved: true,
            gained,
            new_best,
        }
    }

    /// Start over, keeping the best score and RNG stream.
    pub fn reset(&mut self) {
        self.grid = Grid::new();
        self.score = 0;
        self.spawn_tile();
        self.spawn_tile();
    }
}

/// Expectimax hint engine.
#[derive(Clone, Debug, Default)]
pub struct SlideEngine {
    search: Expectimax,
}

impl SlideEngine {
    pub fn new(config: ExpectimaxConfig) -> Self {
        Self {
            search: Expectimax::new(config),
        }
    }

    /// Full analysis with per-direction values.
    pub fn analyze(&self, grid: &Grid) -> ExpectimaxOutcome {
        self.search.analyze(grid)
    }
}

impl Agent for SlideEngine {
    type Board = Grid;
    type Move = Direction;

    fn name(&self) -> &'static str {
        "slide-expectimax"
    }

    fn best_move(&self, grid: &Grid, _side: Side, _rng: &mut GameRng) -> Option<Direction> {
        let outcome = self.analyze(grid);
        trace!("slide: branch values {:?}", outcome.branches);
        outcome.best
    }
}

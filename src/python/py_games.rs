//! Decision functions for the Python shell.
//!
//! Boards cross the boundary as plain lists. Cells use 0 for empty and
//! 1 or 2 for the two sides.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{GameRng, Side};
use crate::games::connect_four::{self, ConnectFour, ConnectFourEngine};
use crate::games::dots_boxes::{DotsBoard, DotsEngine, Edge, Orientation};
use crate::games::slide::{self, Direction, Grid, SlideEngine};
use crate::games::tictactoe::{TicTacToe, TicTacToeEngine};
use crate::search::Agent;

fn value_error(message: String) -> PyErr {
    PyErr::new::<PyValueError, _>(message)
}

fn side_from(code: u8) -> PyResult<Side> {
    match code {
        1 => Ok(Side::One),
        2 => Ok(Side::Two),
        other => Err(value_error(format!("side must be 1 or 2, got {other}"))),
    }
}

fn cell_from(code: u8) -> PyResult<Option<Side>> {
    match code {
        0 => Ok(None),
        other => side_from(other).map(Some),
    }
}

/// Best cell (0-8) for `side`, or `None` on a finished board.
#[pyfunction]
#[pyo3(signature = (cells, side, seed = 0))]
pub fn tictactoe_move(cells: Vec<u8>, side: u8, seed: u64) -> PyResult<Option<usize>> {
    if cells.len() != 9 {
        return Err(value_error(format!("expected 9 cells, got {}", cells.len())));
    }
    let mut board = [None; 9];
    for (slot, &code) in board.iter_mut().zip(&cells) {
        *slot = cell_from(code)?;
    }

    let board = TicTacToe::from_cells(board);
    let mut rng = GameRng::new(seed);
    Ok(TicTacToeEngine::default().best_move(&board, side_from(side)?, &mut rng))
}

/// Best column (0-6) for `side`. `rows` lists the six rows top to bottom.
#[pyfunction]
#[pyo3(signature = (rows, side, seed = 0))]
pub fn connect_four_move(rows: Vec<Vec<u8>>, side: u8, seed: u64) -> PyResult<Option<usize>> {
    if rows.len() != connect_four::ROWS || rows.iter().any(|r| r.len() != connect_four::COLS) {
        return Err(value_error(format!(
            "expected a {}x{} board",
            connect_four::ROWS,
            connect_four::COLS
        )));
    }
    let mut cells = [[None; connect_four::COLS]; connect_four::ROWS];
    for (row, codes) in cells.iter_mut().zip(&rows) {
        for (slot, &code) in row.iter_mut().zip(codes) {
            *slot = cell_from(code)?;
        }
    }

    let board = ConnectFour::from_cells(cells);
    let mut rng = GameRng::new(seed);
    Ok(ConnectFourEngine::default().best_move(&board, side_from(side)?, &mut rng))
}

/// Best direction (`"left"`, `"right"`, `"up"`, `"down"`) for a 4x4 grid.
#[pyfunction]
pub fn slide_move(rows: Vec<Vec<u32>>) -> PyResult<Option<&'static str>> {
    if rows.len() != slide::SIZE || rows.iter().any(|r| r.len() != slide::SIZE) {
        return Err(value_error(format!("expected a {0}x{0} grid", slide::SIZE)));
    }
    let mut grid = Grid::new();
    for (r, row) in rows.iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            grid.set(r, c, value);
        }
    }

    let mut rng = GameRng::new(0);
    let dir = SlideEngine::default().best_move(&grid, Side::One, &mut rng);
    Ok(dir.map(|d| match d {
        Direction::Left => "left",
        Direction::Right => "right",
        Direction::Up => "up",
        Direction::Down => "down",
    }))
}

/// Next edge as `("h" | "v", row, col)`.
///
/// `horizontal` is `(rows + 1) x cols` and `vertical` is `rows x (cols + 1)`,
/// both `True` where a line is drawn.
#[pyfunction]
#[pyo3(signature = (horizontal, vertical, seed = 0))]
pub fn dots_move(
    horizontal: Vec<Vec<bool>>,
    vertical: Vec<Vec<bool>>,
    seed: u64,
) -> PyResult<Option<(&'static str, usize, usize)>> {
    let rows = vertical.len();
    let cols = horizontal.first().map_or(0, Vec::len);
    if rows == 0
        || cols == 0
        || horizontal.len() != rows + 1
        || horizontal.iter().any(|r| r.len() != cols)
        || vertical.iter().any(|r| r.len() != cols + 1)
    {
        return Err(value_error("edge grids do not describe a board".to_string()));
    }

    let mut board = DotsBoard::new(rows, cols);
    for (r, row) in horizontal.iter().enumerate() {
        for (c, &drawn) in row.iter().enumerate() {
            if drawn {
                board.draw(Edge::horizontal(r, c), Side::One);
            }
        }
    }
    for (r, row) in vertical.iter().enumerate() {
        for (c, &drawn) in row.iter().enumerate() {
            if drawn {
                board.draw(Edge::vertical(r, c), Side::One);
            }
        }
    }

    let mut rng = GameRng::new(seed);
    let edge = DotsEngine::new().best_move(&board, Side::One, &mut rng);
    Ok(edge.map(|e| {
        let tag = match e.orientation {
            Orientation::Horizontal => "h",
            Orientation::Vertical => "v",
        };
        (tag, e.row, e.col)
    }))
}

//! Python bindings for the game engines.
//!
//! # Quick Start
//!
//! ```python
//! import rust_parlor as parlor
//!
//! cell = parlor.tictactoe_move([1, 0, 0, 0, 2, 0, 0, 0, 0], side=1)
//! column = parlor.connect_four_move(rows, side=2, seed=7)
//! direction = parlor.slide_move(grid)   # "left" / "right" / "up" / "down" / None
//! edge = parlor.dots_move(horizontal, vertical, seed=7)
//! ```

use pyo3::prelude::*;

mod py_games;

pub use py_games::*;

/// rust_parlor: move engines for four parlor games.
#[pymodule]
fn rust_parlor(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(tictactoe_move, m)?)?;
    m.add_function(wrap_pyfunction!(connect_four_move, m)?)?;
    m.add_function(wrap_pyfunction!(slide_move, m)?)?;
    m.add_function(wrap_pyfunction!(dots_move, m)?)?;
    Ok(())
}

//! Rules for the adversarial games.
//!
//! Games implement `TwoPlayerGame` to define:
//! - Legal moves for a board
//! - How moves modify the board
//! - Win/draw conditions
//!
//! The minimax engine calls into `TwoPlayerGame` but never interprets
//! game-specific concepts directly.

pub mod engine;
pub mod session;

pub use engine::{GameResult, MoveList, TwoPlayerGame};
pub use session::Match;

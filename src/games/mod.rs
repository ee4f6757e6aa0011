//! The four games and their engines.
//!
//! - `tictactoe`: exhaustive minimax
//! - `connect_four`: win/block shortcuts, then depth-limited minimax
//! - `slide`: the 4×4 sliding-merge puzzle, played by expectimax
//! - `dots_boxes`: greedy three-tier edge classifier

pub mod connect_four;
pub mod dots_boxes;
pub mod slide;
pub mod tictactoe;

pub use connect_four::{ConnectFour, ConnectFourEngine, Decision, WindowEvaluator};
pub use dots_boxes::{Classification, DotsBoard, DotsEngine, DotsMatch, Edge, Orientation, Tier, TurnReport};
pub use slide::{Direction, Grid, MoveReport, SlideEngine, SlideGame, SlideSnapshot};
pub use tictactoe::{TicTacToe, TicTacToeEngine};

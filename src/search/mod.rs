//! Search engines and the decision trait they share.
//!
//! ## Overview
//!
//! - `Minimax`: alpha-beta over any `TwoPlayerGame`, exhaustive or
//!   depth-limited with a pluggable `Evaluator`
//! - `Expectimax`: max/average search over the sliding-merge grid
//! - `Agent`: the one call the shell makes on an engine's turn
//!
//! ## Usage
//!
//! ```rust
//! use rust_parlor::core::{GameRng, Side};
//! use rust_parlor::games::{TicTacToe, TicTacToeEngine};
//! use rust_parlor::search::Agent;
//!
//! let engine = TicTacToeEngine::default();
//! let mut rng = GameRng::new(42);
//! let cell = engine.best_move(&TicTacToe::new(), Side::One, &mut rng);
//! assert!(cell.is_some());
//! ```

pub mod agent;
pub mod expectimax;
pub mod minimax;
pub mod stats;

pub use agent::Agent;
pub use expectimax::{BranchEval, Expectimax, ExpectimaxOutcome};
pub use minimax::{Evaluator, Minimax, NullEvaluator, SearchOutcome};
pub use stats::SearchStats;

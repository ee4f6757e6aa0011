//! # rust-parlor
//!
//! Move engines for four small games, behind one decision call.
//!
//! ## Engines
//!
//! - **Tic-tac-toe**: exhaustive minimax with alpha-beta. Never loses.
//! - **Connect four**: take a winning drop, else block the opponent's,
//!   else a 4-ply minimax scored by a window-counting heuristic.
//! - **2048**: depth-3 expectimax over slides and random tile spawns.
//! - **Dots and boxes**: complete a box if possible, else avoid handing one
//!   over, else play anything.
//!
//! ## Design Principles
//!
//! 1. **Snapshots in, move out**: engines read the board, never mutate it,
//!    and keep no state between calls. `None` means there is no move.
//!
//! 2. **Caller-owned randomness**: every tie-break and tile spawn draws from
//!    a `GameRng` the caller lends, so a seed replays a whole game.
//!
//! 3. **Shell outside**: rendering and input live with the caller (see the
//!    `python` feature). The library only decides.
//!
//! ## Modules
//!
//! - `core`: sides, per-side storage, RNG, configuration, errors
//! - `rules`: the two-player game trait and a turn-tracking `Match`
//! - `search`: minimax, expectimax, statistics, the `Agent` trait
//! - `games`: boards and engines for each game
//! - `store`: best-score file for 2048

pub mod core;
pub mod games;
pub mod rules;
pub mod search;
pub mod store;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, ConnectFourConfig, EngineConfig, ExpectimaxConfig, GameRng, GameRngState,
    MatchError, MinimaxConfig, PerSide, Side, SpawnOdds, StoreError, WindowWeights,
};

pub use crate::rules::{GameResult, Match, MoveList, TwoPlayerGame};

pub use crate::search::{
    Agent, BranchEval, Evaluator, Expectimax, ExpectimaxOutcome, Minimax, NullEvaluator,
    SearchOutcome, SearchStats,
};

pub use crate::games::{
    Classification, ConnectFour, ConnectFourEngine, Decision, Direction, DotsBoard, DotsEngine,
    DotsMatch, Edge, Grid, MoveReport, Orientation, SlideEngine, SlideGame, TicTacToe,
    TicTacToeEngine, Tier, TurnReport, WindowEvaluator,
};

pub use crate::store::BestScoreStore;

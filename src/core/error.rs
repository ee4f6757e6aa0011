//! Error types.
//!
//! Engines do not fail: an exhausted move set is `None`. These errors cover
//! the edges of the crate that touch text or files.

use thiserror::Error;

/// Problems loading an `EngineConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("spawn probabilities must be positive and sum to 1, got {0}")]
    SpawnOdds(f64),

    #[error("expectimax depth must be at least 1")]
    ZeroDepth,

    #[error("connect four needs a depth limit")]
    UnboundedDepth,
}

/// Problems reading or writing the best-score file.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed score file: {0}")]
    Json(#[from] serde_json::Error),
}

/// A move the shell tried to apply through a `Match`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MatchError {
    #[error("the game is already over")]
    GameOver,

    #[error("move {0} is not legal on this board")]
    IllegalMove(String),
}

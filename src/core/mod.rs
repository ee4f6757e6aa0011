//! Core types: sides, per-side storage, RNG, configuration, errors.
//!
//! Nothing in here knows about a particular game.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{PerSide, Side};
pub use rng::{GameRng, GameRngState};
pub use config::{
    ConnectFourConfig, EngineConfig, ExpectimaxConfig, MinimaxConfig, SpawnOdds, WindowWeights,
};
pub use error::{ConfigError, MatchError, StoreError};

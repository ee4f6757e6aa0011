//! Engine configuration.
//!
//! Search depths and heuristic weights are plain values handed to each
//! engine at construction. The defaults reproduce the fixed behavior of
//! the shipped games:
//! - tic-tac-toe: exhaustive search, wins worth 10
//! - connect four: 4-ply search, window weights 100 / 5 / 2 / -4, center 3
//! - 2048: expectimax depth 3, weights 100 / 2 / 10, spawns 2 (0.9) and 4 (0.1)

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Minimax search parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimaxConfig {
    /// Plies searched below each root move. `None` searches to the end of
    /// the game.
    pub max_depth: Option<u32>,

    /// Score of a win found at ply 0. Each extra ply costs one point, so
    /// faster wins and slower losses score better.
    pub win_score: i32,

    /// Alpha-beta pruning. Disabling it never changes a score, only the
    /// node count.
    pub pruning: bool,

    /// Break ties between equally scored root moves with the RNG instead of
    /// taking the first in move order.
    pub random_tie_break: bool,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self::exhaustive()
    }
}

impl MinimaxConfig {
    /// Search to the natural end of the game.
    #[must_use]
    pub fn exhaustive() -> Self {
        Self {
            max_depth: None,
            win_score: 10,
            pruning: true,
            random_tie_break: false,
        }
    }

    /// Search `depth` plies below each root move, then evaluate.
    #[must_use]
    pub fn depth_limited(depth: u32) -> Self {
        Self {
            max_depth: Some(depth),
            win_score: 1_000_000,
            pruning: true,
            random_tie_break: true,
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, depth: Option<u32>) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn with_win_score(mut self, score: i32) -> Self {
        self.win_score = score;
        self
    }

    #[must_use]
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    #[must_use]
    pub fn with_random_tie_break(mut self, random: bool) -> Self {
        self.random_tie_break = random;
        self
    }
}

/// Connect-four window scoring weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowWeights {
    /// Four own pieces.
    pub four: i32,
    /// Three own pieces and one empty cell.
    pub three: i32,
    /// Two own pieces and two empty cells.
    pub two: i32,
    /// Three opponent pieces and one empty cell (negative).
    pub opponent_three: i32,
    /// Per own piece in the center column.
    pub center: i32,
}

impl Default for WindowWeights {
    fn default() -> Self {
        Self {
            four: 100,
            three: 5,
            two: 2,
            opponent_three: -4,
            center: 3,
        }
    }
}

/// Connect-four engine parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectFourConfig {
    pub search: MinimaxConfig,
    pub weights: WindowWeights,
}

impl Default for ConnectFourConfig {
    fn default() -> Self {
        Self {
            search: MinimaxConfig::depth_limited(4),
            weights: WindowWeights::default(),
        }
    }
}

impl ConnectFourConfig {
    /// Reject an exhaustive search; the connect-four tree is too large for it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.max_depth.is_none() {
            return Err(ConfigError::UnboundedDepth);
        }
        Ok(())
    }
}

/// A tile value the chance node may spawn and its probability.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnOdds {
    pub value: u32,
    pub probability: f64,
}

/// Expectimax parameters for the sliding-merge game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectimaxConfig {
    /// Remaining depth handed to the chance node after each root move.
    /// Every node below consumes one level; 0 evaluates.
    pub depth: u32,

    /// Weight per empty cell.
    pub empty_weight: f64,

    /// Weight on the largest tile value.
    pub max_tile_weight: f64,

    /// Weight on the row monotonicity score.
    pub monotonicity_weight: f64,

    /// Tiles the chance node spawns.
    pub spawns: Vec<SpawnOdds>,
}

impl Default for ExpectimaxConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            empty_weight: 100.0,
            max_tile_weight: 2.0,
            monotonicity_weight: 10.0,
            spawns: vec![
                SpawnOdds { value: 2, probability: 0.9 },
                SpawnOdds { value: 4, probability: 0.1 },
            ],
        }
    }
}

impl ExpectimaxConfig {
    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn with_weights(mut self, empty: f64, max_tile: f64, monotonicity: f64) -> Self {
        self.empty_weight = empty;
        self.max_tile_weight = max_tile;
        self.monotonicity_weight = monotonicity;
        self
    }

    /// Check the spawn table and depth.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        let total: f64 = self.spawns.iter().map(|s| s.probability).sum();
        let all_positive = self.spawns.iter().all(|s| s.probability > 0.0);
        if !all_positive || (total - 1.0).abs() > 1e-9 {
            return Err(ConfigError::SpawnOdds(total));
        }
        Ok(())
    }
}

/// Configuration for every engine, as the shell would load it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tictactoe: MinimaxConfig,
    pub connect_four: ConnectFourConfig,
    pub slide: ExpectimaxConfig,
}

impl EngineConfig {
    /// Parse from JSON. Missing sections keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.connect_four.validate()?;
        config.slide.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_shipped_games() {
        let config = EngineConfig::default();

        assert_eq!(config.tictactoe.max_depth, None);
        assert_eq!(config.tictactoe.win_score, 10);
        assert!(!config.tictactoe.random_tie_break);

        assert_eq!(config.connect_four.search.max_depth, Some(4));
        assert_eq!(config.connect_four.weights.four, 100);
        assert_eq!(config.connect_four.weights.opponent_three, -4);

        assert_eq!(config.slide.depth, 3);
        assert_eq!(config.slide.spawns.len(), 2);
        assert!(config.slide.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = MinimaxConfig::exhaustive()
            .with_max_depth(Some(2))
            .with_win_score(50)
            .with_pruning(false)
            .with_random_tie_break(true);

        assert_eq!(config.max_depth, Some(2));
        assert_eq!(config.win_score, 50);
        assert!(!config.pruning);
        assert!(config.random_tie_break);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{"slide": {"depth": 2}}"#).unwrap();

        assert_eq!(config.slide.depth, 2);
        assert_eq!(config.slide.empty_weight, 100.0);
        assert_eq!(config.connect_four, ConnectFourConfig::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed = EngineConfig::from_json(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_rejects_bad_spawn_odds() {
        let json = r#"{"slide": {"spawns": [{"value": 2, "probability": 0.5}]}}"#;
        assert!(matches!(
            EngineConfig::from_json(json),
            Err(ConfigError::SpawnOdds(_))
        ));
    }

    #[test]
    fn test_rejects_zero_depth() {
        let config = ExpectimaxConfig::default().with_depth(0);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroDepth)));
    }

    #[test]
    fn test_rejects_unbounded_connect_four() {
        let json = r#"{"connect_four": {"search": {"max_depth": null}}}"#;
        assert!(matches!(
            EngineConfig::from_json(json),
            Err(ConfigError::UnboundedDepth)
        ));

        let json = r#"{"connect_four": {"search": {"max_depth": 2}}}"#;
        let config = EngineConfig::from_json(json).unwrap();
        assert_eq!(config.connect_four.search.max_depth, Some(2));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            EngineConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
    }
}

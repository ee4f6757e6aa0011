//! Expectimax search for the sliding-merge game.
//!
//! Node kinds alternate:
//! - **decision**: max over the directions that change the grid
//! - **chance**: average over every empty cell (uniform) and every spawn
//!   value (weighted by its probability)
//!
//! Each root direction hands `config.depth` to its chance node; every node
//! below consumes one level and evaluates at 0. A chance node with no empty
//! cell evaluates too. A decision node with no legal direction is worth 0.
//!
//! The search only ever works on copies (`Grid` is `Copy`).

use std::time::Instant;

use log::debug;

use crate::core::ExpectimaxConfig;
use crate::games::slide::{Direction, Grid};

use super::stats::SearchStats;

/// Expected value of one root direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BranchEval {
    pub dir: Direction,
    pub value: f64,
}

/// Result of one expectimax decision.
#[derive(Clone, Debug)]
pub struct ExpectimaxOutcome {
    /// Best direction, `None` if no direction changes the grid.
    pub best: Option<Direction>,
    /// Value of `best` (0 when there is none).
    pub value: f64,
    /// Every legal root direction with its value, in `Direction::ALL` order.
    pub branches: Vec<BranchEval>,
    pub stats: SearchStats,
}

/// Depth-limited expectimax.
#[derive(Clone, Debug, Default)]
pub struct Expectimax {
    config: ExpectimaxConfig,
}

impl Expectimax {
    pub fn new(config: ExpectimaxConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ExpectimaxConfig {
        &self.config
    }

    /// Static score: weighted empty cells, max tile, and row monotonicity.
    #[must_use]
    pub fn evaluate(&self, grid: &Grid) -> f64 {
        let c = &self.config;
        grid.empty_cells().len() as f64 * c.empty_weight
            + f64::from(grid.max_tile()) * c.max_tile_weight
            + f64::from(grid.monotonicity()) * c.monotonicity_weight
    }

    /// Value every legal direction and pick the best.
    ///
    /// Ties keep the earliest direction in `Direction::ALL` order.
    pub fn analyze(&self, grid: &Grid) -> ExpectimaxOutcome {
        let start = Instant::now();
        let mut stats = SearchStats::new();

        let branches: Vec<BranchEval> = Direction::ALL
            .into_iter()
            .filter_map(|dir| {
                let next = grid.moved(dir)?;
                let value = self.chance(&next, self.config.depth, 0, &mut stats);
                Some(BranchEval { dir, value })
            })
            .collect();

        let mut best: Option<BranchEval> = None;
        for branch in &branches {
            if best.map_or(true, |b| branch.value > b.value) {
                best = Some(*branch);
            }
        }

        stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            "expectimax: {:?} valued {:.1} ({} nodes, {:.0} nodes/s)",
            best.map(|b| b.dir),
            best.map_or(0.0, |b| b.value),
            stats.nodes,
            stats.nodes_per_second()
        );

        ExpectimaxOutcome {
            best: best.map(|b| b.dir),
            value: best.map_or(0.0, |b| b.value),
            branches,
            stats,
        }
    }

    fn decision(&self, grid: &Grid, depth: u32, ply: u32, stats: &mut SearchStats) -> f64 {
        stats.visit(ply);
        if depth == 0 {
            return self.evaluate(grid);
        }

        Direction::ALL
            .into_iter()
            .filter_map(|dir| grid.moved(dir))
            .map(|next| self.chance(&next, depth - 1, ply + 1, stats))
            .fold(0.0, f64::max)
    }

    fn chance(&self, grid: &Grid, depth: u32, ply: u32, stats: &mut SearchStats) -> f64 {
        stats.visit(ply);
        if depth == 0 {
            return self.evaluate(grid);
        }

        let empty = grid.empty_cells();
        if empty.is_empty() {
            return self.evaluate(grid);
        }

        let cell_weight = 1.0 / empty.len() as f64;
        let mut expected = 0.0;
        for &(row, col) in &empty {
            for spawn in &self.config.spawns {
                let mut child = *grid;
                child.set(row, col, spawn.value);
                expected += spawn.probability
                    * cell_weight
                    * self.decision(&child, depth - 1, ply + 1, stats);
            }
        }
        expected
    }
}

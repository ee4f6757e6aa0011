//! Minimax search with alpha-beta pruning.
//!
//! Scores are always from the searching side's point of view:
//! - a win found `ply` moves below a root move scores `win_score - ply`
//! - a loss scores `ply - win_score`
//! - a draw scores 0
//! - a non-terminal board at the depth limit gets the `Evaluator` score
//!
//! Each root move is searched with a fresh `[i32::MIN, i32::MAX]` window so
//! every root score is exact. Ties can then be broken fairly.

use std::marker::PhantomData;
use std::time::Instant;

use log::debug;

use crate::core::{GameRng, MinimaxConfig, Side};
use crate::rules::{GameResult, TwoPlayerGame};

use super::stats::SearchStats;

/// Static score of a non-terminal board at a search cutoff.
pub trait Evaluator<G: TwoPlayerGame> {
    /// Score `board` from `side`'s point of view.
    fn evaluate(&self, board: &G, side: Side) -> i32;
}

/// Evaluator for searches that always reach terminal boards.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullEvaluator;

impl<G: TwoPlayerGame> Evaluator<G> for NullEvaluator {
    fn evaluate(&self, _board: &G, _side: Side) -> i32 {
        0
    }
}

/// Result of analysing one board.
#[derive(Clone, Debug)]
pub struct SearchOutcome<M> {
    /// Chosen move, `None` if the board has no legal move or is finished.
    pub best: Option<M>,
    /// Score of the chosen move (or of the board itself when `best` is `None`).
    pub score: i32,
    /// Exact score of every root move, in move order.
    pub scores: Vec<(M, i32)>,
    pub stats: SearchStats,
}

/// Minimax engine generic over game and cutoff evaluator.
#[derive(Clone, Debug)]
pub struct Minimax<G, E> {
    config: MinimaxConfig,
    evaluator: E,
    _game: PhantomData<fn(&G)>,
}

impl<G: TwoPlayerGame, E: Evaluator<G>> Minimax<G, E> {
    pub fn new(config: MinimaxConfig, evaluator: E) -> Self {
        Self {
            config,
            evaluator,
            _game: PhantomData,
        }
    }

    #[must_use]
    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }

    #[must_use]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Search every root move and pick the best.
    pub fn analyze(&self, board: &G, side: Side, rng: &mut GameRng) -> SearchOutcome<G::Move> {
        let start = Instant::now();
        let mut stats = SearchStats::new();

        let scores = self.root_scores(board, side, &mut stats);
        let best_score = scores.iter().map(|&(_, s)| s).max();

        let (best, score) = match best_score {
            Some(top) => {
                let tied: Vec<G::Move> = scores
                    .iter()
                    .filter(|&&(_, s)| s == top)
                    .map(|&(mv, _)| mv)
                    .collect();
                let pick = if self.config.random_tie_break {
                    rng.choose(&tied).copied()
                } else {
                    tied.first().copied()
                };
                (pick, top)
            }
            None => (None, self.static_score(board, side, 0)),
        };

        stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            "minimax: {:?} for {} scored {} ({} nodes, {} cutoffs, {:.0} nodes/s)",
            best,
            side,
            score,
            stats.nodes,
            stats.cutoffs,
            stats.nodes_per_second()
        );

        SearchOutcome {
            best,
            score,
            scores,
            stats,
        }
    }

    /// Exact score of each legal root move. Empty on a finished board.
    pub fn score_moves(&self, board: &G, side: Side) -> Vec<(G::Move, i32)> {
        self.root_scores(board, side, &mut SearchStats::new())
    }

    fn root_scores(&self, board: &G, side: Side, stats: &mut SearchStats) -> Vec<(G::Move, i32)> {
        if board.outcome().is_some() {
            return Vec::new();
        }

        board
            .legal_moves()
            .into_iter()
            .map(|mv| {
                let mut child = board.clone();
                child.play(mv, side);
                let score =
                    self.alphabeta(&child, side, side.opponent(), 0, i32::MIN, i32::MAX, stats);
                (mv, score)
            })
            .collect()
    }

    /// Score `board` for `root`, with `to_move` about to play `ply` moves
    /// below the root move.
    #[allow(clippy::too_many_arguments)]
    fn alphabeta(
        &self,
        board: &G,
        root: Side,
        to_move: Side,
        ply: u32,
        mut alpha: i32,
        mut beta: i32,
        stats: &mut SearchStats,
    ) -> i32 {
        stats.visit(ply);

        if board.outcome().is_some() || self.config.max_depth.is_some_and(|max| ply >= max) {
            return self.static_score(board, root, ply);
        }

        let moves = board.legal_moves();
        if moves.is_empty() {
            return self.evaluator.evaluate(board, root);
        }

        let maximizing = to_move == root;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for mv in moves {
            let mut child = board.clone();
            child.play(mv, to_move);
            let score = self.alphabeta(&child, root, to_move.opponent(), ply + 1, alpha, beta, stats);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if self.config.pruning && alpha >= beta {
                stats.cutoffs += 1;
                break;
            }
        }

        best
    }

    /// Terminal score, or the evaluator for a live board.
    fn static_score(&self, board: &G, root: Side, ply: u32) -> i32 {
        let ply = ply as i32;
        match board.outcome() {
            Some(GameResult::Winner(w)) if w == root => self.config.win_score - ply,
            Some(GameResult::Winner(_)) => ply - self.config.win_score,
            Some(GameResult::Draw) => 0,
            None => self.evaluator.evaluate(board, root),
        }
    }
}

//! Tic-tac-toe engine and match integration tests.

use proptest::prelude::*;
use rust_parlor::core::{GameRng, MatchError, MinimaxConfig, Side};
use rust_parlor::games::{TicTacToe, TicTacToeEngine};
use rust_parlor::rules::{GameResult, Match, TwoPlayerGame};
use rust_parlor::search::{Agent, Minimax, NullEvaluator};

/// Play every possible opponent line against the engine and count losses.
fn losses_against_all_lines(
    engine: &TicTacToeEngine,
    board: TicTacToe,
    to_move: Side,
    engine_side: Side,
) -> usize {
    match board.outcome() {
        Some(GameResult::Winner(side)) => return usize::from(side != engine_side),
        Some(GameResult::Draw) => return 0,
        None => {}
    }

    if to_move == engine_side {
        let cell = engine
            .best_move(&board, engine_side, &mut GameRng::new(0))
            .expect("unfinished board has a move");
        let mut next = board;
        next.play(cell, engine_side);
        losses_against_all_lines(engine, next, to_move.opponent(), engine_side)
    } else {
        board
            .legal_moves()
            .into_iter()
            .map(|cell| {
                let mut next = board;
                next.play(cell, to_move);
                losses_against_all_lines(engine, next, to_move.opponent(), engine_side)
            })
            .sum()
    }
}

// =============================================================================
// Engine Strength
// =============================================================================

#[test]
fn test_engine_never_loses_moving_first() {
    let engine = TicTacToeEngine::default();
    let losses = losses_against_all_lines(&engine, TicTacToe::new(), Side::One, Side::One);
    assert_eq!(losses, 0);
}

#[test]
fn test_engine_never_loses_after_any_opening() {
    let engine = TicTacToeEngine::default();
    for opening in 0..9 {
        let mut board = TicTacToe::new();
        board.play(opening, Side::One);
        let losses = losses_against_all_lines(&engine, board, Side::Two, Side::Two);
        assert_eq!(losses, 0, "lost a line after opening {opening}");
    }
}

#[test]
fn test_self_play_draws() {
    let engine = TicTacToeEngine::default();
    let mut game = Match::new(TicTacToe::new(), Side::One);
    let mut rng = GameRng::new(1);

    while !game.is_over() {
        let cell = engine.best_move(game.board(), game.to_move(), &mut rng).unwrap();
        game.apply(cell).unwrap();
    }

    assert_eq!(game.result(), Some(GameResult::Draw));
    assert_eq!(game.history().len(), 9);
}

#[test]
fn test_every_empty_board_move_scores_a_draw() {
    let engine = TicTacToeEngine::default();
    let outcome = engine.analyze(&TicTacToe::new(), Side::One, &mut GameRng::new(0));

    assert_eq!(outcome.scores.len(), 9);
    assert!(outcome.scores.iter().all(|&(_, score)| score == 0));
    // Deterministic tie-break keeps the first cell.
    assert_eq!(outcome.best, Some(0));
}

#[test]
fn test_random_tie_break_is_seeded() {
    let engine = TicTacToeEngine::new(MinimaxConfig::exhaustive().with_random_tie_break(true));
    let board = TicTacToe::new();

    let a = engine.best_move(&board, Side::One, &mut GameRng::new(99));
    let b = engine.best_move(&board, Side::One, &mut GameRng::new(99));
    assert_eq!(a, b);
}

// =============================================================================
// Match
// =============================================================================

#[test]
fn test_match_alternates_and_freezes() {
    let mut game = Match::new(TicTacToe::new(), Side::One);

    for cell in [0, 3, 1, 4] {
        assert_eq!(game.apply(cell), Ok(None));
    }
    assert_eq!(game.to_move(), Side::One);

    assert_eq!(game.apply(2), Ok(Some(GameResult::Winner(Side::One))));
    assert!(game.is_over());
    assert_eq!(game.apply(8), Err(MatchError::GameOver));
}

#[test]
fn test_match_rejects_occupied_cell() {
    let mut game = Match::new(TicTacToe::new(), Side::Two);
    game.apply(4).unwrap();

    assert!(matches!(game.apply(4), Err(MatchError::IllegalMove(_))));
    assert_eq!(game.to_move(), Side::One);
}

#[test]
fn test_match_reset() {
    let mut game = Match::new(TicTacToe::new(), Side::One);
    game.apply(0).unwrap();
    game.apply(1).unwrap();
    game.reset();

    assert_eq!(game.board(), &TicTacToe::new());
    assert_eq!(game.to_move(), Side::One);
    assert!(game.history().is_empty());
}

// =============================================================================
// Properties
// =============================================================================

/// Boards reached by at least two random legal moves, with the side to move.
fn arb_board() -> impl Strategy<Value = (TicTacToe, Side)> {
    proptest::collection::vec(0usize..9, 2..7).prop_map(|picks| {
        let mut board = TicTacToe::new();
        let mut side = Side::One;
        for pick in picks {
            let moves = board.legal_moves();
            if board.outcome().is_some() || moves.is_empty() {
                break;
            }
            board.play(moves[pick % moves.len()], side);
            side = side.opponent();
        }
        (board, side)
    })
}

proptest! {
    #[test]
    fn prop_pruning_preserves_root_scores((board, side) in arb_board()) {
        let pruned = Minimax::<TicTacToe, _>::new(MinimaxConfig::exhaustive(), NullEvaluator);
        let plain = Minimax::<TicTacToe, _>::new(
            MinimaxConfig::exhaustive().with_pruning(false),
            NullEvaluator,
        );

        prop_assert_eq!(pruned.score_moves(&board, side), plain.score_moves(&board, side));
    }

    #[test]
    fn prop_engine_move_is_legal((board, side) in arb_board()) {
        let engine = TicTacToeEngine::default();
        match engine.best_move(&board, side, &mut GameRng::new(0)) {
            Some(cell) => prop_assert!(board.get(cell).is_none()),
            None => prop_assert!(board.outcome().is_some()),
        }
    }
}

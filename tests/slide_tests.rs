//! Sliding-merge grid, session, engine, and best-score store tests.

use proptest::prelude::*;
use rust_parlor::core::{ExpectimaxConfig, GameRng, Side};
use rust_parlor::games::slide::{Direction, Grid, SlideEngine, SlideGame, SIZE};
use rust_parlor::search::Agent;
use rust_parlor::store::BestScoreStore;
use tempfile::TempDir;

fn tile_sum(grid: &Grid) -> u64 {
    grid.rows().iter().flatten().map(|&v| u64::from(v)).sum()
}

fn tile_count(grid: &Grid) -> usize {
    grid.rows().iter().flatten().filter(|&&v| v != 0).count()
}

// =============================================================================
// Strategies
// =============================================================================

fn arb_tile() -> impl Strategy<Value = u32> {
    prop_oneof![
        4 => Just(0u32),
        1 => Just(2u32),
        1 => Just(4u32),
        1 => Just(8u32),
        1 => Just(16u32),
        1 => Just(128u32),
    ]
}

fn arb_grid() -> impl Strategy<Value = Grid> {
    proptest::collection::vec(arb_tile(), SIZE * SIZE).prop_map(|tiles| {
        let mut grid = Grid::new();
        for (i, value) in tiles.into_iter().enumerate() {
            grid.set(i / SIZE, i % SIZE, value);
        }
        grid
    })
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Left),
        Just(Direction::Right),
        Just(Direction::Up),
        Just(Direction::Down),
    ]
}

// =============================================================================
// Grid Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_transpose_is_involution(grid in arb_grid()) {
        prop_assert_eq!(grid.transpose().transpose(), grid);
        prop_assert_eq!(grid.mirror().mirror(), grid);
    }

    #[test]
    fn prop_slide_conserves_tile_sum(grid in arb_grid(), dir in arb_direction()) {
        let (next, gained) = grid.slide(dir);
        prop_assert_eq!(tile_sum(&next), tile_sum(&grid));
        // Each merge removes one tile and scores the merged value.
        prop_assert!(tile_count(&next) <= tile_count(&grid));
        prop_assert_eq!(gained == 0, tile_count(&next) == tile_count(&grid));
    }

    #[test]
    fn prop_legal_directions_change_grid(grid in arb_grid()) {
        for dir in Direction::ALL {
            let changed = grid.slide(dir).0 != grid;
            prop_assert_eq!(grid.legal_directions().contains(&dir), changed);
        }
    }

    #[test]
    fn prop_engine_picks_legal_direction(grid in arb_grid()) {
        let engine = SlideEngine::new(ExpectimaxConfig::default().with_depth(1));
        match engine.best_move(&grid, Side::One, &mut GameRng::new(0)) {
            Some(dir) => prop_assert!(grid.moved(dir).is_some()),
            None => prop_assert!(!grid.can_move()),
        }
    }
}

// =============================================================================
// Session
// =============================================================================

#[test]
fn test_seeded_games_replay() {
    let mut a = SlideGame::new(2024, 0);
    let mut b = SlideGame::new(2024, 0);

    for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down].repeat(5) {
        assert_eq!(a.apply(dir), b.apply(dir));
        assert_eq!(a.grid(), b.grid());
    }
    assert_eq!(a.score(), b.score());
}

#[test]
fn test_reset_keeps_best_score() {
    let grid = Grid::from_rows([
        [4, 4, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]);
    let mut game = SlideGame::from_grid(grid, 5);
    game.apply(Direction::Left);
    assert_eq!(game.best_score(), 8);

    game.reset();
    assert_eq!(game.score(), 0);
    assert_eq!(game.best_score(), 8);
    assert_eq!(game.grid().empty_cells().len(), 14);
}

#[test]
fn test_engine_plays_a_game() {
    let engine = SlideEngine::new(ExpectimaxConfig::default().with_depth(1));
    let mut game = SlideGame::new(17, 0);
    let mut rng = GameRng::new(0);

    for _ in 0..200 {
        let Some(dir) = engine.best_move(game.grid(), Side::One, &mut rng) else {
            break;
        };
        assert!(game.apply(dir).moved);
    }

    assert!(game.score() > 0);
    assert!(game.grid().max_tile() >= 16);
}

#[test]
fn test_best_score_flows_through_store() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = BestScoreStore::new(dir.path().join("2048_highscore.json"));

    let mut game = SlideGame::new(3, store.load());
    assert_eq!(game.best_score(), 0);

    let engine = SlideEngine::new(ExpectimaxConfig::default().with_depth(1));
    let mut rng = GameRng::new(0);
    for _ in 0..20 {
        if let Some(dir) = engine.best_move(game.grid(), Side::One, &mut rng) {
            game.apply(dir);
        }
    }

    assert!(store.record(game.score()));
    let resumed = SlideGame::new(4, store.load());
    assert_eq!(resumed.best_score(), game.score());
}

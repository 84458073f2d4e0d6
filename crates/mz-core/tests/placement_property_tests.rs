//! Property-based tests for collectible and exit placement

use mz_core::placement::{place_collectibles, select_exit};
use mz_core::{
    CellKind, CollectibleConfig, GeneratorConfig, LevelGenerator, MazeGrid, MazeMode, MazeRng,
    Position,
};
use proptest::prelude::*;

fn mode_strategy() -> impl Strategy<Value = MazeMode> {
    prop_oneof![Just(MazeMode::Backtrack), Just(MazeMode::Rooms)]
}

/// Property: placed collectibles are pairwise at least `min_distance` apart
/// and never cover Start or Exit.
#[test]
fn prop_collectible_spacing() {
    proptest!(ProptestConfig::with_cases(48), |(
        seed in any::<u64>(),
        mode in mode_strategy(),
        side in 5usize..40,
        min_distance in 1usize..8,
    )| {
        let config = GeneratorConfig {
            collectibles: CollectibleConfig { max_count: 12, min_distance },
            ..GeneratorConfig::default()
        };
        let mut generator = LevelGenerator::with_seed(config, seed);
        let mut grid = generator.generate(mode, side, side);
        let placed = generator.place_collectibles(&mut grid, 12);

        for (i, a) in placed.iter().enumerate() {
            for b in &placed[i + 1..] {
                prop_assert!(a.manhattan(*b) >= min_distance);
            }
        }
        prop_assert_eq!(grid.count(CellKind::Start), 1);
        prop_assert_eq!(grid.count(CellKind::Exit), 1);
        prop_assert_eq!(grid.count(CellKind::Collectible), placed.len());
    });
}

/// Property: never more than `min(requested, max_count)`, and the call
/// returns even when the request cannot be met.
#[test]
fn prop_bounded_placement() {
    proptest!(ProptestConfig::with_cases(64), |(
        seed in any::<u64>(),
        requested in 0usize..60,
        max_count in 0usize..20,
        min_distance in 0usize..30,
    )| {
        let mut grid: MazeGrid = "#######\n#S...E#\n#######\n".parse().unwrap();
        let config = CollectibleConfig { max_count, min_distance };
        let mut rng = MazeRng::new(seed);
        let placed = place_collectibles(&mut grid, requested, &config, &mut rng);
        prop_assert!(placed.len() <= requested.min(max_count));
        prop_assert!(placed.len() <= 3);
    });
}

/// Property: in an open room the corner opposite Start always wins.
#[test]
fn prop_exit_prefers_opposite_corner() {
    proptest!(ProptestConfig::with_cases(64), |(width in 5usize..40, height in 5usize..40)| {
        let mut grid = MazeGrid::new(width, height);
        for z in 1..height - 1 {
            for x in 1..width - 1 {
                grid.set(Position::new(x, z), CellKind::Floor);
            }
        }
        grid.set(Position::new(1, 1), CellKind::Start);

        let exit = select_exit(&mut grid);
        prop_assert_eq!(exit, Some(Position::new(width - 2, height - 2)));
        prop_assert_eq!(grid.count(CellKind::Exit), 1);
    });
}

/// Property: the selected exit of a full level is a reachable former Floor
/// cell, and its world coordinate matches the configured cell size.
#[test]
fn prop_level_exit_consistent() {
    proptest!(ProptestConfig::with_cases(32), |(seed in any::<u64>(), level in 1u32..10)| {
        let mut generator = LevelGenerator::with_seed(GeneratorConfig::default(), seed);
        let level = generator.generate_level(level);
        prop_assert_eq!(level.grid.get(level.exit), CellKind::Exit);
        prop_assert_eq!(level.exit_world, level.exit.to_world(2.0));
        prop_assert!(level.grid.validate(level.mode).is_ok());
    });
}

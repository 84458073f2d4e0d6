use mz_core::generate::find_path;
use mz_core::{CellKind, CollectibleConfig, GeneratorConfig, LevelGenerator, MazeMode, Position};

#[test]
fn test_room_maze_21_by_21() {
    for seed in 0..20 {
        let mut generator = LevelGenerator::with_seed(GeneratorConfig::default(), seed);
        let grid = generator.generate_room_maze(21, 21);
        assert_eq!(grid.get(Position::new(1, 1)), CellKind::Start);
        assert_eq!(grid.count(CellKind::Exit), 1);
        let exit = grid.exit().unwrap();
        assert!(find_path(&grid, Position::new(1, 1), exit).is_some());
    }
}

#[test]
fn test_collectibles_capped_at_max_count() {
    let config = GeneratorConfig {
        collectibles: CollectibleConfig {
            max_count: 5,
            min_distance: 4,
        },
        ..GeneratorConfig::default()
    };
    let mut generator = LevelGenerator::with_seed(config, 2024);
    let mut grid = generator.generate_backtrack_maze(31, 31);
    generator.find_exit_position(&mut grid);
    let placed = generator.place_collectibles(&mut grid, 20);

    // a 31x31 maze has room for five well-spaced collectibles
    assert_eq!(placed.len(), 5);
    let start = grid.start().unwrap();
    let exit = grid.exit().unwrap();
    assert!(!placed.contains(&start));
    assert!(!placed.contains(&exit));
}

#[test]
fn test_exit_on_backtrack_maze_is_inner_corner() {
    let mut generator = LevelGenerator::with_seed(GeneratorConfig::default(), 8);
    let mut grid = generator.generate_backtrack_maze(25, 25);
    let world = generator.find_exit_position(&mut grid);
    // the lattice corner opposite Start is always carved
    assert_eq!(grid.exit(), Some(Position::new(23, 23)));
    assert_eq!(world.x, 46.0);
    assert_eq!(world.z, 46.0);
}

#[test]
fn test_config_file_drives_generation() {
    let config = GeneratorConfig::parse_config(
        r#"{ "collectibles": { "maxCount": 2 }, "world": { "cellSize": 4.0 } }"#,
    )
    .unwrap();
    let mut generator = LevelGenerator::with_seed(config, 17);
    let level = generator.generate_level(3);
    assert_eq!(level.mode, MazeMode::Rooms);
    assert!(level.collectibles.len() <= 2);
    assert_eq!(level.exit_world, level.exit.to_world(4.0));
}

#[test]
fn test_level_serializes_to_json() {
    let mut generator = LevelGenerator::with_seed(GeneratorConfig::default(), 1);
    let level = generator.generate_level(1);
    let json = serde_json::to_string(&level).unwrap();
    assert!(json.contains("exitWorld"));
    let back: mz_core::GeneratedLevel = serde_json::from_str(&json).unwrap();
    assert_eq!(back.grid, level.grid);
}

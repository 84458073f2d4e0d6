//! Level generator facade
//!
//! [`LevelGenerator`] owns a config and an RNG and runs the full pipeline:
//! carve or partition, post-passes, connectivity repair, Start/Exit marking
//! and the solvability check. Exit selection and collectible placement run
//! on the returned grid, either separately or through
//! [`LevelGenerator::generate_level`].

use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::consts::{MAX_LEVEL_DIMENSION, MIN_DIMENSION};
use crate::generate::{
    MazeMode, carve_backtrack, carve_rooms, ensure_path, optimize_flow, repair_connectivity,
    widen_corridors,
};
use crate::grid::{CellKind, MazeGrid, Position, WorldPosition};
use crate::placement;
use crate::rng::MazeRng;

/// Side length of the first level
const BASE_LEVEL_SIZE: usize = 15;
/// Side growth per level
const LEVEL_SIZE_STEP: usize = 4;
/// Every this many levels uses the room layout
const ROOM_LEVEL_INTERVAL: u32 = 3;
/// Collectibles requested on level 0; one more per level
const BASE_COLLECTIBLES: usize = 3;

/// Layout parameters for a numbered level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPlan {
    pub level: u32,
    pub mode: MazeMode,
    pub width: usize,
    pub height: usize,
    pub collectibles: usize,
}

impl LevelPlan {
    /// Parameters for level `level` (1-based; 0 is treated as 1)
    ///
    /// Levels grow by four cells per side up to [`MAX_LEVEL_DIMENSION`], and
    /// every third level is a room layout.
    pub fn for_level(level: u32) -> Self {
        let level = level.max(1);
        let grown =
            BASE_LEVEL_SIZE.saturating_add(LEVEL_SIZE_STEP.saturating_mul(level as usize - 1));
        let mut side = grown.min(MAX_LEVEL_DIMENSION);
        if side % 2 == 0 {
            side -= 1;
        }
        let mode = if level % ROOM_LEVEL_INTERVAL == 0 {
            MazeMode::Rooms
        } else {
            MazeMode::Backtrack
        };
        Self {
            level,
            mode,
            width: side,
            height: side,
            collectibles: BASE_COLLECTIBLES.saturating_add(level as usize),
        }
    }
}

/// A complete level: layout plus its markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedLevel {
    pub grid: MazeGrid,
    pub mode: MazeMode,
    pub start: Position,
    pub exit: Position,
    pub exit_world: WorldPosition,
    pub collectibles: Vec<Position>,
}

/// Runs level generation with one config and one random stream
#[derive(Debug, Clone)]
pub struct LevelGenerator {
    config: GeneratorConfig,
    rng: MazeRng,
}

impl LevelGenerator {
    pub fn new(config: GeneratorConfig, rng: MazeRng) -> Self {
        Self { config, rng }
    }

    /// Reproducible generator: equal seeds give equal levels
    pub fn with_seed(config: GeneratorConfig, seed: u64) -> Self {
        Self::new(config, MazeRng::new(seed))
    }

    pub fn from_entropy(config: GeneratorConfig) -> Self {
        Self::new(config, MazeRng::from_entropy())
    }

    /// Seed of the underlying random stream
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Depth-first maze with loops and side branches
    ///
    /// Even dimensions are reduced by one and each side is clamped to
    /// `5..=2047`. Start is (1, 1) and Exit the opposite interior corner.
    pub fn generate_backtrack_maze(&mut self, width: usize, height: usize) -> MazeGrid {
        let mut grid = carve_backtrack(width, height, &mut self.rng);
        let start = Position::new(1, 1);
        let exit = Position::new(grid.width() - 2, grid.height() - 2);

        optimize_flow(&mut grid, start, exit, &mut self.rng);
        repair_connectivity(&mut grid, Some(start));
        mark_endpoints(&mut grid, start, exit);

        log::debug!(
            "backtrack maze {}x{}: {} floor cells",
            grid.width(),
            grid.height(),
            grid.area() - grid.count(CellKind::Wall)
        );
        grid
    }

    /// Partitioned rooms joined by corridors, inside a solid wall ring
    ///
    /// Each side is clamped to `5..=2047`. Start is (1, 1) and Exit
    /// (width - 2, height - 2).
    pub fn generate_room_maze(&mut self, width: usize, height: usize) -> MazeGrid {
        let mut grid = carve_rooms(
            width,
            height,
            self.config.generation.room_ratio,
            &mut self.rng,
        );
        widen_corridors(&mut grid, &mut self.rng);

        let start = Position::new(1, 1);
        let exit = Position::new(grid.width() - 2, grid.height() - 2);
        // both corners must be open before regions are stitched together
        grid.open(start);
        grid.open(exit);
        repair_connectivity(&mut grid, Some(start));
        mark_endpoints(&mut grid, start, exit);

        log::debug!(
            "room maze {}x{}: {} floor cells",
            grid.width(),
            grid.height(),
            grid.area() - grid.count(CellKind::Wall)
        );
        grid
    }

    /// Generate a grid in the given mode
    pub fn generate(&mut self, mode: MazeMode, width: usize, height: usize) -> MazeGrid {
        match mode {
            MazeMode::Backtrack => self.generate_backtrack_maze(width, height),
            MazeMode::Rooms => self.generate_room_maze(width, height),
        }
    }

    /// Place up to `min(requested, max_count)` collectibles on `grid`
    pub fn place_collectibles(&mut self, grid: &mut MazeGrid, requested: usize) -> Vec<Position> {
        placement::place_collectibles(grid, requested, &self.config.collectibles, &mut self.rng)
    }

    /// Re-select the Exit on `grid` and return its world coordinate
    pub fn find_exit_position(&self, grid: &mut MazeGrid) -> WorldPosition {
        placement::find_exit_position(grid, self.config.world.cell_size)
    }

    /// Run the whole pipeline for a numbered level
    pub fn generate_level(&mut self, level: u32) -> GeneratedLevel {
        let plan = LevelPlan::for_level(level);
        self.generate_planned(&plan)
    }

    /// Run the whole pipeline for an explicit plan
    pub fn generate_planned(&mut self, plan: &LevelPlan) -> GeneratedLevel {
        log::info!(
            "generating level {} ({}, {}x{}, seed {})",
            plan.level,
            plan.mode,
            plan.width,
            plan.height,
            self.rng.seed()
        );
        let mut grid = self.generate(plan.mode, plan.width, plan.height);
        let exit_world = self.find_exit_position(&mut grid);
        let collectibles = self.place_collectibles(&mut grid, plan.collectibles);

        let start = grid.start().unwrap_or(Position::new(1, 1));
        let exit = grid.exit().unwrap_or(start);
        GeneratedLevel {
            grid,
            mode: plan.mode,
            start,
            exit,
            exit_world,
            collectibles,
        }
    }
}

/// Mark Start and Exit, forcing a corridor if they are not connected
fn mark_endpoints(grid: &mut MazeGrid, start: Position, exit: Position) {
    grid.set(start, CellKind::Start);
    grid.set(exit, CellKind::Exit);
    ensure_path(grid, start, exit);
}

impl Default for LevelGenerator {
    fn default() -> Self {
        Self::from_entropy(GeneratorConfig::default())
    }
}

/// Clamp a requested side to what the generators accept
pub fn clamp_dimension(requested: usize) -> usize {
    requested.clamp(MIN_DIMENSION, MAX_LEVEL_DIMENSION)
}

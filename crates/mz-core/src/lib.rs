//! mz-core: procedural maze level generation
//!
//! Builds solvable grid levels for a maze exploration game. Two layout
//! strategies are available: a depth-first backtracking maze made branchy by
//! flow passes, and a partitioned room layout. Every returned grid has exactly
//! one Start and one Exit joined by a passable path.
//!
//! The crate does no I/O apart from optional config file loading, and reports
//! degradations through the `log` facade rather than errors.
//!
//! ```
//! use mz_core::{GeneratorConfig, LevelGenerator};
//!
//! let mut generator = LevelGenerator::with_seed(GeneratorConfig::default(), 42);
//! let level = generator.generate_level(1);
//! assert!(level.grid.validate(level.mode).is_ok());
//! ```

pub mod config;
pub mod consts;
pub mod generate;
pub mod generator;
pub mod grid;
pub mod placement;
pub mod rng;

pub use config::{CollectibleConfig, ConfigError, GenerationConfig, GeneratorConfig, WorldConfig};
pub use generate::MazeMode;
pub use generator::{GeneratedLevel, LevelGenerator, LevelPlan, clamp_dimension};
pub use grid::{CellKind, GridError, MazeGrid, Position, WorldPosition};
pub use rng::MazeRng;

//! Layout generation
//!
//! Two carving strategies (backtracking maze, partitioned rooms), the passes
//! that make their output interesting, and the repair steps that make it
//! playable.

pub mod backtrack;
pub mod connectivity;
pub mod flow;
pub mod path;
pub mod rooms;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

pub use backtrack::{carve_backtrack, lattice_dimension};
pub use connectivity::{NearestIndex, label_regions, repair_connectivity};
pub use flow::{FlowStats, optimize_flow};
pub use path::{carve_l_corridor, distances_from, ensure_path, find_path};
pub use rooms::{Area, carve_rooms, widen_corridors};

/// Which carving strategy produced a grid
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum MazeMode {
    /// Depth-first carved maze on an odd lattice
    #[default]
    Backtrack,
    /// Recursively partitioned rooms joined by corridors
    Rooms,
}

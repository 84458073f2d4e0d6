//! Object placement on a finished layout
//!
//! Scoring of floor cells, collectible placement and exit selection.

pub mod collectibles;
pub mod exit;
pub mod scorer;

pub use collectibles::place_collectibles;
pub use exit::{exit_score, find_exit_position, select_exit};
pub use scorer::{PlacementCandidate, score_cell, strategic_positions};

//! Generation constants

/// Smallest grid side; a 3-wide lattice cannot hold separate Start and Exit
pub const MIN_DIMENSION: usize = 5;

/// Largest side either generator accepts; odd so it stays on the lattice
pub const MAX_DIMENSION: usize = 2047;

/// Largest side produced by level progression
pub const MAX_LEVEL_DIMENSION: usize = 121;

/// Swap probability of the biased direction shuffle (the 45/55 split)
pub const DIRECTION_SWAP_PERCENT: u32 = 55;

// Room partitioning

/// Regions narrower or shorter than this become rooms
pub const MIN_PARTITION_SIZE: usize = 6;
/// Maximum subdivision depth
pub const MAX_PARTITION_DEPTH: usize = 5;
/// Chance of each of the four corridor stubs leaving a room
pub const STUB_PERCENT: u32 = 60;
/// Length of a room corridor stub past the room edge
pub const STUB_LENGTH: usize = 2;
/// Walls in the 8-neighbourhood that make a floor cell "narrow"
pub const NARROW_WALLS: usize = 6;
/// Chance a narrow cell gets widened
pub const WIDEN_PERCENT: u32 = 30;

// Flow optimizer

/// Chance a dead end is opened into a loop
pub const DEAD_END_PERCENT: u32 = 30;
/// Strategic openings as a percentage of grid area
pub const STRATEGIC_AREA_PERCENT: usize = 3;
/// Sampling budget per wanted strategic opening
pub const STRATEGIC_ATTEMPT_FACTOR: usize = 5;
/// Recursion depth of alternative branch stubs
pub const BRANCH_DEPTH: usize = 2;
/// Chance of a branch in each direction
pub const BRANCH_PERCENT: u32 = 40;
/// Cells carved per branch stub
pub const BRANCH_LENGTH: usize = 2;

// Placement

/// Minimum score of a strategic position
pub const STRATEGIC_SCORE: u32 = 2;
/// Random attempts for collectibles once strategic positions run out
pub const RANDOM_PLACEMENT_ATTEMPTS: usize = 1000;
/// Per-axis clearance between random collectibles and Start/Exit
pub const MARKER_CLEARANCE: usize = 3;
/// Exit bonus for a ring corner
pub const CORNER_BONUS: f64 = 1000.0;
/// Extra exit bonus for the corner opposite Start
pub const OPPOSITE_CORNER_BONUS: f64 = 2000.0;

//! Collectible placement
//!
//! Strategic positions are taken best-first; if that does not fill the quota,
//! a bounded number of random floor cells are tried. Falling short is logged,
//! never an error.

use crate::config::CollectibleConfig;
use crate::consts::{MARKER_CLEARANCE, RANDOM_PLACEMENT_ATTEMPTS};
use crate::grid::{CellKind, MazeGrid, Position};
use crate::rng::MazeRng;

use super::scorer::strategic_positions;

fn well_spaced(placed: &[Position], pos: Position, min_distance: usize) -> bool {
    placed.iter().all(|p| p.manhattan(pos) >= min_distance)
}

/// At least [`MARKER_CLEARANCE`] cells from `marker` on both axes
fn clear_of(pos: Position, marker: Option<Position>) -> bool {
    marker.is_none_or(|m| {
        pos.x.abs_diff(m.x) >= MARKER_CLEARANCE && pos.z.abs_diff(m.z) >= MARKER_CLEARANCE
    })
}

/// Mark up to `min(requested, max_count)` cells as Collectible
///
/// Collectibles already on the grid are cleared first. Only Floor cells are
/// used, so Start and Exit are never covered. Every pair of placed cells is at
/// least `min_distance` apart. Returns the placed positions in placement order.
pub fn place_collectibles(
    grid: &mut MazeGrid,
    requested: usize,
    config: &CollectibleConfig,
    rng: &mut MazeRng,
) -> Vec<Position> {
    grid.replace_all(CellKind::Collectible, CellKind::Floor);

    let quota = requested.min(config.max_count);
    let mut placed = Vec::with_capacity(quota);
    if quota == 0 {
        return placed;
    }

    for candidate in strategic_positions(grid) {
        if placed.len() >= quota {
            break;
        }
        let pos = candidate.position;
        if grid.get(pos) == CellKind::Floor && well_spaced(&placed, pos, config.min_distance) {
            grid.set(pos, CellKind::Collectible);
            placed.push(pos);
        }
    }
    let strategic = placed.len();

    if placed.len() < quota && grid.area() > 0 {
        let start = grid.start();
        let exit = grid.exit();
        for _ in 0..RANDOM_PLACEMENT_ATTEMPTS {
            if placed.len() >= quota {
                break;
            }
            let pos = Position::new(rng.below(grid.width()), rng.below(grid.height()));
            if grid.get(pos) == CellKind::Floor
                && clear_of(pos, start)
                && clear_of(pos, exit)
                && well_spaced(&placed, pos, config.min_distance)
            {
                grid.set(pos, CellKind::Collectible);
                placed.push(pos);
            }
        }
    }

    log::debug!(
        "placed {} collectibles ({} strategic, {} random)",
        placed.len(),
        strategic,
        placed.len() - strategic
    );
    if placed.len() < quota {
        log::warn!(
            "only {} of {} collectibles fit on a {}x{} grid",
            placed.len(),
            quota,
            grid.width(),
            grid.height()
        );
    }

    placed
}

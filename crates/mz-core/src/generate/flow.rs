//! Post-carve passes for backtracking layouts
//!
//! A perfect maze has exactly one route between any two cells. These passes
//! add loops at dead ends, open a few walls between parallel corridors and
//! grow side branches off the main route.

use crate::consts::{
    BRANCH_DEPTH, BRANCH_LENGTH, BRANCH_PERCENT, DEAD_END_PERCENT, STRATEGIC_AREA_PERCENT,
    STRATEGIC_ATTEMPT_FACTOR,
};
use crate::grid::{CellKind, Direction, MazeGrid, Position};
use crate::rng::MazeRng;

use super::path::find_path;

/// Counts of what each pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowStats {
    pub loops: usize,
    pub openings: usize,
    pub branch_cells: usize,
}

/// Open some dead ends into loops
///
/// A Floor cell with three or more wall sides has a 30 % chance of losing a
/// wall whose far side is already passable.
pub fn relieve_dead_ends(grid: &mut MazeGrid, rng: &mut MazeRng) -> usize {
    let mut opened = 0;
    let cells: Vec<Position> = grid.positions_of(CellKind::Floor);

    for pos in cells {
        if grid.wall_neighbors(pos) < 3 || !rng.percent(DEAD_END_PERCENT) {
            continue;
        }
        let candidates: Vec<Position> = Direction::ALL
            .into_iter()
            .filter_map(|dir| {
                let wall = grid.neighbor(pos, dir, 1)?;
                let beyond = grid.neighbor(pos, dir, 2)?;
                (grid.is_wall(wall) && grid.is_interior(wall) && grid.is_passable(beyond))
                    .then_some(wall)
            })
            .collect();
        if let Some(&wall) = rng.choose(&candidates) {
            grid.set(wall, CellKind::Floor);
            opened += 1;
        }
    }

    opened
}

/// Two passable and two wall sides
pub fn is_strategic_wall(grid: &MazeGrid, pos: Position) -> bool {
    grid.is_wall(pos) && grid.passable_neighbors(pos) == 2
}

/// Would opening `pos` complete a 2×2 block of passable cells?
pub fn would_form_block(grid: &MazeGrid, pos: Position) -> bool {
    // the four 2x2 squares that contain pos, as offsets of their other cells
    const SQUARES: [[(isize, isize); 3]; 4] = [
        [(-1, 0), (0, -1), (-1, -1)],
        [(1, 0), (0, -1), (1, -1)],
        [(-1, 0), (0, 1), (-1, 1)],
        [(1, 0), (0, 1), (1, 1)],
    ];

    SQUARES.iter().any(|square| {
        square.iter().all(|&(dx, dz)| {
            match (pos.x.checked_add_signed(dx), pos.z.checked_add_signed(dz)) {
                (Some(x), Some(z)) => grid.is_passable(Position::new(x, z)),
                _ => false,
            }
        })
    })
}

/// Open walls between corridors without creating open plazas
///
/// Aims for 3 % of the grid area, sampling at most five interior walls per
/// wanted opening.
pub fn open_strategic_walls(grid: &mut MazeGrid, rng: &mut MazeRng) -> usize {
    if grid.width() < 3 || grid.height() < 3 {
        return 0;
    }
    let target = grid.area() * STRATEGIC_AREA_PERCENT / 100;
    let attempts = target * STRATEGIC_ATTEMPT_FACTOR;
    let mut opened = 0;

    for _ in 0..attempts {
        if opened >= target {
            break;
        }
        let pos = Position::new(
            rng.between(1, grid.width() - 2),
            rng.between(1, grid.height() - 2),
        );
        if is_strategic_wall(grid, pos) && !would_form_block(grid, pos) {
            grid.set(pos, CellKind::Floor);
            opened += 1;
        }
    }

    opened
}

/// Grow short side branches from the midpoint of the Start→Exit route
///
/// Each level of branching tries every direction with 40 % odds and carves
/// two cells, staying inside the outer ring. Only walls are changed, so the
/// pass can never disconnect anything.
pub fn grow_branches(
    grid: &mut MazeGrid,
    start: Position,
    exit: Position,
    rng: &mut MazeRng,
) -> usize {
    let Some(path) = find_path(grid, start, exit) else {
        return 0;
    };
    let midpoint = path[path.len() / 2];

    let mut carved = 0;
    let mut stack = vec![(midpoint, BRANCH_DEPTH)];
    while let Some((origin, depth)) = stack.pop() {
        if depth == 0 {
            continue;
        }
        for dir in Direction::ALL {
            if !rng.percent(BRANCH_PERCENT) {
                continue;
            }
            let mut tip = origin;
            for _ in 0..BRANCH_LENGTH {
                match grid.neighbor(tip, dir, 1).filter(|p| grid.is_interior(*p)) {
                    Some(next) => {
                        if grid.open(next) {
                            carved += 1;
                        }
                        tip = next;
                    }
                    None => break,
                }
            }
            if tip != origin {
                stack.push((tip, depth - 1));
            }
        }
    }

    carved
}

/// Run all three passes in order
pub fn optimize_flow(
    grid: &mut MazeGrid,
    start: Position,
    exit: Position,
    rng: &mut MazeRng,
) -> FlowStats {
    let stats = FlowStats {
        loops: relieve_dead_ends(grid, rng),
        openings: open_strategic_walls(grid, rng),
        branch_cells: grow_branches(grid, start, exit, rng),
    };
    log::debug!(
        "flow: {} loops, {} openings, {} branch cells",
        stats.loops,
        stats.openings,
        stats.branch_cells
    );
    stats
}

//! Recursive-backtracker carving on a two-cell lattice
//!
//! Passages sit on odd coordinates with a wall cell between every pair of
//! neighbouring passages. Carving walks depth-first using an explicit stack.

use crate::consts::{DIRECTION_SWAP_PERCENT, MAX_DIMENSION, MIN_DIMENSION};
use crate::grid::{CellKind, Direction, MazeGrid, Position};
use crate::rng::MazeRng;

/// Coerce a requested dimension onto the carving lattice
///
/// Even values drop by one, then the result is clamped to
/// [`MIN_DIMENSION`]..=[`MAX_DIMENSION`].
pub fn lattice_dimension(requested: usize) -> usize {
    let odd = if requested % 2 == 0 {
        requested.saturating_sub(1)
    } else {
        requested
    };
    odd.clamp(MIN_DIMENSION, MAX_DIMENSION)
}

/// True if `pos` is a passage slot: odd coordinates, inside the outer ring
fn on_lattice(grid: &MazeGrid, pos: Position) -> bool {
    pos.x % 2 == 1 && pos.z % 2 == 1 && grid.is_interior(pos)
}

/// Carve a perfect maze into `grid` starting at `origin`
///
/// `origin` must be a lattice slot. Every lattice slot reachable from it ends
/// up Floor, joined by exactly one path (a spanning tree).
pub fn walkfrom(grid: &mut MazeGrid, origin: Position, rng: &mut MazeRng) {
    if !on_lattice(grid, origin) {
        return;
    }

    let mut stack = Vec::with_capacity(grid.area() / 4);
    grid.set(origin, CellKind::Floor);
    stack.push(origin);

    while let Some(&cur) = stack.last() {
        let mut dirs = Direction::ALL;
        rng.biased_shuffle(&mut dirs, DIRECTION_SWAP_PERCENT);

        let next = dirs.into_iter().find_map(|dir| {
            let target = grid.neighbor(cur, dir, 2)?;
            if on_lattice(grid, target) && grid.is_wall(target) {
                Some((dir, target))
            } else {
                None
            }
        });

        match next {
            Some((dir, target)) => {
                if let Some(between) = cur.step(dir, 1) {
                    grid.set(between, CellKind::Floor);
                }
                grid.set(target, CellKind::Floor);
                stack.push(target);
            }
            None => {
                stack.pop();
            }
        }
    }
}

/// Allocate a lattice-sized grid and carve a perfect maze from (1, 1)
pub fn carve_backtrack(width: usize, height: usize, rng: &mut MazeRng) -> MazeGrid {
    let width = lattice_dimension(width);
    let height = lattice_dimension(height);
    let mut grid = MazeGrid::new(width, height);
    walkfrom(&mut grid, Position::new(1, 1), rng);
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::connectivity::label_regions;

    #[test]
    fn test_lattice_dimension() {
        assert_eq!(lattice_dimension(21), 21);
        assert_eq!(lattice_dimension(20), 19);
        assert_eq!(lattice_dimension(4), 5);
        assert_eq!(lattice_dimension(0), 5);
        assert_eq!(lattice_dimension(usize::MAX), MAX_DIMENSION);
        assert_eq!(lattice_dimension(MAX_DIMENSION + 1), MAX_DIMENSION);
    }

    #[test]
    fn test_every_slot_carved_and_connected() {
        let mut rng = MazeRng::new(42);
        let grid = carve_backtrack(21, 15, &mut rng);
        assert_eq!((grid.width(), grid.height()), (21, 15));

        for z in (1..grid.height()).step_by(2) {
            for x in (1..grid.width()).step_by(2) {
                assert_eq!(grid.get(Position::new(x, z)), CellKind::Floor);
            }
        }
        assert_eq!(label_regions(&grid).len(), 1);
    }

    #[test]
    fn test_perfect_maze_is_a_tree() {
        // a spanning tree over n slots carves n - 1 connectors
        let mut rng = MazeRng::new(7);
        let grid = carve_backtrack(31, 31, &mut rng);
        let slots = 15 * 15;
        assert_eq!(grid.count(CellKind::Floor), slots + slots - 1);
    }

    #[test]
    fn test_boundary_and_even_cells_stay_wall() {
        let mut rng = MazeRng::new(3);
        let grid = carve_backtrack(17, 17, &mut rng);
        for pos in grid.positions() {
            if grid.is_boundary(pos) || (pos.x % 2 == 0 && pos.z % 2 == 0) {
                assert_eq!(grid.get(pos), CellKind::Wall, "{:?}", pos);
            }
        }
    }

    #[test]
    fn test_large_grid_does_not_overflow_stack() {
        let mut rng = MazeRng::new(11);
        let grid = carve_backtrack(121, 121, &mut rng);
        assert_eq!(label_regions(&grid).len(), 1);
    }
}

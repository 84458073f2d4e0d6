//! Exit selection
//!
//! Picks the exit from floor cells on the outer ring of the grid, or on the
//! ring just inside it when the outer ring is solid. Corners win, and the
//! corner diagonally opposite Start wins outright.

use crate::consts::{CORNER_BONUS, OPPOSITE_CORNER_BONUS};
use crate::generate::{carve_l_corridor, distances_from};
use crate::grid::{CellKind, MazeGrid, Position, WorldPosition};

/// The four corners of the ring `inset` cells in from the edge
///
/// Order: top-left, top-right, bottom-left, bottom-right. None when the ring
/// does not exist.
fn ring_corners(grid: &MazeGrid, inset: usize) -> Option<[Position; 4]> {
    if grid.width() <= inset * 2 || grid.height() <= inset * 2 {
        return None;
    }
    let lo_x = inset;
    let lo_z = inset;
    let hi_x = grid.width() - 1 - inset;
    let hi_z = grid.height() - 1 - inset;
    Some([
        Position::new(lo_x, lo_z),
        Position::new(hi_x, lo_z),
        Position::new(lo_x, hi_z),
        Position::new(hi_x, hi_z),
    ])
}

/// Cells of the ring `inset` cells in: top and bottom rows, then the side
/// columns between them
fn ring_cells(grid: &MazeGrid, inset: usize) -> Vec<Position> {
    let Some([tl, _, _, br]) = ring_corners(grid, inset) else {
        return Vec::new();
    };
    let mut cells = Vec::new();
    for x in tl.x..=br.x {
        cells.push(Position::new(x, tl.z));
        if br.z != tl.z {
            cells.push(Position::new(x, br.z));
        }
    }
    for z in tl.z + 1..br.z {
        cells.push(Position::new(tl.x, z));
        if br.x != tl.x {
            cells.push(Position::new(br.x, z));
        }
    }
    cells
}

/// Corner of `corners` diagonally across from the quadrant holding `start`
fn opposite_corner(grid: &MazeGrid, corners: &[Position; 4], start: Position) -> Position {
    let left = start.x * 2 < grid.width();
    let top = start.z * 2 < grid.height();
    match (left, top) {
        (true, true) => corners[3],
        (false, true) => corners[2],
        (true, false) => corners[1],
        (false, false) => corners[0],
    }
}

/// Exit score of `pos` on the ring described by `corners`
pub fn exit_score(
    grid: &MazeGrid,
    pos: Position,
    start: Position,
    corners: &[Position; 4],
) -> f64 {
    let mut score = pos.euclidean(start);
    if corners.contains(&pos) {
        score += CORNER_BONUS;
        if pos == opposite_corner(grid, corners, start) {
            score += OPPOSITE_CORNER_BONUS;
        }
    }
    score
}

/// Best exit cell on the grid as it stands, without modifying it
///
/// When a Start exists only cells reachable from it are considered. Without
/// ring candidates the farthest reachable Floor cell is returned.
fn pick_exit(grid: &MazeGrid) -> Option<Position> {
    let start = grid.start();
    let origin = start.unwrap_or(Position::new(1, 1));
    let reach = start.map(|s| distances_from(grid, s));
    let reachable =
        |pos: Position| reach.as_ref().is_none_or(|d| d[pos.z * grid.width() + pos.x].is_some());

    for inset in 0..=1 {
        let Some(corners) = ring_corners(grid, inset) else {
            break;
        };
        let best = ring_cells(grid, inset)
            .into_iter()
            .filter(|p| grid.get(*p) == CellKind::Floor && reachable(*p))
            .map(|p| (p, exit_score(grid, p, origin, &corners)))
            .fold(None, |best: Option<(Position, f64)>, (p, s)| match best {
                Some((_, bs)) if bs >= s => best,
                _ => Some((p, s)),
            });
        if let Some((pos, _)) = best {
            return Some(pos);
        }
    }

    log::warn!("no exit candidate on the outer rings; using farthest reachable cell");
    let floors = grid.positions().filter(|p| grid.get(*p) == CellKind::Floor);
    match &reach {
        Some(dist) => floors
            .filter_map(|p| dist[p.z * grid.width() + p.x].map(|d| (p, d)))
            .max_by_key(|(_, d)| *d)
            .map(|(p, _)| p),
        None => floors.last(),
    }
}

/// Choose and mark the Exit cell, returning its grid position
///
/// Any existing Exit reverts to Floor first, so exactly one remains. If no
/// reachable Floor cell exists at all, the bottom-right interior cell is
/// carved and joined to Start. Returns None only for an empty grid.
pub fn select_exit(grid: &mut MazeGrid) -> Option<Position> {
    if grid.area() == 0 {
        return None;
    }
    grid.replace_all(CellKind::Exit, CellKind::Floor);

    let exit = match pick_exit(grid) {
        Some(pos) => pos,
        None => {
            let pos = Position::new(
                grid.width().saturating_sub(2),
                grid.height().saturating_sub(2),
            );
            log::warn!(
                "no reachable floor for the exit; carving ({}, {})",
                pos.x,
                pos.z
            );
            if let Some(start) = grid.start().filter(|s| *s != pos) {
                carve_l_corridor(grid, start, pos);
            }
            pos
        }
    };

    // a grid whose only open cell is Start keeps it
    if grid.get(exit) != CellKind::Start {
        grid.set(exit, CellKind::Exit);
    }
    Some(exit)
}

/// Mark the Exit and return its world coordinate
pub fn find_exit_position(grid: &mut MazeGrid, cell_size: f32) -> WorldPosition {
    select_exit(grid)
        .map(|p| p.to_world(cell_size))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_cells_cover_outline_once() {
        let grid = MazeGrid::new(6, 5);
        let mut outer = ring_cells(&grid, 0);
        assert_eq!(outer.len(), 2 * 6 + 2 * 3);
        outer.sort();
        outer.dedup();
        assert_eq!(outer.len(), 18);
        assert_eq!(ring_cells(&grid, 1).len(), 2 * 4 + 2);
        assert!(ring_cells(&MazeGrid::new(2, 2), 1).is_empty());
    }

    #[test]
    fn test_prefers_opposite_corner() {
        let mut grid: MazeGrid = concat!(
            "#######\n",
            "#S....#\n",
            "#.....#\n",
            "#.....#\n",
            "#######\n",
        )
        .parse()
        .unwrap();
        let exit = select_exit(&mut grid).unwrap();
        assert_eq!(exit, Position::new(5, 3));
        assert_eq!(grid.get(exit), CellKind::Exit);
    }

    #[test]
    fn test_boundary_floor_beats_inner_ring() {
        let mut grid: MazeGrid = concat!(
            "#######\n",
            "#S....#\n",
            "#......\n",
            "#.....#\n",
            "#######\n",
        )
        .parse()
        .unwrap();
        assert_eq!(select_exit(&mut grid), Some(Position::new(6, 2)));
    }

    #[test]
    fn test_corner_beats_farther_edge_cell() {
        let mut grid: MazeGrid = concat!(
            "#########\n",
            "#S......#\n",
            "#.......#\n",
            "#.......#\n",
            "#########\n",
        )
        .parse()
        .unwrap();
        // block the opposite corner so the top-right corner must win
        grid.set(Position::new(7, 3), CellKind::Wall);
        assert_eq!(select_exit(&mut grid), Some(Position::new(7, 1)));
    }

    #[test]
    fn test_replaces_existing_exit() {
        let mut grid: MazeGrid = "#######\n#S.E..#\n#######\n".parse().unwrap();
        let exit = select_exit(&mut grid).unwrap();
        assert_eq!(exit, Position::new(5, 1));
        assert_eq!(grid.count(CellKind::Exit), 1);
        assert_eq!(grid.get(Position::new(3, 1)), CellKind::Floor);
    }

    #[test]
    fn test_unreachable_cells_ignored() {
        let mut grid: MazeGrid = concat!(
            "#######\n",
            "#S.#..#\n",
            "#..#..#\n",
            "#######\n",
        )
        .parse()
        .unwrap();
        let exit = select_exit(&mut grid).unwrap();
        assert!(exit.x <= 2);
    }

    #[test]
    fn test_fallback_to_farthest_reachable() {
        let mut grid: MazeGrid = concat!(
            "#########\n",
            "#########\n",
            "##S...###\n",
            "#####.###\n",
            "#########\n",
            "#########\n",
        )
        .parse()
        .unwrap();
        assert_eq!(select_exit(&mut grid), Some(Position::new(5, 3)));
    }

    #[test]
    fn test_last_resort_carves_reachable_exit() {
        let mut grid: MazeGrid = "#######\n#S#####\n#######\n#######\n".parse().unwrap();
        let exit = select_exit(&mut grid).unwrap();
        assert_eq!(exit, Position::new(5, 2));
        assert_eq!(grid.get(exit), CellKind::Exit);
        let start = grid.start().unwrap();
        assert!(crate::generate::find_path(&grid, start, exit).is_some());
    }

    #[test]
    fn test_world_coordinate() {
        let mut grid: MazeGrid = "#####\n#S..#\n#####\n".parse().unwrap();
        let world = find_exit_position(&mut grid, 2.0);
        assert_eq!(world, WorldPosition { x: 6.0, z: 2.0 });
    }
}

//! Breadth-first path finding and the solvability fallback

use std::collections::VecDeque;

use crate::grid::{MazeGrid, Position};

/// Shortest passable path from `from` to `to`, both ends included
///
/// Returns None when either end is a wall or no path exists.
pub fn find_path(grid: &MazeGrid, from: Position, to: Position) -> Option<Vec<Position>> {
    if !grid.is_passable(from) || !grid.is_passable(to) {
        return None;
    }

    let idx = |p: Position| p.z * grid.width() + p.x;
    let mut parent: Vec<Option<Position>> = vec![None; grid.area()];
    let mut seen = vec![false; grid.area()];
    let mut queue = VecDeque::new();

    seen[idx(from)] = true;
    queue.push_back(from);

    while let Some(cur) = queue.pop_front() {
        if cur == to {
            let mut path = vec![cur];
            let mut node = cur;
            while let Some(prev) = parent[idx(node)] {
                path.push(prev);
                node = prev;
            }
            path.reverse();
            return Some(path);
        }

        for next in grid.cardinal_neighbors(cur) {
            if !seen[idx(next)] && grid.is_passable(next) {
                seen[idx(next)] = true;
                parent[idx(next)] = Some(cur);
                queue.push_back(next);
            }
        }
    }

    None
}

/// BFS step count from `from` to every cell, None where unreachable
///
/// Indexed row-major (`z * width + x`).
pub fn distances_from(grid: &MazeGrid, from: Position) -> Vec<Option<usize>> {
    let mut dist = vec![None; grid.area()];
    if !grid.is_passable(from) {
        return dist;
    }

    let idx = |p: Position| p.z * grid.width() + p.x;
    let mut queue = VecDeque::new();
    dist[idx(from)] = Some(0);
    queue.push_back(from);

    while let Some(cur) = queue.pop_front() {
        let d = dist[idx(cur)].unwrap_or(0);
        for next in grid.cardinal_neighbors(cur) {
            if dist[idx(next)].is_none() && grid.is_passable(next) {
                dist[idx(next)] = Some(d + 1);
                queue.push_back(next);
            }
        }
    }

    dist
}

/// Carve an L-shaped corridor: along x first, then along z
///
/// Only Wall cells change (to Floor). Returns every cell on the corridor.
pub fn carve_l_corridor(grid: &mut MazeGrid, from: Position, to: Position) -> Vec<Position> {
    let mut cells = Vec::with_capacity(from.manhattan(to) + 1);
    let mut cur = from;
    grid.open(cur);
    cells.push(cur);

    while cur.x != to.x {
        cur.x = if to.x > cur.x { cur.x + 1 } else { cur.x - 1 };
        grid.open(cur);
        cells.push(cur);
    }
    while cur.z != to.z {
        cur.z = if to.z > cur.z { cur.z + 1 } else { cur.z - 1 };
        grid.open(cur);
        cells.push(cur);
    }

    cells
}

/// Make sure `exit` can be reached from `start`
///
/// Runs BFS and, if it fails, forces a straight L corridor between the two.
/// Returns true when the forced corridor was needed.
pub fn ensure_path(grid: &mut MazeGrid, start: Position, exit: Position) -> bool {
    if find_path(grid, start, exit).is_some() {
        return false;
    }
    log::warn!(
        "no path from ({}, {}) to ({}, {}); forcing a corridor",
        start.x,
        start.z,
        exit.x,
        exit.z
    );
    carve_l_corridor(grid, start, exit);
    true
}

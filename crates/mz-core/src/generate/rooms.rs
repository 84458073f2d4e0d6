//! Room layouts by recursive subdivision
//!
//! The interior is split along its longer axis by wall lines with a few
//! punched passages, until the pieces are small enough to hold a room. Rooms
//! are not guaranteed to reach each other; connectivity repair runs after.

use core::cmp::Ordering;

use crate::consts::{
    MAX_DIMENSION, MAX_PARTITION_DEPTH, MIN_DIMENSION, MIN_PARTITION_SIZE, NARROW_WALLS, STUB_LENGTH,
    STUB_PERCENT, WIDEN_PERCENT,
};
use crate::grid::{CellKind, Direction, MazeGrid, Position};
use crate::rng::MazeRng;

/// Inclusive rectangle of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    pub lx: usize,
    pub lz: usize,
    pub hx: usize,
    pub hz: usize,
}

impl Area {
    pub fn new(lx: usize, lz: usize, hx: usize, hz: usize) -> Self {
        Self { lx, lz, hx, hz }
    }

    pub fn width(&self) -> usize {
        if self.hx >= self.lx {
            self.hx - self.lx + 1
        } else {
            0
        }
    }

    pub fn height(&self) -> usize {
        if self.hz >= self.lz {
            self.hz - self.lz + 1
        } else {
            0
        }
    }

    pub fn is_valid(&self) -> bool {
        self.hx >= self.lx && self.hz >= self.lz
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.lx && pos.x <= self.hx && pos.z >= self.lz && pos.z <= self.hz
    }

    pub fn center(&self) -> Position {
        Position::new((self.lx + self.hx) / 2, (self.lz + self.hz) / 2)
    }

    /// Centered sub-area scaled by `ratio` on both axes, at least 1×1
    pub fn shrink(&self, ratio: f64) -> Area {
        let w = ((self.width() as f64 * ratio) as usize).clamp(1, self.width().max(1));
        let h = ((self.height() as f64 * ratio) as usize).clamp(1, self.height().max(1));
        let lx = self.lx + (self.width() - w) / 2;
        let lz = self.lz + (self.height() - h) / 2;
        Area::new(lx, lz, lx + w - 1, lz + h - 1)
    }

    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (self.lz..=self.hz).flat_map(move |z| (self.lx..=self.hx).map(move |x| Position::new(x, z)))
    }
}

/// Where along a side of length `len` to put the split line: 40–60 %,
/// always leaving at least one cell on each side
fn split_offset(len: usize, rng: &mut MazeRng) -> usize {
    let lo = len * 2 / 5;
    let hi = len * 3 / 5;
    rng.between(lo, hi).clamp(1, len.saturating_sub(2).max(1))
}

/// Wall off a split line and punch `max(1, len / 8)` passages through it
fn carve_split_line(grid: &mut MazeGrid, line: &[Position], rng: &mut MazeRng) {
    for &pos in line {
        grid.set(pos, CellKind::Wall);
    }
    let passages = (line.len() / 8).max(1);
    for _ in 0..passages {
        if let Some(&pos) = rng.choose(line) {
            grid.set(pos, CellKind::Floor);
        }
    }
}

/// Carve a centered room and its corridor stubs
fn carve_room(grid: &mut MazeGrid, area: Area, room_ratio: f64, rng: &mut MazeRng) {
    let room = area.shrink(room_ratio);
    for pos in room.cells() {
        grid.set(pos, CellKind::Floor);
    }

    let center = room.center();
    for dir in Direction::ALL {
        if !rng.percent(STUB_PERCENT) {
            continue;
        }
        let mut cur = center;
        let mut carved = 0;
        while carved < STUB_LENGTH {
            let Some(next) = cur.step(dir, 1).filter(|p| grid.is_interior(*p)) else {
                break;
            };
            if !room.contains(next) {
                grid.set(next, CellKind::Floor);
                carved += 1;
            }
            cur = next;
        }
    }
}

/// Subdivide `root` and carve rooms into the leaves
///
/// Work items are kept on an explicit stack of `(area, depth)`.
pub fn partition(grid: &mut MazeGrid, root: Area, room_ratio: f64, rng: &mut MazeRng) {
    let mut work = vec![(root, 0usize)];
    let mut rooms = 0;

    while let Some((area, depth)) = work.pop() {
        if !area.is_valid() {
            continue;
        }

        if area.width() < MIN_PARTITION_SIZE
            || area.height() < MIN_PARTITION_SIZE
            || depth >= MAX_PARTITION_DEPTH
        {
            carve_room(grid, area, room_ratio, rng);
            rooms += 1;
            continue;
        }

        let split_columns = match area.width().cmp(&area.height()) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => rng.coin(),
        };

        if split_columns {
            let x = area.lx + split_offset(area.width(), rng);
            let line: Vec<Position> = (area.lz..=area.hz).map(|z| Position::new(x, z)).collect();
            carve_split_line(grid, &line, rng);
            work.push((Area::new(area.lx, area.lz, x - 1, area.hz), depth + 1));
            work.push((Area::new(x + 1, area.lz, area.hx, area.hz), depth + 1));
        } else {
            let z = area.lz + split_offset(area.height(), rng);
            let line: Vec<Position> = (area.lx..=area.hx).map(|x| Position::new(x, z)).collect();
            carve_split_line(grid, &line, rng);
            work.push((Area::new(area.lx, area.lz, area.hx, z - 1), depth + 1));
            work.push((Area::new(area.lx, z + 1, area.hx, area.hz), depth + 1));
        }
    }

    log::debug!("partition carved {} rooms", rooms);
}

/// Allocate a grid and fill its interior with partitioned rooms
///
/// Both sides are clamped to [`MIN_DIMENSION`]..=[`MAX_DIMENSION`]. The outer ring stays
/// Wall.
pub fn carve_rooms(width: usize, height: usize, room_ratio: f64, rng: &mut MazeRng) -> MazeGrid {
    let width = width.clamp(MIN_DIMENSION, MAX_DIMENSION);
    let height = height.clamp(MIN_DIMENSION, MAX_DIMENSION);
    let mut grid = MazeGrid::new(width, height);
    partition(
        &mut grid,
        Area::new(1, 1, width - 2, height - 2),
        room_ratio,
        rng,
    );
    grid
}

/// Relieve pinch points
///
/// Every Floor cell with at least six walls among its eight neighbours has a
/// 30 % chance of losing one random cardinal wall. Walls on the outer ring are
/// never removed. Returns the number of walls opened.
pub fn widen_corridors(grid: &mut MazeGrid, rng: &mut MazeRng) -> usize {
    let narrow: Vec<Position> = grid
        .positions()
        .filter(|p| grid.get(*p) == CellKind::Floor && grid.walls_around(*p) >= NARROW_WALLS)
        .collect();

    let mut opened = 0;
    for pos in narrow {
        if !rng.percent(WIDEN_PERCENT) {
            continue;
        }
        let candidates: Vec<Position> = grid
            .cardinal_neighbors(pos)
            .filter(|n| grid.is_wall(*n) && grid.is_interior(*n))
            .collect();
        if let Some(&wall) = rng.choose(&candidates) {
            grid.set(wall, CellKind::Floor);
            opened += 1;
        }
    }

    log::debug!("widened {} pinch points", opened);
    opened
}

//! The level grid

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::cell::{CellKind, Direction, Dirs, Position};
use super::GridError;

/// A `height × width` array of cell kinds, stored row-major
///
/// Coordinates are `(x, z)` with `x` the column and `z` the row. Reads outside
/// the grid return [`CellKind::Wall`], so neighbourhood scans need no bounds
/// special-casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct MazeGrid {
    width: usize,
    height: usize,
    cells: Vec<CellKind>,
}

/// Serialized shape of a grid, checked before it becomes a [`MazeGrid`]
#[derive(Deserialize)]
struct RawGrid {
    width: usize,
    height: usize,
    cells: Vec<CellKind>,
}

impl TryFrom<RawGrid> for MazeGrid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        if raw.width.checked_mul(raw.height) != Some(raw.cells.len()) {
            return Err(GridError::SizeMismatch {
                width: raw.width,
                height: raw.height,
                cells: raw.cells.len(),
            });
        }
        Ok(Self {
            width: raw.width,
            height: raw.height,
            cells: raw.cells,
        })
    }
}

impl MazeGrid {
    /// Allocate a grid filled entirely with Wall
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![CellKind::Wall; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    fn index(&self, pos: Position) -> usize {
        pos.z * self.width + pos.x
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.z < self.height
    }

    /// On the outer ring of the grid
    pub fn is_boundary(&self, pos: Position) -> bool {
        self.in_bounds(pos)
            && (pos.x == 0 || pos.z == 0 || pos.x + 1 == self.width || pos.z + 1 == self.height)
    }

    /// Inside the grid and not on the outer ring
    pub fn is_interior(&self, pos: Position) -> bool {
        self.in_bounds(pos) && !self.is_boundary(pos)
    }

    /// Cell kind at `pos`; Wall outside the grid
    pub fn get(&self, pos: Position) -> CellKind {
        if self.in_bounds(pos) {
            self.cells[self.index(pos)]
        } else {
            CellKind::Wall
        }
    }

    /// Set the cell at `pos`. Writes outside the grid are ignored.
    pub fn set(&mut self, pos: Position, kind: CellKind) {
        if self.in_bounds(pos) {
            let idx = self.index(pos);
            self.cells[idx] = kind;
        }
    }

    /// Turn a Wall into Floor, leaving any other kind alone
    pub fn open(&mut self, pos: Position) -> bool {
        if self.get(pos) == CellKind::Wall && self.in_bounds(pos) {
            self.set(pos, CellKind::Floor);
            true
        } else {
            false
        }
    }

    pub fn is_passable(&self, pos: Position) -> bool {
        self.get(pos).is_passable()
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        self.get(pos) == CellKind::Wall
    }

    /// Neighbour `distance` cells away in `dir`, if it lies inside the grid
    pub fn neighbor(&self, pos: Position, dir: Direction, distance: usize) -> Option<Position> {
        pos.step(dir, distance).filter(|p| self.in_bounds(*p))
    }

    /// In-bounds cardinal neighbours
    pub fn cardinal_neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.neighbor(pos, dir, 1))
    }

    /// Directions whose adjacent cell is passable
    pub fn open_sides(&self, pos: Position) -> Dirs {
        Direction::ALL
            .into_iter()
            .filter(|dir| pos.step(*dir, 1).is_some_and(|p| self.is_passable(p)))
            .fold(Dirs::empty(), |acc, dir| acc | dir.flag())
    }

    /// Number of passable cardinal neighbours
    pub fn passable_neighbors(&self, pos: Position) -> usize {
        self.open_sides(pos).bits().count_ones() as usize
    }

    /// Number of Wall cardinal neighbours (out of bounds counts as Wall)
    pub fn wall_neighbors(&self, pos: Position) -> usize {
        4 - self.passable_neighbors(pos)
    }

    /// Walls among the eight surrounding cells (out of bounds counts as Wall)
    pub fn walls_around(&self, pos: Position) -> usize {
        let mut walls = 0;
        for dz in -1isize..=1 {
            for dx in -1isize..=1 {
                if dx == 0 && dz == 0 {
                    continue;
                }
                let wall = match (pos.x.checked_add_signed(dx), pos.z.checked_add_signed(dz)) {
                    (Some(x), Some(z)) => self.is_wall(Position::new(x, z)),
                    _ => true,
                };
                if wall {
                    walls += 1;
                }
            }
        }
        walls
    }

    /// All coordinates in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |z| (0..self.width).map(move |x| Position::new(x, z)))
    }

    pub fn positions_of(&self, kind: CellKind) -> Vec<Position> {
        self.positions().filter(|p| self.get(*p) == kind).collect()
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|c| **c == kind).count()
    }

    pub fn find_first(&self, kind: CellKind) -> Option<Position> {
        self.positions().find(|p| self.get(*p) == kind)
    }

    pub fn start(&self) -> Option<Position> {
        self.find_first(CellKind::Start)
    }

    pub fn exit(&self) -> Option<Position> {
        self.find_first(CellKind::Exit)
    }

    /// Rewrite every `from` cell as `to`; returns how many changed
    pub fn replace_all(&mut self, from: CellKind, to: CellKind) -> usize {
        let mut changed = 0;
        for cell in self.cells.iter_mut().filter(|c| **c == from) {
            *cell = to;
            changed += 1;
        }
        changed
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[CellKind]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Integer code matrix, one inner vec per row
    pub fn codes(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(CellKind::code).collect())
            .collect()
    }

    /// One line per row using [`CellKind::symbol`]
    pub fn to_ascii(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for MazeGrid {
    type Err = GridError;

    /// Parse the ASCII form; blank lines are skipped and all rows must have
    /// the same length
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut width = None;
        let mut cells = Vec::new();
        let mut height = 0;

        for (line_no, line) in s.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            let row: Vec<CellKind> = line
                .chars()
                .map(|ch| {
                    CellKind::from_symbol(ch).ok_or(GridError::Parse {
                        line: line_no + 1,
                        ch,
                    })
                })
                .collect::<Result<_, _>>()?;
            match width {
                None => width = Some(row.len()),
                Some(w) if w != row.len() => return Err(GridError::Ragged { line: line_no + 1 }),
                Some(_) => {}
            }
            cells.extend(row);
            height += 1;
        }

        Ok(Self {
            width: width.unwrap_or(0),
            height,
            cells,
        })
    }
}

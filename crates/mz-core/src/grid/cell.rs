//! Cell kinds, directions and coordinates

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// What occupies a grid cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum CellKind {
    #[default]
    Wall,
    Floor,
    Start,
    Exit,
    Collectible,
}

impl CellKind {
    /// Everything except walls can be walked on
    pub const fn is_passable(&self) -> bool {
        !matches!(self, CellKind::Wall)
    }

    /// Compact integer form used by the renderer and spawner
    ///
    /// Wall is 1 and Floor is 0; Start, Exit and Collectible each get a
    /// distinct code.
    pub const fn code(&self) -> u8 {
        match self {
            CellKind::Floor => 0,
            CellKind::Wall => 1,
            CellKind::Start => 2,
            CellKind::Exit => 3,
            CellKind::Collectible => 4,
        }
    }

    /// Get the display character for this cell kind
    pub const fn symbol(&self) -> char {
        match self {
            CellKind::Wall => '#',
            CellKind::Floor => '.',
            CellKind::Start => 'S',
            CellKind::Exit => 'E',
            CellKind::Collectible => '*',
        }
    }

    /// Parse a display character. Spaces read as floor.
    pub const fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(CellKind::Wall),
            '.' | ' ' => Some(CellKind::Floor),
            'S' => Some(CellKind::Start),
            'E' => Some(CellKind::Exit),
            '*' => Some(CellKind::Collectible),
            _ => None,
        }
    }
}

/// Cardinal directions (z grows southward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit step as (dx, dz)
    pub const fn delta(&self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub const fn flag(&self) -> Dirs {
        match self {
            Direction::North => Dirs::NORTH,
            Direction::East => Dirs::EAST,
            Direction::South => Dirs::SOUTH,
            Direction::West => Dirs::WEST,
        }
    }
}

bitflags! {
    /// Set of cardinal directions, e.g. the open sides of a cell
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Dirs: u8 {
        const NORTH = 0x01;
        const EAST = 0x02;
        const SOUTH = 0x04;
        const WEST = 0x08;
    }
}

impl Dirs {
    /// Two perpendicular open sides and nothing else
    pub fn is_corner(&self) -> bool {
        [
            Dirs::SOUTH | Dirs::EAST,
            Dirs::SOUTH | Dirs::WEST,
            Dirs::NORTH | Dirs::EAST,
            Dirs::NORTH | Dirs::WEST,
        ]
        .contains(self)
    }
}

/// Integer grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub z: usize,
}

impl Position {
    pub const fn new(x: usize, z: usize) -> Self {
        Self { x, z }
    }

    pub fn manhattan(&self, other: Position) -> usize {
        self.x.abs_diff(other.x) + self.z.abs_diff(other.z)
    }

    pub fn euclidean(&self, other: Position) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dz = self.z as f64 - other.z as f64;
        (dx * dx + dz * dz).sqrt()
    }

    /// Step `distance` cells in `dir`; None if that would go below zero
    pub fn step(&self, dir: Direction, distance: usize) -> Option<Position> {
        let (dx, dz) = dir.delta();
        let x = self.x.checked_add_signed(dx * distance as isize)?;
        let z = self.z.checked_add_signed(dz * distance as isize)?;
        Some(Position { x, z })
    }

    /// Convert to world space
    pub fn to_world(&self, cell_size: f32) -> WorldPosition {
        WorldPosition {
            x: self.x as f32 * cell_size,
            z: self.z as f32 * cell_size,
        }
    }
}

/// World-space coordinate: grid coordinate scaled by the cell size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPosition {
    pub x: f32,
    pub z: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_codes_are_distinct() {
        let mut codes: Vec<u8> = CellKind::iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 5);
        for kind in CellKind::iter() {
            assert_eq!(CellKind::from_symbol(kind.symbol()), Some(kind));
        }
    }

    #[test]
    fn test_passable() {
        assert!(!CellKind::Wall.is_passable());
        assert!(CellKind::Floor.is_passable());
        assert!(CellKind::Collectible.is_passable());
    }

    #[test]
    fn test_step() {
        let p = Position::new(1, 1);
        assert_eq!(p.step(Direction::East, 2), Some(Position::new(3, 1)));
        assert_eq!(p.step(Direction::North, 1), Some(Position::new(1, 0)));
        assert_eq!(p.step(Direction::North, 2), None);
    }

    #[test]
    fn test_corner_patterns() {
        assert!((Dirs::SOUTH | Dirs::EAST).is_corner());
        assert!((Dirs::NORTH | Dirs::WEST).is_corner());
        assert!(!(Dirs::NORTH | Dirs::SOUTH).is_corner());
        assert!(!(Dirs::NORTH | Dirs::EAST | Dirs::SOUTH).is_corner());
    }

    #[test]
    fn test_world_position() {
        let w = Position::new(3, 5).to_world(2.0);
        assert_eq!(w, WorldPosition { x: 6.0, z: 10.0 });
    }
}

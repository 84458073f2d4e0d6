//! Invariant checks for finished levels

use crate::generate::{MazeMode, find_path, label_regions};

use super::{CellKind, GridError, MazeGrid};

impl MazeGrid {
    /// Check the invariants every finished level must satisfy
    ///
    /// Exactly one Start and one Exit, Exit reachable from Start, a single
    /// passable region, Wall boundary for room layouts and odd dimensions for
    /// backtracking layouts. Returns the first violation found.
    pub fn validate(&self, mode: MazeMode) -> Result<(), GridError> {
        match self.count(CellKind::Start) {
            0 => return Err(GridError::MissingStart),
            1 => {}
            n => return Err(GridError::DuplicateStart(n)),
        }
        match self.count(CellKind::Exit) {
            0 => return Err(GridError::MissingExit),
            1 => {}
            n => return Err(GridError::DuplicateExit(n)),
        }

        match mode {
            MazeMode::Backtrack => {
                if self.width() % 2 == 0 || self.height() % 2 == 0 {
                    return Err(GridError::EvenDimensions {
                        width: self.width(),
                        height: self.height(),
                    });
                }
            }
            MazeMode::Rooms => {
                if let Some(open) = self
                    .positions()
                    .find(|p| self.is_boundary(*p) && !self.is_wall(*p))
                {
                    return Err(GridError::OpenBoundary { x: open.x, z: open.z });
                }
            }
        }

        let (start, exit) = match (self.start(), self.exit()) {
            (Some(s), Some(e)) => (s, e),
            _ => return Err(GridError::MissingStart),
        };
        if find_path(self, start, exit).is_none() {
            return Err(GridError::Unreachable);
        }

        let regions = label_regions(self).len();
        if regions > 1 {
            return Err(GridError::Disconnected { regions });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_room_grid() {
        let grid: MazeGrid = "#####\n#S..#\n#..E#\n#####\n".parse().unwrap();
        assert_eq!(grid.validate(MazeMode::Rooms), Ok(()));
    }

    #[test]
    fn test_missing_and_duplicate_markers() {
        let grid: MazeGrid = "#####\n#...#\n#..E#\n#####\n".parse().unwrap();
        assert_eq!(grid.validate(MazeMode::Rooms), Err(GridError::MissingStart));

        let grid: MazeGrid = "#####\n#S.E#\n#.E.#\n#####\n".parse().unwrap();
        assert_eq!(grid.validate(MazeMode::Rooms), Err(GridError::DuplicateExit(2)));
    }

    #[test]
    fn test_unreachable_exit() {
        let grid: MazeGrid = "#######\n#S.#.E#\n#######\n".parse().unwrap();
        assert_eq!(grid.validate(MazeMode::Backtrack), Err(GridError::Unreachable));
    }

    #[test]
    fn test_orphan_region() {
        let grid: MazeGrid = "#######\n#S.E#.#\n#######\n".parse().unwrap();
        assert_eq!(
            grid.validate(MazeMode::Backtrack),
            Err(GridError::Disconnected { regions: 2 })
        );
    }

    #[test]
    fn test_open_boundary_only_matters_for_rooms() {
        let grid: MazeGrid = "#####\nS..E#\n#####\n".parse().unwrap();
        assert_eq!(
            grid.validate(MazeMode::Rooms),
            Err(GridError::OpenBoundary { x: 0, z: 1 })
        );
        assert_eq!(grid.validate(MazeMode::Backtrack), Ok(()));
    }

    #[test]
    fn test_even_dimensions() {
        let grid: MazeGrid = "######\n#S..E#\n######\n".parse().unwrap();
        assert_eq!(
            grid.validate(MazeMode::Backtrack),
            Err(GridError::EvenDimensions { width: 6, height: 3 })
        );
    }
}

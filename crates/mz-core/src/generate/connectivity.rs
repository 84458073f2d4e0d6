//! Region labelling and corridor stitching
//!
//! Flood fills the passable cells into 4-connected regions, then joins every
//! secondary region to the primary one with an L-shaped corridor between the
//! closest pair of cells.

use crate::grid::{MazeGrid, Position};

use super::path::carve_l_corridor;

/// Side of the square buckets used by [`NearestIndex`]
const BUCKET_SIZE: usize = 8;

/// Split all passable cells into 4-connected regions
///
/// Uses an explicit stack, so grid size is not limited by call depth.
/// Regions come back in row-major order of their first cell.
pub fn label_regions(grid: &MazeGrid) -> Vec<Vec<Position>> {
    let idx = |p: Position| p.z * grid.width() + p.x;
    let mut visited = vec![false; grid.area()];
    let mut regions = Vec::new();
    let mut stack = Vec::new();

    for seed in grid.positions() {
        if visited[idx(seed)] || !grid.is_passable(seed) {
            continue;
        }

        let mut region = Vec::new();
        visited[idx(seed)] = true;
        stack.push(seed);

        while let Some(cur) = stack.pop() {
            region.push(cur);
            for next in grid.cardinal_neighbors(cur) {
                if !visited[idx(next)] && grid.is_passable(next) {
                    visited[idx(next)] = true;
                    stack.push(next);
                }
            }
        }

        regions.push(region);
    }

    regions
}

/// Bucketed point set answering nearest-by-Manhattan queries
///
/// Buckets are searched in growing square rings around the query. Any cell in
/// ring `r` or beyond is at least `(r - 1) * BUCKET_SIZE + 1` away, which lets
/// the search stop once that bound exceeds the best match found.
#[derive(Debug, Clone)]
pub struct NearestIndex {
    cols: usize,
    rows: usize,
    buckets: Vec<Vec<Position>>,
    len: usize,
}

impl NearestIndex {
    pub fn new(width: usize, height: usize) -> Self {
        let cols = width.div_ceil(BUCKET_SIZE).max(1);
        let rows = height.div_ceil(BUCKET_SIZE).max(1);
        Self {
            cols,
            rows,
            buckets: vec![Vec::new(); cols * rows],
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn insert(&mut self, pos: Position) {
        let bx = (pos.x / BUCKET_SIZE).min(self.cols - 1);
        let bz = (pos.z / BUCKET_SIZE).min(self.rows - 1);
        self.buckets[bz * self.cols + bx].push(pos);
        self.len += 1;
    }

    pub fn extend<I: IntoIterator<Item = Position>>(&mut self, cells: I) {
        for pos in cells {
            self.insert(pos);
        }
    }

    /// Closest stored cell to `query` with its distance
    pub fn nearest(&self, query: Position) -> Option<(Position, usize)> {
        if self.is_empty() {
            return None;
        }

        let qx = (query.x / BUCKET_SIZE).min(self.cols - 1);
        let qz = (query.z / BUCKET_SIZE).min(self.rows - 1);
        let max_ring = self.cols.max(self.rows);
        let mut best: Option<(Position, usize)> = None;

        for ring in 0..=max_ring {
            if let Some((_, d)) = best {
                let lower_bound = ring.saturating_sub(1) * BUCKET_SIZE + 1;
                if ring > 0 && lower_bound > d {
                    break;
                }
            }

            let x_lo = qx.saturating_sub(ring);
            let x_hi = (qx + ring).min(self.cols - 1);
            let z_lo = qz.saturating_sub(ring);
            let z_hi = (qz + ring).min(self.rows - 1);

            for bz in z_lo..=z_hi {
                for bx in x_lo..=x_hi {
                    // only the ring's outline; the inside was covered already
                    if bx.abs_diff(qx) != ring && bz.abs_diff(qz) != ring {
                        continue;
                    }
                    for &cand in &self.buckets[bz * self.cols + bx] {
                        let d = cand.manhattan(query);
                        if best.is_none_or(|(_, bd)| d < bd) {
                            best = Some((cand, d));
                        }
                    }
                }
            }
        }

        best
    }
}

/// Closest (primary, other) pair by Manhattan distance
fn nearest_pair(index: &NearestIndex, region: &[Position]) -> Option<(Position, Position, usize)> {
    let mut best: Option<(Position, Position, usize)> = None;
    for &cell in region {
        if let Some((anchor, d)) = index.nearest(cell)
            && best.is_none_or(|(_, _, bd)| d < bd)
        {
            best = Some((anchor, cell, d));
            if d <= 1 {
                break;
            }
        }
    }
    best
}

/// Join every passable region into one
///
/// The primary region is the one containing `anchor` when given (normally the
/// Start cell), otherwise the largest. Returns how many regions were merged.
pub fn repair_connectivity(grid: &mut MazeGrid, anchor: Option<Position>) -> usize {
    let mut regions = label_regions(grid);
    if regions.len() <= 1 {
        return 0;
    }

    let primary_idx = anchor
        .and_then(|a| regions.iter().position(|r| r.contains(&a)))
        .or_else(|| {
            regions
                .iter()
                .enumerate()
                .max_by_key(|(_, r)| r.len())
                .map(|(i, _)| i)
        })
        .unwrap_or(0);
    let primary = regions.swap_remove(primary_idx);

    let mut index = NearestIndex::new(grid.width(), grid.height());
    index.extend(primary);

    let mut merged = 0;
    for region in regions {
        let Some((from, to, dist)) = nearest_pair(&index, &region) else {
            continue;
        };
        log::debug!(
            "joining region of {} cells via ({}, {}) -> ({}, {}), distance {}",
            region.len(),
            from.x,
            from.z,
            to.x,
            to.z,
            dist
        );
        let corridor = carve_l_corridor(grid, from, to);
        index.extend(corridor);
        index.extend(region);
        merged += 1;
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellKind;
    use crate::rng::MazeRng;

    #[test]
    fn test_label_regions() {
        let grid: MazeGrid = "#######\n#..#..#\n#######\n#.#####\n#######\n".parse().unwrap();
        let regions = label_regions(&grid);
        assert_eq!(regions.len(), 3);
        assert_eq!(regions[0].len(), 2);
        assert_eq!(regions[2], vec![Position::new(1, 3)]);
    }

    #[test]
    fn test_nearest_matches_brute_force() {
        let mut rng = MazeRng::new(99);
        let mut index = NearestIndex::new(60, 45);
        let mut points = Vec::new();
        for _ in 0..80 {
            let p = Position::new(rng.below(60), rng.below(45));
            index.insert(p);
            points.push(p);
        }

        for _ in 0..200 {
            let q = Position::new(rng.below(60), rng.below(45));
            let brute = points.iter().map(|p| p.manhattan(q)).min().unwrap();
            let (_, d) = index.nearest(q).unwrap();
            assert_eq!(d, brute);
        }
    }

    #[test]
    fn test_nearest_empty() {
        let index = NearestIndex::new(10, 10);
        assert!(index.nearest(Position::new(1, 1)).is_none());
    }

    #[test]
    fn test_repair_joins_everything() {
        let mut grid: MazeGrid = concat!(
            "###########\n",
            "#S..#######\n",
            "#..##...###\n",
            "#####...###\n",
            "#########.#\n",
            "#.#########\n",
            "###########\n",
        )
        .parse()
        .unwrap();
        let start = grid.start();
        let merged = repair_connectivity(&mut grid, start);
        assert_eq!(merged, 3);
        assert_eq!(label_regions(&grid).len(), 1);
        assert_eq!(grid.get(Position::new(1, 1)), CellKind::Start);
    }

    #[test]
    fn test_repair_noop_when_connected() {
        let mut grid: MazeGrid = "#####\n#S.E#\n#####\n".parse().unwrap();
        let before = grid.clone();
        let start = grid.start();
        assert_eq!(repair_connectivity(&mut grid, start), 0);
        assert_eq!(grid, before);
    }
}

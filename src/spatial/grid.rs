//! Uniform bucket grid over a static point set.
//!
//! The bounding box of the points is split into `nx × ny × nz` cells whose
//! count is chosen so that a cell holds about `max_points_per_cell` points on
//! average. Queries return whole buckets; callers re-check exact distances.

/// Default bucket density.
pub const DEFAULT_MAX_POINTS_PER_CELL: usize = 64;

/// Axis-aligned uniform grid of point-index buckets.
#[derive(Clone, Debug)]
pub struct Grid {
    min: [f64; 3],
    extent: [f64; 3],
    n_steps: [usize; 3],
    buckets: Vec<Vec<usize>>,
}

impl Grid {
    /// Build the grid over `points`. Point `i` of the input lands in exactly
    /// one bucket; buckets store indices in ascending order.
    pub fn new(points: &[[f64; 3]], max_points_per_cell: usize) -> Self {
        let (min, max) = bounding_box(points);
        let extent = [max[0] - min[0], max[1] - min[1], max[2] - min[2]];
        let n_steps = grid_steps(extent, points.len(), max_points_per_cell.max(1));
        let mut grid = Grid {
            min,
            extent,
            n_steps,
            buckets: vec![Vec::new(); n_steps[0] * n_steps[1] * n_steps[2]],
        };
        for (i, p) in points.iter().enumerate() {
            let cell = grid.cell_of(*p);
            let idx = grid.flat_index(cell);
            grid.buckets[idx].push(i);
        }
        log::debug!(
            "grid over {} points: {}x{}x{} cells",
            points.len(),
            n_steps[0],
            n_steps[1],
            n_steps[2]
        );
        grid
    }

    /// Number of cells along each axis.
    pub fn n_steps(&self) -> [usize; 3] {
        self.n_steps
    }

    /// Buckets of all cells intersecting the cube
    /// `[center - half_width, center + half_width]^3`, in x-fastest order.
    ///
    /// Cells are clamped to the grid, so a cube outside the bounding box
    /// still yields the nearest border cells.
    pub fn cells_intersecting_cube(&self, center: [f64; 3], half_width: f64) -> Vec<&[usize]> {
        let lo = self.cell_of([
            center[0] - half_width,
            center[1] - half_width,
            center[2] - half_width,
        ]);
        let hi = self.cell_of([
            center[0] + half_width,
            center[1] + half_width,
            center[2] + half_width,
        ]);
        let mut out = Vec::new();
        for k in lo[2]..=hi[2] {
            for j in lo[1]..=hi[1] {
                for i in lo[0]..=hi[0] {
                    let bucket = &self.buckets[self.flat_index([i, j, k])];
                    if !bucket.is_empty() {
                        out.push(bucket.as_slice());
                    }
                }
            }
        }
        out
    }

    fn cell_of(&self, p: [f64; 3]) -> [usize; 3] {
        let mut cell = [0usize; 3];
        for axis in 0..3 {
            let steps = self.n_steps[axis];
            if steps == 1 {
                continue;
            }
            let t = (p[axis] - self.min[axis]) / self.extent[axis] * steps as f64;
            // negative and NaN saturate to 0
            cell[axis] = (t.floor().max(0.0) as usize).min(steps - 1);
        }
        cell
    }

    #[inline]
    fn flat_index(&self, [i, j, k]: [usize; 3]) -> usize {
        i + self.n_steps[0] * (j + self.n_steps[1] * k)
    }
}

fn bounding_box(points: &[[f64; 3]]) -> ([f64; 3], [f64; 3]) {
    if points.is_empty() {
        return ([0.0; 3], [0.0; 3]);
    }
    let mut min = [f64::INFINITY; 3];
    let mut max = [f64::NEG_INFINITY; 3];
    for p in points {
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }
    (min, max)
}

/// Cells per axis for a box of `extent` holding `n_points`.
///
/// Cells are cubic-ish with side `1 / c`, where `c` makes the active axes
/// hold `n_points / max_points_per_cell` cells in total. An axis thinner than
/// one cell (including zero extent) gets a single cell and is taken out of
/// the sizing, so the total cell count stays within `2^3` times the target.
fn grid_steps(extent: [f64; 3], n_points: usize, max_points_per_cell: usize) -> [usize; 3] {
    let target = (n_points as f64 / max_points_per_cell as f64).max(1.0);
    let mut active = [true; 3];
    for axis in 0..3 {
        active[axis] = extent[axis].is_finite() && extent[axis] > 0.0;
    }
    loop {
        let k = active.iter().filter(|a| **a).count();
        if k == 0 {
            return [1; 3];
        }
        let volume: f64 = (0..3).filter(|&a| active[a]).map(|a| extent[a]).product();
        let c = (target / volume).powf(1.0 / k as f64);
        let thin = (0..3).find(|&a| active[a] && extent[a] * c < 1.0);
        match thin {
            // a single active axis always gets `target >= 1` cells
            Some(axis) if k > 1 => active[axis] = false,
            _ => {
                let mut steps = [1usize; 3];
                for axis in 0..3 {
                    if active[axis] {
                        steps[axis] = ((extent[axis] * c).ceil() as usize).max(1);
                    }
                }
                return steps;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lattice(n: usize) -> Vec<[f64; 3]> {
        let mut pts = Vec::new();
        for k in 0..n {
            for j in 0..n {
                for i in 0..n {
                    pts.push([i as f64, j as f64, k as f64]);
                }
            }
        }
        pts
    }

    #[test]
    fn every_point_in_exactly_one_bucket() {
        let pts = lattice(10);
        let grid = Grid::new(&pts, 8);
        let mut seen = vec![0usize; pts.len()];
        for bucket in &grid.buckets {
            assert!(bucket.windows(2).all(|w| w[0] < w[1]));
            for &i in bucket {
                seen[i] += 1;
            }
        }
        assert!(seen.iter().all(|&c| c == 1));
    }

    #[test]
    fn sizing_follows_density() {
        let pts = lattice(10);
        let grid = Grid::new(&pts, 8);
        let cells: usize = grid.n_steps().iter().product();
        // 1000 points at 8 per cell → about 125 cells
        assert!((125..=1000).contains(&cells), "{cells}");
        assert_eq!(Grid::new(&pts, 10_000).n_steps(), [1, 1, 1]);
    }

    #[test]
    fn flat_point_sets_get_single_cell_axes() {
        let pts: Vec<[f64; 3]> = (0..100).map(|i| [(i % 10) as f64, (i / 10) as f64, 0.0]).collect();
        let grid = Grid::new(&pts, 4);
        let steps = grid.n_steps();
        assert_eq!(steps[2], 1);
        assert!(steps[0] > 1 && steps[1] > 1);
    }

    #[test]
    fn thin_axis_does_not_blow_up_cell_count() {
        let pts: Vec<[f64; 3]> = (0..1000)
            .map(|i| [i as f64, (i % 7) as f64, 1e-9 * (i % 2) as f64])
            .collect();
        let grid = Grid::new(&pts, 1);
        let cells: usize = grid.n_steps().iter().product();
        assert!(cells <= 8 * 1000, "{cells}");
    }

    #[test]
    fn cube_query_finds_neighbours() {
        let pts = lattice(10);
        let grid = Grid::new(&pts, 8);
        let center = [4.0, 4.0, 4.0];
        let found: Vec<usize> = grid
            .cells_intersecting_cube(center, 1.0)
            .into_iter()
            .flatten()
            .copied()
            .collect();
        for (i, p) in pts.iter().enumerate() {
            let inside = (0..3).all(|a| (p[a] - center[a]).abs() <= 1.0);
            if inside {
                assert!(found.contains(&i), "missing {p:?}");
            }
        }
    }

    #[test]
    fn empty_and_single_point_grids() {
        let grid = Grid::new(&[], 64);
        assert_eq!(grid.n_steps(), [1, 1, 1]);
        assert!(grid.cells_intersecting_cube([0.0; 3], 1.0).is_empty());
        let grid = Grid::new(&[[2.0, 3.0, 4.0]], 64);
        let buckets = grid.cells_intersecting_cube([100.0; 3], 0.0);
        assert_eq!(buckets, vec![&[0usize][..]]);
    }
}

//! Quantized distance-grid storage and bilinear sampling.
//!
//! A [`DistanceGrid`] holds per-cell obstacle-aware distances from one sensor,
//! quantized at `cell_size` pixels per cell. `f32::INFINITY` marks cells no
//! obstacle-respecting path reached.
use glam::Vec2;

/// Per-sensor grid of non-negative geodesic distances, row-major.
#[derive(Clone, Debug)]
pub struct DistanceGrid {
    /// Number of cells in X.
    pub width: usize,
    /// Number of cells in Y.
    pub height: usize,
    /// Cell size in pixels.
    pub cell_size: f32,
    /// Row-major distances; `INFINITY` means unreached.
    pub data: Vec<f32>,
}

impl DistanceGrid {
    /// Create a new grid with every cell unreached.
    pub fn new(width: usize, height: usize, cell_size: f32) -> Self {
        Self {
            width,
            height,
            cell_size,
            data: vec![f32::INFINITY; width * height],
        }
    }

    /// Distance at the given cell, `INFINITY` if out of bounds.
    #[inline]
    pub fn get(&self, ix: isize, iy: isize) -> f32 {
        if ix < 0 || iy < 0 || ix >= self.width as isize || iy >= self.height as isize {
            return f32::INFINITY;
        }
        self.data[(iy as usize) * self.width + ix as usize]
    }

    /// Set the distance at the given in-bounds cell.
    #[inline]
    pub fn set(&mut self, ix: usize, iy: usize, value: f32) {
        self.data[iy * self.width + ix] = value;
    }

    /// Cell containing the given canvas position, clamped to the grid bounds.
    pub fn cell_of(&self, p: Vec2) -> (usize, usize) {
        let ix = (p.x / self.cell_size).floor() as isize;
        let iy = (p.y / self.cell_size).floor() as isize;
        (
            ix.clamp(0, self.width as isize - 1) as usize,
            iy.clamp(0, self.height as isize - 1) as usize,
        )
    }

    /// Canvas position of a cell's reference corner.
    #[inline]
    pub fn world_of(&self, ix: usize, iy: usize) -> Vec2 {
        Vec2::new(ix as f32 * self.cell_size, iy as f32 * self.cell_size)
    }

    /// Bilinear sample of the distance field at a continuous canvas position.
    ///
    /// If the top-left corner cell is unreached the sample is `INFINITY`: no
    /// obstacle-respecting path ends here. Any other unreached corner is
    /// replaced by the top-left value before blending, which keeps `INFINITY`
    /// from bleeding into a mostly-reachable area at the cost of slight
    /// smoothing bias near reachability frontiers.
    pub fn sample(&self, p: Vec2) -> f32 {
        let gx = p.x / self.cell_size;
        let gy = p.y / self.cell_size;

        let w1 = self.width as isize - 1;
        let h1 = self.height as isize - 1;
        let x0 = (gx.floor() as isize).clamp(0, w1);
        let y0 = (gy.floor() as isize).clamp(0, h1);
        let x1 = (x0 + 1).min(w1);
        let y1 = (y0 + 1).min(h1);

        let d00 = self.get(x0, y0);
        if d00.is_infinite() {
            return f32::INFINITY;
        }

        let pick = |v: f32| if v.is_infinite() { d00 } else { v };
        let d10 = pick(self.get(x1, y0));
        let d01 = pick(self.get(x0, y1));
        let d11 = pick(self.get(x1, y1));

        let tx = (gx - x0 as f32).clamp(0.0, 1.0);
        let ty = (gy - y0 as f32).clamp(0.0, 1.0);

        let top = d00 + (d10 - d00) * tx;
        let bottom = d01 + (d11 - d01) * tx;
        top + (bottom - top) * ty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_grid() -> DistanceGrid {
        let mut grid = DistanceGrid::new(3, 3, 2.0);
        for iy in 0..3 {
            for ix in 0..3 {
                grid.set(ix, iy, (ix + iy) as f32);
            }
        }
        grid
    }

    #[test]
    fn new_grid_is_unreached_everywhere() {
        let grid = DistanceGrid::new(4, 2, 1.0);
        assert!(grid.data.iter().all(|d| d.is_infinite()));
    }

    #[test]
    fn get_returns_infinity_outside_bounds() {
        let grid = DistanceGrid::new(2, 2, 1.0);
        assert!(grid.get(-1, 0).is_infinite());
        assert!(grid.get(5, 5).is_infinite());
    }

    #[test]
    fn sample_interpolates_between_cells() {
        let grid = filled_grid();
        // Halfway between cells (0,0)=0 and (1,0)=1 along x.
        let v = grid.sample(Vec2::new(1.0, 0.0));
        assert!((v - 0.5).abs() < 1e-6);
    }

    #[test]
    fn sample_at_cell_corner_is_exact() {
        let grid = filled_grid();
        assert_eq!(grid.sample(Vec2::new(2.0, 4.0)), 3.0);
    }

    #[test]
    fn infinite_top_left_corner_short_circuits() {
        let mut grid = filled_grid();
        grid.set(1, 1, f32::INFINITY);
        assert!(grid.sample(Vec2::new(2.5, 2.5)).is_infinite());
    }

    #[test]
    fn infinite_secondary_corner_uses_top_left_value() {
        let mut grid = filled_grid();
        grid.set(1, 0, f32::INFINITY);
        // d00=0 substitutes for the infinite d10, so the row blend stays 0.
        let v = grid.sample(Vec2::new(1.0, 0.0));
        assert_eq!(v, 0.0);
    }

    #[test]
    fn sample_clamps_outside_canvas() {
        let grid = filled_grid();
        let v = grid.sample(Vec2::new(-10.0, -10.0));
        assert_eq!(v, 0.0);
        let v = grid.sample(Vec2::new(100.0, 100.0));
        assert_eq!(v, 4.0);
    }

    #[test]
    fn cell_of_clamps_to_bounds() {
        let grid = filled_grid();
        assert_eq!(grid.cell_of(Vec2::new(-3.0, 1.0)), (0, 0));
        assert_eq!(grid.cell_of(Vec2::new(50.0, 50.0)), (2, 2));
        assert_eq!(grid.cell_of(Vec2::new(3.0, 5.0)), (1, 2));
    }
}

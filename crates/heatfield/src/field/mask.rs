//! Interior/exterior classification via flood fill from sensor cells.
//!
//! Pixels outside the [`InteriorMask`] are treated as "outside the building"
//! and rendered transparent.
use std::collections::VecDeque;

use glam::Vec2;
use tracing::warn;

use crate::config::{Sensor, Wall};
use crate::field::geometry::segment_blocked;

/// Boolean cell grid marking the region reachable from at least one sensor
/// without crossing a wall.
#[derive(Clone, Debug)]
pub struct InteriorMask {
    /// Number of cells in X.
    pub width: usize,
    /// Number of cells in Y.
    pub height: usize,
    /// Cell size in pixels.
    pub cell_size: f32,
    /// Row-major interior flags.
    pub cells: Vec<bool>,
}

impl InteriorMask {
    fn filled(width: usize, height: usize, cell_size: f32, value: bool) -> Self {
        Self {
            width,
            height,
            cell_size,
            cells: vec![value; width * height],
        }
    }

    #[inline]
    fn cell(&self, ix: isize, iy: isize) -> bool {
        if ix < 0 || iy < 0 || ix >= self.width as isize || iy >= self.height as isize {
            return false;
        }
        self.cells[(iy as usize) * self.width + ix as usize]
    }

    /// Whether the pixel at the given canvas position should be rendered.
    pub fn is_interior(&self, x: f32, y: f32) -> bool {
        let ix = (x / self.cell_size).floor() as isize;
        let iy = (y / self.cell_size).floor() as isize;
        self.cell(ix, iy)
    }

    /// Number of interior cells.
    pub fn interior_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }
}

/// Builds the interior mask by 4-connected flood fill seeded from every
/// sensor's cell; a move between adjacent cells is permitted only if the
/// straight segment between them is unobstructed.
///
/// With no sensors the interior falls back to the bounding box of all wall
/// endpoints, and with no walls either, to the whole canvas.
pub fn build_interior_mask(
    sensors: &[Sensor],
    walls: &[Wall],
    width: usize,
    height: usize,
    cell_size: f32,
) -> InteriorMask {
    if sensors.is_empty() {
        if walls.is_empty() {
            return InteriorMask::filled(width, height, cell_size, true);
        }
        warn!("No sensors to seed the interior fill; using the wall bounding box.");
        return wall_bounding_box_mask(walls, width, height, cell_size);
    }

    let mut mask = InteriorMask::filled(width, height, cell_size, false);
    let mut queue: VecDeque<(usize, usize)> = VecDeque::new();

    for sensor in sensors {
        let ix = (sensor.position.x / cell_size).floor() as isize;
        let iy = (sensor.position.y / cell_size).floor() as isize;
        let ix = ix.clamp(0, width as isize - 1) as usize;
        let iy = iy.clamp(0, height as isize - 1) as usize;
        if !mask.cells[iy * width + ix] {
            mask.cells[iy * width + ix] = true;
            queue.push_back((ix, iy));
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        let from = Vec2::new(x as f32 * cell_size, y as f32 * cell_size);

        for (dx, dy) in [(0isize, -1isize), (-1, 0), (1, 0), (0, 1)] {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                continue;
            }
            let idx = (ny as usize) * width + nx as usize;
            if mask.cells[idx] {
                continue;
            }
            let to = Vec2::new(nx as f32 * cell_size, ny as f32 * cell_size);
            if segment_blocked(from, to, walls) {
                continue;
            }
            mask.cells[idx] = true;
            queue.push_back((nx as usize, ny as usize));
        }
    }

    mask
}

fn wall_bounding_box_mask(
    walls: &[Wall],
    width: usize,
    height: usize,
    cell_size: f32,
) -> InteriorMask {
    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    for wall in walls {
        min = min.min(wall.a).min(wall.b);
        max = max.max(wall.a).max(wall.b);
    }

    let mut mask = InteriorMask::filled(width, height, cell_size, false);
    for iy in 0..height {
        for ix in 0..width {
            let p = Vec2::new(ix as f32 * cell_size, iy as f32 * cell_size);
            if p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y {
                mask.cells[iy * width + ix] = true;
            }
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_sensors_no_walls_marks_everything_interior() {
        let mask = build_interior_mask(&[], &[], 5, 5, 1.0);
        assert_eq!(mask.interior_count(), 25);
        assert!(mask.is_interior(2.5, 2.5));
    }

    #[test]
    fn no_sensors_falls_back_to_wall_bounding_box() {
        let walls = vec![Wall::new(2.0, 2.0, 6.0, 2.0), Wall::new(6.0, 2.0, 6.0, 6.0)];
        let mask = build_interior_mask(&[], &walls, 10, 10, 1.0);
        assert!(mask.is_interior(4.0, 4.0));
        assert!(!mask.is_interior(9.0, 9.0));
        assert!(!mask.is_interior(0.0, 0.0));
    }

    #[test]
    fn fill_does_not_cross_a_full_span_wall() {
        let walls = vec![Wall::new(5.0, -10.0, 5.0, 30.0)];
        let sensors = vec![Sensor::new("s", 1.0, 5.0)];
        let mask = build_interior_mask(&sensors, &walls, 10, 10, 1.0);

        assert!(mask.is_interior(1.0, 5.0));
        assert!(mask.is_interior(4.0, 8.0));
        for y in 0..10 {
            assert!(!mask.is_interior(7.0, y as f32));
        }
    }

    #[test]
    fn pixels_outside_canvas_are_exterior() {
        let sensors = vec![Sensor::new("s", 1.0, 1.0)];
        let mask = build_interior_mask(&sensors, &[], 5, 5, 1.0);
        assert!(!mask.is_interior(-1.0, 0.0));
        assert!(!mask.is_interior(0.0, 50.0));
    }

    #[test]
    fn sensors_in_separate_rooms_both_seed_the_fill() {
        let walls = vec![Wall::new(5.0, -10.0, 5.0, 30.0)];
        let sensors = vec![Sensor::new("a", 1.0, 5.0), Sensor::new("b", 8.0, 5.0)];
        let mask = build_interior_mask(&sensors, &walls, 10, 10, 1.0);
        assert!(mask.is_interior(2.0, 5.0));
        assert!(mask.is_interior(8.0, 5.0));
    }
}

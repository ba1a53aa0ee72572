//! Wall-aware distance field construction.
//!
//! Builds one [`DistanceGrid`] per sensor by expanding a min-priority frontier
//! over the 8-connected cell graph, admitting a move only when the straight
//! world-space segment between the two cells crosses no wall. A bounded number
//! of repair passes then fills cells the frontier missed due to quantization.
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use glam::Vec2;
use tracing::warn;

use crate::config::Wall;
use crate::field::geometry::segment_blocked;
use crate::field::grid::DistanceGrid;

/// Upper bound on repair passes over still-unreached cells.
const REPAIR_PASSES: usize = 2;

/// 8-neighborhood offsets.
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[derive(Clone, Copy)]
struct Frontier {
    dist: f32,
    x: usize,
    y: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on distance so the BinaryHeap pops the nearest cell first.
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| self.x.cmp(&other.x))
            .then_with(|| self.y.cmp(&other.y))
    }
}

#[inline]
fn step_cost(dx: isize, dy: isize, cell_size: f32) -> f32 {
    if dx != 0 && dy != 0 {
        std::f32::consts::SQRT_2 * cell_size
    } else {
        cell_size
    }
}

/// Builds the obstacle-aware distance grid for a single sensor.
///
/// Every cell starts unreached; the sensor's own cell is seeded at distance 0.
/// Cardinal moves cost `cell_size`, diagonal moves `sqrt(2) * cell_size`.
pub fn build_distance_grid(
    sensor_pos: Vec2,
    walls: &[Wall],
    width: usize,
    height: usize,
    cell_size: f32,
) -> DistanceGrid {
    let mut grid = DistanceGrid::new(width, height, cell_size);

    let max = Vec2::new(width as f32 * cell_size, height as f32 * cell_size);
    if sensor_pos.x < 0.0 || sensor_pos.y < 0.0 || sensor_pos.x > max.x || sensor_pos.y > max.y {
        warn!(
            "Sensor at ({}, {}) lies outside the canvas; seeding at the nearest cell.",
            sensor_pos.x, sensor_pos.y
        );
    }
    let (sx, sy) = grid.cell_of(sensor_pos);
    grid.set(sx, sy, 0.0);

    let mut heap = BinaryHeap::new();
    heap.push(Frontier {
        dist: 0.0,
        x: sx,
        y: sy,
    });

    while let Some(Frontier { dist, x, y }) = heap.pop() {
        if dist > grid.get(x as isize, y as isize) {
            continue;
        }
        let from = grid.world_of(x, y);

        for (dx, dy) in NEIGHBORS {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                continue;
            }

            let candidate = dist + step_cost(dx, dy, cell_size);
            if candidate >= grid.get(nx, ny) {
                continue;
            }
            let to = grid.world_of(nx as usize, ny as usize);
            if segment_blocked(from, to, walls) {
                continue;
            }

            grid.set(nx as usize, ny as usize, candidate);
            heap.push(Frontier {
                dist: candidate,
                x: nx as usize,
                y: ny as usize,
            });
        }
    }

    repair_unreached(&mut grid, walls);
    grid
}

/// Assigns `neighbor + step_cost` to unreached cells with a reachable,
/// unobstructed finite neighbor. Quantization can strand cells the frontier
/// never relaxes; a fixed number of whole-grid passes repairs them without
/// unbounded recursion.
fn repair_unreached(grid: &mut DistanceGrid, walls: &[Wall]) {
    let cell_size = grid.cell_size;

    for _ in 0..REPAIR_PASSES {
        let mut changed = false;

        for y in 0..grid.height {
            for x in 0..grid.width {
                if grid.get(x as isize, y as isize).is_finite() {
                    continue;
                }
                let here = grid.world_of(x, y);

                let mut best = f32::INFINITY;
                for (dx, dy) in NEIGHBORS {
                    let nd = grid.get(x as isize + dx, y as isize + dy);
                    if !nd.is_finite() {
                        continue;
                    }
                    let neighbor =
                        grid.world_of((x as isize + dx) as usize, (y as isize + dy) as usize);
                    if segment_blocked(here, neighbor, walls) {
                        continue;
                    }
                    best = best.min(nd + step_cost(dx, dy, cell_size));
                }

                if best.is_finite() {
                    grid.set(x, y, best);
                    changed = true;
                }
            }
        }

        if !changed {
            break;
        }
    }
}

//! Segment intersection and point-to-segment distance primitives.
//!
//! All geometry failures (degenerate or zero-length walls) are handled by
//! definition; nothing in this module panics.
use glam::Vec2;

use crate::config::Wall;

/// Determinant magnitude below which two segments are treated as parallel.
const PARALLEL_EPSILON: f32 = 1e-10;

/// Intersection of segments `a1..a2` and `b1..b2`, inclusive of endpoints.
///
/// Solves the 2x2 linear system for the segment parameters `t` and `u` and
/// returns `None` when the determinant is near zero (parallel or degenerate
/// segments) or when either parameter falls outside `[0, 1]`.
pub fn segment_intersection(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<Vec2> {
    let d = a2 - a1;
    let e = b2 - b1;

    let det = d.x * e.y - d.y * e.x;
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }

    let f = b1 - a1;
    let t = (f.x * e.y - f.y * e.x) / det;
    let u = (f.x * d.y - f.y * d.x) / det;

    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }

    Some(a1 + d * t)
}

/// Whether the straight segment `a..b` crosses any wall.
///
/// The intersection point is validated against both segments by recovering the
/// segment parameter along the larger-magnitude axis, which avoids dividing by
/// a near-zero coordinate delta on axis-aligned segments.
pub fn segment_blocked(a: Vec2, b: Vec2, walls: &[Wall]) -> bool {
    walls.iter().any(|wall| {
        match segment_intersection(a, b, wall.a, wall.b) {
            Some(p) => on_segment(p, a, b) && on_segment(p, wall.a, wall.b),
            None => false,
        }
    })
}

/// Whether point `p` (already known to be on the supporting line) lies within
/// the segment `a..b`, using the larger-magnitude axis for the parameter.
fn on_segment(p: Vec2, a: Vec2, b: Vec2) -> bool {
    let d = b - a;
    let t = if d.x.abs() >= d.y.abs() {
        if d.x.abs() < PARALLEL_EPSILON {
            return true;
        }
        (p.x - a.x) / d.x
    } else {
        (p.y - a.y) / d.y
    };
    (-1e-6..=1.0 + 1e-6).contains(&t)
}

/// Euclidean distance from `p` to the nearest point on `wall`.
///
/// Projects `p` onto the wall's supporting line and clamps the projection
/// parameter to `[0, 1]`. A zero-length wall degrades to point distance.
pub fn point_to_segment_distance(p: Vec2, wall: &Wall) -> f32 {
    let d = wall.b - wall.a;
    let len_sq = d.length_squared();
    if len_sq < PARALLEL_EPSILON {
        return p.distance(wall.a);
    }

    let t = ((p - wall.a).dot(d) / len_sq).clamp(0.0, 1.0);
    p.distance(wall.a + d * t)
}

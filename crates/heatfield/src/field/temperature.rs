//! Multi-sensor temperature blending.
//!
//! Combines per-sensor sampled geodesic distances into one temperature per
//! query point: dominance near a sensor, exponential decay with a flow bonus
//! farther out, an ambient blend where total influence runs out, and a
//! circular Euclidean smoothstep right around each sensor to hide the grid
//! quantization of the background field.
use glam::Vec2;

use crate::config::{FieldConfig, Sensor};
use crate::field::grid::DistanceGrid;

/// Influence assigned inside the dominance radius; large enough that the
/// sensor's reading wins any weighted average it participates in.
const DOMINANT_INFLUENCE: f32 = 1e6;

fn smoothstep01(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Temperature estimate at a canvas position.
///
/// `grids` is parallel to `sensors`; an entry is `None` when no distance grid
/// was built for that sensor (no usable reading this cycle). Sensors without a
/// usable reading contribute nothing, and a point no sensor reaches reads as
/// `config.ambient_temp`.
pub fn field_value(
    p: Vec2,
    sensors: &[Sensor],
    grids: &[Option<DistanceGrid>],
    config: &FieldConfig,
) -> f32 {
    let mut total_influence = 0.0f32;
    let mut weighted_sum = 0.0f32;

    for (sensor, grid) in sensors.iter().zip(grids.iter()) {
        let Some(reading) = sensor.usable_reading() else {
            continue;
        };
        let Some(grid) = grid else {
            continue;
        };

        let distance = grid.sample(p);
        if distance.is_infinite() {
            continue;
        }

        let influence = if distance <= config.dominance_radius {
            DOMINANT_INFLUENCE
        } else {
            let decay = (-distance * config.decay_factor).exp();
            let flow_bonus = 1.0 + (-distance / config.flow_scale).exp();
            decay * flow_bonus
        };

        if influence > 0.0 {
            total_influence += influence;
            weighted_sum += influence * reading;
        }
    }

    let mut value = if total_influence > 0.0 {
        let mut averaged = weighted_sum / total_influence;
        if total_influence < config.blend_threshold {
            // Soft hand-off toward ambient at the edge of sensor coverage;
            // the sqrt keeps the seam from reading as a hard ring.
            let t = (total_influence / config.blend_threshold).sqrt();
            averaged = config.ambient_temp + (averaged - config.ambient_temp) * t;
        }
        averaged
    } else {
        config.ambient_temp
    };

    if config.blend_radius > 0.0 {
        for sensor in sensors {
            let Some(reading) = sensor.usable_reading() else {
                continue;
            };
            let euclid = p.distance(sensor.position);
            if euclid < config.blend_radius {
                let s = smoothstep01(1.0 - euclid / config.blend_radius);
                value += (reading - value) * s;
            }
        }
    }

    value
}

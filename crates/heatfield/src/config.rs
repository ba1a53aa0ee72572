//! Configuration types for the field engine.
//!
//! This module defines the inputs consumed from the host: [`Wall`] segments,
//! [`Sensor`]s with live readings, and the [`FieldConfig`] that bundles them with the
//! canvas dimensions and tunable constants. Everything that affects the computed
//! field lives here so a single fingerprint of the config can key the frame cache.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An undirected wall segment in canvas coordinates. Zero-width idealization.
///
/// A zero-length wall behaves as a point obstacle for proximity queries and
/// intersects nothing under the segment-intersection test.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Wall {
    pub a: Vec2,
    pub b: Vec2,
}

impl Wall {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            a: Vec2::new(x1, y1),
            b: Vec2::new(x2, y2),
        }
    }
}

/// A point sensor with an optional live reading.
///
/// A sensor whose reading is `None` (or non-finite) is excluded from the
/// computation for that cycle entirely; it is never treated as 0 °C.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct Sensor {
    /// Unique identifier for this sensor.
    pub id: String,
    /// Position in canvas coordinates.
    pub position: Vec2,
    /// Optional display label.
    pub label: Option<String>,
    /// Live temperature reading in °C, if one was available this cycle.
    pub reading: Option<f32>,
}

impl Sensor {
    /// Create a sensor with no reading.
    pub fn new(id: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            id: id.into(),
            position: Vec2::new(x, y),
            label: None,
            reading: None,
        }
    }

    /// Set the live reading.
    pub fn with_reading(mut self, reading: f32) -> Self {
        self.reading = Some(reading);
        self
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The reading usable for computation, filtering out non-finite values.
    #[inline]
    pub fn usable_reading(&self) -> Option<f32> {
        self.reading.filter(|r| r.is_finite())
    }
}

/// Configuration for computing a temperature field over a floor plan.
#[non_exhaustive]
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldConfig {
    /// Wall segments obstructing heat propagation.
    pub walls: Vec<Wall>,
    /// Sensors with live readings.
    pub sensors: Vec<Sensor>,
    /// Canvas width in pixels.
    pub canvas_width: u32,
    /// Canvas height in pixels.
    pub canvas_height: u32,
    /// Lower bound of the comfort zone in °C.
    pub comfort_min: f32,
    /// Upper bound of the comfort zone in °C.
    pub comfort_max: f32,
    /// Temperature assumed where no sensor has influence, in °C.
    pub ambient_temp: f32,
    /// Distance-grid cell size in pixels. Larger is faster and coarser.
    pub grid_scale: f32,
    /// Geodesic distance within which a sensor's reading is authoritative, in pixels.
    pub dominance_radius: f32,
    /// Exponential decay factor applied to geodesic distance.
    pub decay_factor: f32,
    /// Scale of the secondary flow bonus favoring short geodesic paths, in pixels.
    pub flow_scale: f32,
    /// Euclidean radius of the circular near-sensor blend, in pixels.
    pub blend_radius: f32,
    /// Total influence below which the field blends toward ambient.
    pub blend_threshold: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            walls: Vec::new(),
            sensors: Vec::new(),
            canvas_width: 0,
            canvas_height: 0,
            comfort_min: 20.0,
            comfort_max: 24.0,
            ambient_temp: 20.0,
            grid_scale: 4.0,
            dominance_radius: 5.0,
            decay_factor: 0.02,
            flow_scale: 40.0,
            blend_radius: 12.0,
            blend_threshold: 0.05,
        }
    }
}

impl FieldConfig {
    /// Creates a new [`FieldConfig`] for the given canvas size.
    pub fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            canvas_width,
            canvas_height,
            ..Default::default()
        }
    }

    /// Sets the wall segments.
    pub fn with_walls(mut self, walls: Vec<Wall>) -> Self {
        self.walls = walls;
        self
    }

    /// Sets the sensors.
    pub fn with_sensors(mut self, sensors: Vec<Sensor>) -> Self {
        self.sensors = sensors;
        self
    }

    /// Sets the comfort zone bounds in °C.
    pub fn with_comfort_zone(mut self, comfort_min: f32, comfort_max: f32) -> Self {
        self.comfort_min = comfort_min;
        self.comfort_max = comfort_max;
        self
    }

    /// Sets the ambient temperature in °C.
    pub fn with_ambient_temp(mut self, ambient_temp: f32) -> Self {
        self.ambient_temp = ambient_temp;
        self
    }

    /// Sets the distance-grid cell size in pixels.
    pub fn with_grid_scale(mut self, grid_scale: f32) -> Self {
        self.grid_scale = grid_scale;
        self
    }

    /// Sets the dominance radius in pixels.
    pub fn with_dominance_radius(mut self, dominance_radius: f32) -> Self {
        self.dominance_radius = dominance_radius;
        self
    }

    /// Sets the exponential decay factor.
    pub fn with_decay_factor(mut self, decay_factor: f32) -> Self {
        self.decay_factor = decay_factor;
        self
    }

    /// Sets the flow bonus scale in pixels.
    pub fn with_flow_scale(mut self, flow_scale: f32) -> Self {
        self.flow_scale = flow_scale;
        self
    }

    /// Sets the circular near-sensor blend radius in pixels.
    pub fn with_blend_radius(mut self, blend_radius: f32) -> Self {
        self.blend_radius = blend_radius;
        self
    }

    /// Sets the low-influence blend threshold.
    pub fn with_blend_threshold(mut self, blend_threshold: f32) -> Self {
        self.blend_threshold = blend_threshold;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(Error::InvalidConfig(
                "canvas dimensions must be > 0".into(),
            ));
        }
        if !(self.grid_scale.is_finite() && self.grid_scale > 0.0) {
            return Err(Error::InvalidConfig("grid_scale must be > 0".into()));
        }
        if self.decay_factor < 0.0 {
            return Err(Error::InvalidConfig("decay_factor must be >= 0".into()));
        }
        if self.flow_scale <= 0.0 {
            return Err(Error::InvalidConfig("flow_scale must be > 0".into()));
        }
        if self.blend_radius < 0.0 {
            return Err(Error::InvalidConfig("blend_radius must be >= 0".into()));
        }

        Ok(())
    }

    /// Distance-grid dimensions `(width, height)` in cells covering the canvas.
    pub fn grid_dims(&self) -> (usize, usize) {
        let w = (self.canvas_width as f32 / self.grid_scale).ceil().max(1.0) as usize;
        let h = (self.canvas_height as f32 / self.grid_scale).ceil().max(1.0) as usize;
        (w + 1, h + 1)
    }
}

//! Incremental rendering pipeline: events, the frame cache, time-sliced jobs,
//! and the engine facade that owns them.
use glam::Vec2;

use crate::config::FieldConfig;
use crate::field::color::{colorize, Rgb};
use crate::field::grid::DistanceGrid;
use crate::field::mask::InteriorMask;
use crate::field::temperature;

pub mod cache;
pub mod engine;
pub mod events;
pub mod image;
pub mod job;

pub use image::FieldImage;

/// A completed render: the inputs' fingerprint, the per-sensor distance grids,
/// the interior mask, and the colorized image.
///
/// Frames are immutable once built and shared as `Arc<FieldFrame>` between the
/// cache, the engine's applied state, and completion events.
#[derive(Debug)]
pub struct FieldFrame {
    /// Configuration this frame was computed from.
    pub config: FieldConfig,
    /// Fingerprint of that configuration.
    pub fingerprint: u64,
    /// Distance grids parallel to `config.sensors`; `None` where the sensor
    /// had no usable reading this cycle.
    pub grids: Vec<Option<DistanceGrid>>,
    /// Interior/exterior classification.
    pub mask: InteriorMask,
    /// Colorized RGBA output.
    pub image: FieldImage,
}

impl FieldFrame {
    /// Whether a pixel should be rendered at all.
    pub fn is_interior(&self, x: f32, y: f32) -> bool {
        self.mask.is_interior(x, y)
    }

    /// Temperature estimate at a pixel. Only meaningful where
    /// [`FieldFrame::is_interior`] is true.
    pub fn field_value(&self, x: f32, y: f32) -> f32 {
        temperature::field_value(
            Vec2::new(x, y),
            &self.config.sensors,
            &self.grids,
            &self.config,
        )
    }

    /// Final pixel color for a temperature, using this frame's comfort zone.
    pub fn colorize(&self, temperature: f32) -> Rgb {
        colorize(temperature, self.config.comfort_min, self.config.comfort_max)
    }
}

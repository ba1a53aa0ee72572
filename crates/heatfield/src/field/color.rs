//! Comfort-zone color gradient.
//!
//! Maps a temperature scalar to RGB: blues below the comfort zone, a
//! blue-green to green to yellow ramp inside it, and oranges into dark red
//! above it. Fixed transition bands on both sides of the comfort zone keep the
//! mapping continuous at every band boundary.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Width of the transition bands just outside the comfort zone, in °C.
const TRANSITION_BAND: f32 = 2.0;
/// Span of the deep-cold gradient below the lower transition band, in °C.
const COLD_RANGE: f32 = 10.0;
/// Span of the deep-warm gradient above the upper transition band, in °C.
const WARM_RANGE: f32 = 10.0;
/// Normalized breakpoint splitting the comfort zone's two sub-gradients.
const COMFORT_BREAK: f32 = 0.3;

const DEEP_COLD: (f32, f32, f32) = (15.0, 20.0, 90.0);
const COLD_EDGE: (f32, f32, f32) = (50.0, 120.0, 230.0);
const COMFORT_LOW: (f32, f32, f32) = (70.0, 190.0, 190.0);
const COMFORT_MID: (f32, f32, f32) = (80.0, 200.0, 120.0);
const COMFORT_HIGH: (f32, f32, f32) = (240.0, 220.0, 70.0);
const WARM_EDGE: (f32, f32, f32) = (240.0, 120.0, 50.0);
const DEEP_WARM: (f32, f32, f32) = (130.0, 20.0, 20.0);

/// An RGB triple with channels in `0..=255`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

fn lerp_rgb(from: (f32, f32, f32), to: (f32, f32, f32), t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    Rgb {
        r: (from.0 + (to.0 - from.0) * t).round() as u8,
        g: (from.1 + (to.1 - from.1) * t).round() as u8,
        b: (from.2 + (to.2 - from.2) * t).round() as u8,
    }
}

/// Maps a temperature to a color relative to the `[comfort_min, comfort_max]`
/// comfort zone.
///
/// A degenerate zone (`comfort_max <= comfort_min`) falls back to a step
/// function at `comfort_min`: medium blue below, orange-red at or above. That
/// keeps the mapping total without dividing by a zero-width range.
pub fn colorize(temperature: f32, comfort_min: f32, comfort_max: f32) -> Rgb {
    if comfort_max <= comfort_min {
        let (r, g, b) = if temperature < comfort_min {
            COLD_EDGE
        } else {
            WARM_EDGE
        };
        return Rgb::new(r as u8, g as u8, b as u8);
    }

    let band_low = comfort_min - TRANSITION_BAND;
    let band_high = comfort_max + TRANSITION_BAND;

    if temperature < band_low {
        let t = (temperature - (band_low - COLD_RANGE)) / COLD_RANGE;
        lerp_rgb(DEEP_COLD, COLD_EDGE, t)
    } else if temperature < comfort_min {
        let t = (temperature - band_low) / TRANSITION_BAND;
        lerp_rgb(COLD_EDGE, COMFORT_LOW, t)
    } else if temperature <= comfort_max {
        let span = comfort_max - comfort_min;
        let break_temp = comfort_min + COMFORT_BREAK * span;
        if temperature <= break_temp {
            let t = (temperature - comfort_min) / (COMFORT_BREAK * span);
            lerp_rgb(COMFORT_LOW, COMFORT_MID, t)
        } else {
            let t = (temperature - break_temp) / ((1.0 - COMFORT_BREAK) * span);
            lerp_rgb(COMFORT_MID, COMFORT_HIGH, t)
        }
    } else if temperature <= band_high {
        let t = (temperature - comfort_max) / TRANSITION_BAND;
        lerp_rgb(COMFORT_HIGH, WARM_EDGE, t)
    } else {
        let t = (temperature - band_high) / WARM_RANGE;
        lerp_rgb(WARM_EDGE, DEEP_WARM, t)
    }
}

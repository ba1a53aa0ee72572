#![forbid(unsafe_code)]
//! heatfield: wall-aware temperature field rendering for 2D floor plans.
//!
//! Modules:
//! - config: walls, sensors, and the tunable field configuration
//! - field: geometry, distance grids, interior mask, blending, color mapping
//! - render: time-sliced jobs, events, frame cache, and the engine facade
//!
//! The engine approximates heat spread with obstacle-aware geodesic distance
//! and exponential decay; it does not solve a heat-equation PDE.
pub mod config;
pub mod error;
pub mod field;
pub mod render;

/// Convenient re-exports for common types. Import with `use heatfield::prelude::*;`.
pub mod prelude {
    pub use crate::config::{FieldConfig, Sensor, Wall};
    pub use crate::error::{Error, Result};
    pub use crate::field::builder::build_distance_grid;
    pub use crate::field::color::{colorize, Rgb};
    pub use crate::field::grid::DistanceGrid;
    pub use crate::field::mask::{build_interior_mask, InteriorMask};
    pub use crate::field::temperature::field_value;
    pub use crate::render::cache::{fingerprint, FrameCache, DEFAULT_CACHE_CAPACITY};
    pub use crate::render::engine::{EngineStats, FieldEngine};
    pub use crate::render::events::{EventSink, FnSink, RenderEvent, RenderEventKind, VecSink};
    pub use crate::render::job::{CancelHandle, JobStatus, RenderJob, DEFAULT_SLICE_BUDGET};
    pub use crate::render::{FieldFrame, FieldImage};
}

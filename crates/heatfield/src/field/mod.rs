//! Spatial field subsystem: geometry primitives, wall-aware distance grids,
//! the interior mask, temperature blending, and color mapping.
pub mod builder;
pub mod color;
pub mod geometry;
pub mod grid;
pub mod mask;
pub mod temperature;

pub use builder::build_distance_grid;
pub use color::{colorize, Rgb};
pub use grid::DistanceGrid;
pub use mask::{build_interior_mask, InteriorMask};
pub use temperature::field_value;

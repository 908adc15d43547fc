//! Georeferencing and view-window math.

pub mod extent;
pub mod transform;
pub mod viewport;

pub use extent::Extent;
pub use transform::GeoTransform;
pub use viewport::{zoom_range, Viewport};

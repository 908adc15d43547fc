//! Core of GeoPoint Logger: point layers, georeferenced overlays and the
//! record-and-advance workflow.
//!
//! Shapefile and image decoding are delegated to the `shapefile` and
//! `image` crates; this crate adds the attribute table, world-file
//! georeferencing, view-window math and the cursor that walks the points.

pub mod config;
pub mod data;
pub mod geo;
pub mod imaging;
pub mod io;
pub mod prelude;
pub mod telemetry;
pub mod workflow;

pub use config::LoggerConfig;
pub use prelude::{AttributeValue, Coordinate, CoreError, CoreResult};
pub use workflow::{Recenter, StepOutcome, WorkflowController};

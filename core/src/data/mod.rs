//! In-memory point layer, attribute table and overlay layers.

pub mod feature;
pub mod layer;
pub mod layers;
pub mod raster;
pub mod table;

pub use feature::PointFeature;
pub use layer::PointLayer;
pub use layers::{LayerEntry, LayerKind, LayerList};
pub use raster::ImageLayer;
pub use table::{AttributeTable, ColumnDef, ColumnKind};

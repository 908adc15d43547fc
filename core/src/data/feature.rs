use crate::prelude::Coordinate;
use serde::{Deserialize, Serialize};

/// A loggable map location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointFeature {
    /// Record number in the source file, stable for the lifetime of the layer.
    pub fid: usize,
    /// Identifier used by "go to"; the key column's value or the record number.
    pub key: String,
    /// Point location, or the vertex centroid for non-point shapes.
    pub coord: Coordinate,
}

impl PointFeature {
    pub fn new(fid: usize, key: impl Into<String>, coord: Coordinate) -> Self {
        Self {
            fid,
            key: key.into(),
            coord,
        }
    }

    /// Feature keyed by its record number.
    pub fn numbered(fid: usize, coord: Coordinate) -> Self {
        Self::new(fid, fid.to_string(), coord)
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Map-space coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single cell of the attribute table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum AttributeValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl AttributeValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Text form used for display and for key matching.
    pub fn as_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Null => Ok(()),
            AttributeValue::Bool(value) => write!(f, "{}", if *value { "T" } else { "F" }),
            AttributeValue::Int(value) => write!(f, "{value}"),
            AttributeValue::Float(value) => write!(f, "{value}"),
            AttributeValue::Text(value) => f.write_str(value),
        }
    }
}

/// Common error type for loading, editing and navigating point layers.
#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("shapefile error: {0}")]
    Shapefile(#[from] shapefile::Error),
    #[error("attribute table error: {0}")]
    Dbase(#[from] shapefile::dbase::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("world file {path}: {reason}")]
    WorldFile { path: PathBuf, reason: String },
    #[error("no point data loaded")]
    NoData,
    #[error("index {index} is out of range (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("id {0} not found")]
    IdNotFound(String),
    #[error("no '{0}' column found in data")]
    ColumnNotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("attribute table has {rows} rows but layer has {points} points")]
    TableMismatch { rows: usize, points: usize },
    #[error("configuration error: {0}")]
    Config(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_values_render_like_table_cells() {
        assert_eq!(AttributeValue::Null.to_string(), "");
        assert_eq!(AttributeValue::Float(10.0).to_string(), "10");
        assert_eq!(AttributeValue::Float(2.5).to_string(), "2.5");
        assert_eq!(AttributeValue::Bool(true).to_string(), "T");
        assert_eq!(AttributeValue::Text("A-12".into()).to_string(), "A-12");
    }

    #[test]
    fn error_messages_are_status_ready() {
        let err = CoreError::ColumnNotFound("ID".into());
        assert_eq!(err.to_string(), "no 'ID' column found in data");
        let err = CoreError::IdNotFound("42".into());
        assert_eq!(err.to_string(), "id 42 not found");
    }
}

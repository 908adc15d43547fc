use crate::data::{AttributeTable, ColumnDef, PointFeature};
use crate::geo::Extent;
use crate::prelude::{AttributeValue, CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Ordered point features with their attribute rows.
///
/// Row `i` of the table always belongs to feature `i`.
#[derive(Debug, Clone, Default)]
pub struct PointLayer {
    source: Option<PathBuf>,
    features: Vec<PointFeature>,
    table: AttributeTable,
    key_column: Option<usize>,
}

impl PointLayer {
    pub fn new(features: Vec<PointFeature>, table: AttributeTable) -> CoreResult<Self> {
        if table.row_count() != features.len() {
            return Err(CoreError::TableMismatch {
                rows: table.row_count(),
                points: features.len(),
            });
        }
        Ok(Self {
            source: None,
            features,
            table,
            key_column: None,
        })
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn features(&self) -> &[PointFeature] {
        &self.features
    }

    pub fn feature(&self, index: usize) -> Option<&PointFeature> {
        self.features.get(index)
    }

    pub fn table(&self) -> &AttributeTable {
        &self.table
    }

    /// Store `input` into the named column of row `index`.
    pub fn set_value(&mut self, index: usize, column: &str, input: &str) -> CoreResult<AttributeValue> {
        let col = self.table.require_column(column)?;
        self.set_cell_text(index, col, input)
    }

    /// Table-editor entry point: parse and store text into a cell by position.
    pub fn set_cell_text(&mut self, index: usize, col: usize, input: &str) -> CoreResult<AttributeValue> {
        if index >= self.features.len() {
            return Err(CoreError::IndexOutOfRange {
                index,
                len: self.features.len(),
            });
        }
        let value = self.table.set_from_text(index, col, input)?;
        self.refresh_key(index, col);
        Ok(value)
    }

    /// Recompute every feature key from `key_column`, or from the record number when `None`.
    pub fn rekey(&mut self, key_column: Option<&str>) -> CoreResult<()> {
        match key_column {
            Some(name) => {
                let col = self.table.require_column(name)?;
                for (idx, feature) in self.features.iter_mut().enumerate() {
                    feature.key = self
                        .table
                        .cell(idx, col)
                        .map(|v| v.as_text().trim().to_string())
                        .unwrap_or_default();
                }
                self.key_column = Some(col);
            }
            None => {
                for feature in &mut self.features {
                    feature.key = feature.fid.to_string();
                }
                self.key_column = None;
            }
        }
        Ok(())
    }

    fn refresh_key(&mut self, index: usize, col: usize) {
        if self.key_column != Some(col) {
            return;
        }
        if let (Some(feature), Some(value)) = (self.features.get_mut(index), self.table.cell(index, col)) {
            feature.key = value.as_text().trim().to_string();
        }
    }

    /// Append an empty attribute column; returns its index.
    pub fn add_column(&mut self, def: ColumnDef) -> CoreResult<usize> {
        self.table.add_column(def)
    }

    /// First feature whose key equals `key` after trimming.
    pub fn position_of_key(&self, key: &str) -> Option<usize> {
        let key = key.trim();
        self.features.iter().position(|f| f.key == key)
    }

    pub fn extent(&self) -> Option<Extent> {
        Extent::from_coordinates(self.features.iter().map(|f| &f.coord))
    }

    /// Indices of features lying outside `bounds`.
    pub fn outside(&self, bounds: &Extent) -> Vec<usize> {
        self.features
            .iter()
            .enumerate()
            .filter(|(_, f)| !bounds.contains(&f.coord))
            .map(|(idx, _)| idx)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::Coordinate;

    fn layer() -> PointLayer {
        let mut table = AttributeTable::new(vec![ColumnDef::text("name", 10), ColumnDef::text("ID", 10)]);
        let mut features = Vec::new();
        for (idx, name) in ["a", "b", "c"].iter().enumerate() {
            table
                .push_row(vec![AttributeValue::Text(name.to_string()), AttributeValue::Null])
                .unwrap();
            features.push(PointFeature::numbered(idx, Coordinate::new(idx as f64, idx as f64 * 2.0)));
        }
        PointLayer::new(features, table).unwrap()
    }

    #[test]
    fn mismatched_table_is_rejected() {
        let table = AttributeTable::new(vec![ColumnDef::text("ID", 10)]);
        let features = vec![PointFeature::numbered(0, Coordinate::new(0.0, 0.0))];
        assert!(matches!(
            PointLayer::new(features, table),
            Err(CoreError::TableMismatch { rows: 0, points: 1 })
        ));
    }

    #[test]
    fn keys_follow_key_column() {
        let mut layer = layer();
        assert_eq!(layer.position_of_key("2"), Some(2));
        layer.rekey(Some("name")).unwrap();
        assert_eq!(layer.position_of_key(" b "), Some(1));
        assert_eq!(layer.position_of_key("2"), None);

        layer.set_value(1, "NAME", "zz").unwrap();
        assert_eq!(layer.position_of_key("zz"), Some(1));

        layer.rekey(None).unwrap();
        assert_eq!(layer.position_of_key("0"), Some(0));
        assert!(layer.rekey(Some("nope")).is_err());
    }

    #[test]
    fn set_value_checks_row_bounds() {
        let mut layer = layer();
        assert!(matches!(
            layer.set_value(3, "ID", "x"),
            Err(CoreError::IndexOutOfRange { index: 3, len: 3 })
        ));
        layer.set_value(2, "id", "x").unwrap();
        assert_eq!(layer.table().value(2, "ID"), Some(&AttributeValue::Text("x".into())));
    }

    #[test]
    fn outside_reports_points_beyond_bounds() {
        let layer = layer();
        let bounds = Extent::new(0.0, 0.0, 1.5, 3.0);
        assert_eq!(layer.outside(&bounds), vec![2]);
        assert_eq!(layer.extent(), Some(Extent::new(0.0, 0.0, 2.0, 4.0)));
    }
}

//! Point layers read from and written to ESRI shapefiles.

use crate::data::table::{format_date, parse_date};
use crate::data::{AttributeTable, ColumnDef, ColumnKind, PointFeature, PointLayer};
use crate::prelude::{AttributeValue, Coordinate, CoreError, CoreResult};
use log::{info, warn};
use shapefile::dbase::{self, FieldName, FieldType, FieldValue, TableWriterBuilder};
use shapefile::{Point, Shape};
use std::collections::HashMap;
use std::convert::TryFrom;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// dBase always reports this pseudo-field first in some versions; it is not user data.
const DELETION_FLAG: &str = "DeletionFlag";
/// Widest character or numeric field a dBase header can describe.
const MAX_FIELD_WIDTH: usize = 254;
/// Most fraction digits written for a number column.
const MAX_DECIMALS: usize = 15;
/// Whole numbers above this lose precision as f64 and stay floats.
const MAX_EXACT_WHOLE: f64 = 9.0e15;

/// Load a shapefile as an ordered point layer.
///
/// Non-point shapes are reduced to the centroid of their vertices; null
/// shapes are rejected. When `key_column` is set, feature keys come from
/// that column instead of the record number.
pub fn load_point_layer(path: &Path, key_column: Option<&str>) -> CoreResult<PointLayer> {
    let shapes = shapefile::read_shapes(path)?;

    let dbf_path = path.with_extension("dbf");
    let decimals = field_decimals(&dbf_path)?;
    let mut reader = dbase::Reader::from_path(&dbf_path)?;
    let fields: Vec<(String, FieldType, u8)> = reader
        .fields()
        .iter()
        .filter(|f| f.name() != DELETION_FLAG)
        .map(|f| (f.name().to_string(), f.field_type(), f.length()))
        .collect();
    let records = reader.read()?;

    if records.len() != shapes.len() {
        return Err(CoreError::TableMismatch {
            rows: records.len(),
            points: shapes.len(),
        });
    }

    let mut rows = Vec::with_capacity(records.len());
    for record in &records {
        let row: Vec<AttributeValue> = fields
            .iter()
            .map(|(name, _, _)| record.get(name).map(field_to_value).unwrap_or_default())
            .collect();
        rows.push(row);
    }

    let mut columns = Vec::with_capacity(fields.len());
    for (col, (name, field_type, length)) in fields.iter().enumerate() {
        let places = decimals.get(name).copied().unwrap_or(0);
        let column = column_def(name, *field_type, *length, places, &rows, col);
        if column.kind == ColumnKind::Integer {
            for cell in rows.iter_mut().filter_map(|row| row.get_mut(col)) {
                if let AttributeValue::Float(v) = *cell {
                    *cell = AttributeValue::Int(v as i64);
                }
            }
        }
        columns.push(column);
    }

    let mut table = AttributeTable::new(columns);
    for row in rows {
        table.push_row(row)?;
    }

    let mut features = Vec::with_capacity(shapes.len());
    for (fid, shape) in shapes.iter().enumerate() {
        let coord = anchor(shape).ok_or_else(|| {
            CoreError::InvalidInput(format!("feature {} has no usable point geometry", fid))
        })?;
        features.push(PointFeature::numbered(fid, coord));
    }

    let mut layer = PointLayer::new(features, table)?.with_source(path);
    if key_column.is_some() {
        layer.rekey(key_column)?;
    }
    info!(
        "loaded {} with {} features and {} columns",
        path.display(),
        layer.len(),
        layer.table().column_count()
    );
    Ok(layer)
}

/// Write the layer as a point shapefile (plus `.dbf` and `.shx`) with the same columns.
///
/// Character and numeric fields grow to fit the widest value so nothing is
/// cropped on disk; a value wider than dBase allows is an error.
pub fn save_point_layer(layer: &PointLayer, path: &Path) -> CoreResult<()> {
    let table = layer.table();
    let mut builder = TableWriterBuilder::new();
    for (col, column) in table.columns().iter().enumerate() {
        let name = FieldName::try_from(column.name.as_str()).map_err(|e| {
            CoreError::InvalidInput(format!("column name '{}' is not valid in dBase: {:?}", column.name, e))
        })?;
        builder = match column.kind {
            ColumnKind::Text => builder.add_character_field(name, text_width(table, col, column)?),
            ColumnKind::Number => {
                let (width, decimals) = number_layout(table, col, column)?;
                builder.add_numeric_field(name, width, decimals)
            }
            ColumnKind::Integer => builder.add_numeric_field(name, integer_width(table, col, column)?, 0),
            ColumnKind::Bool => builder.add_logical_field(name),
            ColumnKind::Date => builder.add_date_field(name),
        };
    }

    let mut writer = shapefile::Writer::from_path(path, builder)?;
    for (idx, feature) in layer.features().iter().enumerate() {
        let mut record = dbase::Record::default();
        for (col, column) in table.columns().iter().enumerate() {
            let value = table.cell(idx, col).cloned().unwrap_or_default();
            record.insert(column.name.clone(), value_to_field(column, &value));
        }
        let point = Point::new(feature.coord.x, feature.coord.y);
        writer.write_shape_and_record(&point, &record)?;
    }
    drop(writer);

    info!("saved {} features to {}", layer.len(), path.display());
    Ok(())
}

/// Decimal places of each field, read from the `.dbf` header.
///
/// The dBase reader only exposes name, type and length, so the descriptors
/// are read directly: a u16 header length at byte 8, then 32-byte field
/// descriptors from byte 32 up to the 0x0D terminator.
fn field_decimals(dbf_path: &Path) -> CoreResult<HashMap<String, u8>> {
    let mut file = File::open(dbf_path)?;
    let mut prefix = [0u8; 32];
    file.read_exact(&mut prefix)?;
    let header_len = u16::from_le_bytes([prefix[8], prefix[9]]) as usize;
    let mut descriptors = vec![0u8; header_len.saturating_sub(prefix.len())];
    file.read_exact(&mut descriptors)?;

    let mut decimals = HashMap::new();
    for descriptor in descriptors.chunks_exact(32) {
        if descriptor[0] == 0x0D {
            break;
        }
        let name_len = descriptor[..11].iter().position(|b| *b == 0).unwrap_or(11);
        let name = String::from_utf8_lossy(&descriptor[..name_len]).trim().to_string();
        decimals.insert(name, descriptor[17]);
    }
    Ok(decimals)
}

fn column_values<'a>(table: &'a AttributeTable, col: usize) -> impl Iterator<Item = (usize, &'a AttributeValue)> {
    table.rows().enumerate().filter_map(move |(row, cells)| cells.get(col).map(|cell| (row, cell)))
}

fn fit_width(column: &ColumnDef, row: usize, len: usize) -> CoreResult<u8> {
    u8::try_from(len)
        .ok()
        .filter(|width| usize::from(*width) <= MAX_FIELD_WIDTH)
        .ok_or_else(|| {
            CoreError::InvalidInput(format!(
                "value in row {} of column '{}' needs {} characters, dBase fields hold at most {}",
                row, column.name, len, MAX_FIELD_WIDTH
            ))
        })
}

fn text_width(table: &AttributeTable, col: usize, column: &ColumnDef) -> CoreResult<u8> {
    let mut width = column.width.max(1);
    for (row, value) in column_values(table, col) {
        let len = value.as_text().len();
        if len > usize::from(width) {
            width = fit_width(column, row, len)?;
        }
    }
    Ok(width)
}

fn numeric_value(value: &AttributeValue) -> Option<f64> {
    match value {
        AttributeValue::Int(v) => Some(*v as f64),
        AttributeValue::Float(v) => Some(*v),
        AttributeValue::Text(text) => text.trim().parse::<f64>().ok(),
        AttributeValue::Bool(_) | AttributeValue::Null => None,
    }
    .filter(|v| v.is_finite())
}

fn number_layout(table: &AttributeTable, col: usize, column: &ColumnDef) -> CoreResult<(u8, u8)> {
    let numbers: Vec<(usize, f64)> = column_values(table, col)
        .filter_map(|(row, value)| numeric_value(value).map(|v| (row, v)))
        .collect();

    let needed = numbers
        .iter()
        .map(|(_, v)| v.to_string().split_once('.').map_or(0, |(_, fraction)| fraction.len()))
        .max()
        .unwrap_or(0);
    let decimals = usize::from(column.decimals).max(needed).min(MAX_DECIMALS);

    let mut width = column.width.max(1);
    for (row, v) in &numbers {
        let len = format!("{:.*}", decimals, v).len();
        if len > usize::from(width) {
            width = fit_width(column, *row, len)?;
        }
    }
    // room for the integer digit and point in front of the fraction
    if decimals > 0 && usize::from(width) < decimals + 2 {
        width = (decimals + 2) as u8;
    }
    Ok((width, decimals as u8))
}

fn integer_width(table: &AttributeTable, col: usize, column: &ColumnDef) -> CoreResult<u8> {
    let mut width = column.width.max(1);
    for (row, value) in column_values(table, col) {
        if let Some(v) = numeric_value(value) {
            let len = format!("{:.0}", v).len();
            if len > usize::from(width) {
                width = fit_width(column, row, len)?;
            }
        }
    }
    Ok(width)
}

fn anchor(shape: &Shape) -> Option<Coordinate> {
    let points: Vec<(f64, f64)> = match shape {
        Shape::NullShape => return None,
        Shape::Point(p) => return Some(Coordinate::new(p.x, p.y)),
        Shape::PointM(p) => return Some(Coordinate::new(p.x, p.y)),
        Shape::PointZ(p) => return Some(Coordinate::new(p.x, p.y)),
        Shape::Multipoint(mp) => mp.points().iter().map(|p| (p.x, p.y)).collect(),
        Shape::MultipointM(mp) => mp.points().iter().map(|p| (p.x, p.y)).collect(),
        Shape::MultipointZ(mp) => mp.points().iter().map(|p| (p.x, p.y)).collect(),
        Shape::Polyline(line) => line.parts().iter().flatten().map(|p| (p.x, p.y)).collect(),
        Shape::PolylineM(line) => line.parts().iter().flatten().map(|p| (p.x, p.y)).collect(),
        Shape::PolylineZ(line) => line.parts().iter().flatten().map(|p| (p.x, p.y)).collect(),
        Shape::Polygon(poly) => poly
            .rings()
            .iter()
            .flat_map(|ring| open_ring(ring.points()))
            .map(|p| (p.x, p.y))
            .collect(),
        Shape::PolygonM(poly) => poly
            .rings()
            .iter()
            .flat_map(|ring| open_ring(ring.points()))
            .map(|p| (p.x, p.y))
            .collect(),
        Shape::PolygonZ(poly) => poly
            .rings()
            .iter()
            .flat_map(|ring| open_ring(ring.points()))
            .map(|p| (p.x, p.y))
            .collect(),
        // 3D surfaces have no sensible anchor for point logging
        Shape::Multipatch(_) => return None,
    };
    vertex_centroid(&points)
}

/// Ring vertices without the closing repeat of the first point.
fn open_ring<P: PartialEq>(points: &[P]) -> &[P] {
    match points.split_last() {
        Some((last, rest)) if !rest.is_empty() && rest.first() == Some(last) => rest,
        _ => points,
    }
}

fn vertex_centroid(points: &[(f64, f64)]) -> Option<Coordinate> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(ax, ay), (x, y)| (ax + x, ay + y));
    Some(Coordinate::new(sx / n, sy / n))
}

fn field_to_value(field: &FieldValue) -> AttributeValue {
    match field {
        FieldValue::Character(Some(text)) if !text.trim().is_empty() => {
            AttributeValue::Text(text.trim().to_string())
        }
        FieldValue::Memo(text) if !text.trim().is_empty() => AttributeValue::Text(text.clone()),
        FieldValue::Numeric(Some(number)) => AttributeValue::Float(*number),
        FieldValue::Float(Some(number)) => AttributeValue::Float(*number as f64),
        FieldValue::Double(number) => AttributeValue::Float(*number),
        FieldValue::Currency(number) => AttributeValue::Float(*number),
        FieldValue::Integer(number) => AttributeValue::Int(*number as i64),
        FieldValue::Logical(Some(flag)) => AttributeValue::Bool(*flag),
        FieldValue::Date(Some(date)) => AttributeValue::Text(format_date(date.year(), date.month(), date.day())),
        FieldValue::DateTime(stamp) => {
            let (date, time) = (stamp.date(), stamp.time());
            AttributeValue::Text(format!(
                "{} {:02}:{:02}:{:02}",
                format_date(date.year(), date.month(), date.day()),
                time.hours(),
                time.minutes(),
                time.seconds()
            ))
        }
        FieldValue::Character(_)
        | FieldValue::Memo(_)
        | FieldValue::Numeric(None)
        | FieldValue::Float(None)
        | FieldValue::Logical(None)
        | FieldValue::Date(None) => AttributeValue::Null,
    }
}

fn is_whole(value: &AttributeValue) -> bool {
    match value {
        AttributeValue::Float(v) => v.fract() == 0.0 && v.abs() <= MAX_EXACT_WHOLE,
        AttributeValue::Int(_) | AttributeValue::Null => true,
        AttributeValue::Bool(_) | AttributeValue::Text(_) => false,
    }
}

fn column_def(
    name: &str,
    field_type: FieldType,
    length: u8,
    decimals: u8,
    rows: &[Vec<AttributeValue>],
    col: usize,
) -> ColumnDef {
    let cells = move || rows.iter().filter_map(move |row| row.get(col));
    match field_type {
        FieldType::Logical => ColumnDef::boolean(name),
        FieldType::Integer => ColumnDef::integer(name),
        FieldType::Date => ColumnDef::date(name),
        FieldType::Numeric | FieldType::Float if decimals == 0 && cells().all(is_whole) => ColumnDef {
            width: length.max(1),
            ..ColumnDef::integer(name)
        },
        FieldType::Numeric | FieldType::Float => {
            let fractional = cells().any(|cell| !is_whole(cell));
            let places = if decimals == 0 && fractional { 6 } else { decimals };
            ColumnDef::number(name, length.max(1), places)
        }
        FieldType::Double | FieldType::Currency => {
            let fractional = cells().any(|cell| !is_whole(cell));
            ColumnDef::number(name, 19, if fractional { 6 } else { decimals })
        }
        FieldType::DateTime => ColumnDef::text(name, 19),
        FieldType::Character | FieldType::Memo => {
            let longest = cells().map(|cell| cell.as_text().len()).max().unwrap_or(0);
            let width = usize::from(if length == 0 { 1 } else { length })
                .max(longest)
                .min(MAX_FIELD_WIDTH);
            ColumnDef::text(name, width as u8)
        }
    }
}

fn value_to_field(column: &ColumnDef, value: &AttributeValue) -> FieldValue {
    match column.kind {
        ColumnKind::Text => FieldValue::Character(match value {
            AttributeValue::Null => None,
            other => Some(other.as_text()),
        }),
        ColumnKind::Number | ColumnKind::Integer => FieldValue::Numeric(numeric_value(value)),
        ColumnKind::Bool => FieldValue::Logical(match value {
            AttributeValue::Bool(flag) => Some(*flag),
            _ => None,
        }),
        ColumnKind::Date => FieldValue::Date(match value {
            AttributeValue::Null => None,
            other => {
                let parsed = parse_date(&other.as_text());
                if parsed.is_none() {
                    warn!("'{}' in column {} is not a date; writing it empty", other, column.name);
                }
                parsed.map(|(year, month, day)| dbase::Date::new(day, month, year))
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapefile::{Polygon, PolygonRing, Polyline};
    use tempfile::tempdir;

    fn sample_layer() -> PointLayer {
        let mut table = AttributeTable::new(vec![
            ColumnDef::text("name", 20),
            ColumnDef::number("value", 10, 2),
            ColumnDef::text("ID", 20),
        ]);
        let mut features = Vec::new();
        for idx in 0..3 {
            table
                .push_row(vec![
                    AttributeValue::Text(format!("Point {}", idx)),
                    AttributeValue::Float(idx as f64 * 2.5),
                    AttributeValue::Null,
                ])
                .unwrap();
            features.push(PointFeature::numbered(
                idx,
                Coordinate::new(250_000.0 + idx as f64, 600_000.0 + idx as f64),
            ));
        }
        PointLayer::new(features, table).unwrap()
    }

    fn single_column_layer(column: ColumnDef, values: Vec<AttributeValue>) -> PointLayer {
        let mut table = AttributeTable::new(vec![column]);
        let mut features = Vec::new();
        for (idx, value) in values.into_iter().enumerate() {
            table.push_row(vec![value]).unwrap();
            features.push(PointFeature::numbered(idx, Coordinate::new(idx as f64, 0.0)));
        }
        PointLayer::new(features, table).unwrap()
    }

    fn reload(layer: &PointLayer) -> PointLayer {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layer.shp");
        save_point_layer(layer, &path).unwrap();
        load_point_layer(&path, None).unwrap()
    }

    #[test]
    fn saved_layer_loads_with_same_order_and_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("points.shp");
        let mut layer = sample_layer();
        layer.set_value(1, "ID", "A-17").unwrap();
        save_point_layer(&layer, &path).unwrap();

        let loaded = load_point_layer(&path, None).unwrap();
        assert_eq!(loaded.len(), 3);
        let names: Vec<_> = loaded.table().column_names().collect();
        assert_eq!(names, ["name", "value", "ID"]);
        assert_eq!(loaded.features()[2].coord, Coordinate::new(250_002.0, 600_002.0));
        assert_eq!(
            loaded.table().value(1, "ID"),
            Some(&AttributeValue::Text("A-17".into()))
        );
        assert_eq!(loaded.table().value(0, "ID"), Some(&AttributeValue::Null));
        assert_eq!(loaded.table().value(1, "value"), Some(&AttributeValue::Float(2.5)));
        assert_eq!(loaded.table().columns()[1].kind, ColumnKind::Number);
    }

    #[test]
    fn text_longer_than_the_field_is_kept_whole() {
        let long = "ABCDEFGHIJKLMNOPQRSTUVWXYZ-0123456789";
        let mut layer = sample_layer();
        layer.set_value(2, "ID", long).unwrap();

        let loaded = reload(&layer);
        assert_eq!(loaded.table().value(2, "ID"), Some(&AttributeValue::Text(long.into())));
        assert!(loaded.table().columns()[2].width as usize >= long.len());
    }

    #[test]
    fn text_beyond_dbase_limit_is_rejected() {
        let dir = tempdir().unwrap();
        let mut layer = sample_layer();
        layer.set_value(0, "name", &"x".repeat(300)).unwrap();

        let err = save_point_layer(&layer, &dir.path().join("wide.shp")).unwrap_err();
        match err {
            CoreError::InvalidInput(msg) => assert!(msg.contains("'name'"), "{}", msg),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn integer_column_reloads_as_integer() {
        let layer = single_column_layer(
            ColumnDef::integer("count"),
            vec![AttributeValue::Int(7), AttributeValue::Int(-1234), AttributeValue::Null],
        );

        let loaded = reload(&layer);
        assert_eq!(loaded.table().columns()[0].kind, ColumnKind::Integer);
        assert_eq!(loaded.table().value(0, "count"), Some(&AttributeValue::Int(7)));
        assert_eq!(loaded.table().value(1, "count"), Some(&AttributeValue::Int(-1234)));
        assert_eq!(loaded.table().value(2, "count"), Some(&AttributeValue::Null));
    }

    #[test]
    fn number_decimals_grow_to_fit_values() {
        let layer = single_column_layer(
            ColumnDef::number("depth", 4, 0),
            vec![AttributeValue::Float(1.125), AttributeValue::Float(123456.5)],
        );

        let loaded = reload(&layer);
        assert_eq!(loaded.table().columns()[0].kind, ColumnKind::Number);
        assert_eq!(loaded.table().value(0, "depth"), Some(&AttributeValue::Float(1.125)));
        assert_eq!(loaded.table().value(1, "depth"), Some(&AttributeValue::Float(123456.5)));
    }

    #[test]
    fn date_and_logical_fields_map_to_their_kinds() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("typed.shp");
        let builder = TableWriterBuilder::new()
            .add_date_field(FieldName::try_from("when").unwrap())
            .add_logical_field(FieldName::try_from("ok").unwrap())
            .add_numeric_field(FieldName::try_from("n").unwrap(), 5, 0);
        let mut writer = shapefile::Writer::from_path(&path, builder).unwrap();
        for (idx, (date, ok)) in [(Some(dbase::Date::new(2, 3, 2021)), Some(true)), (None, Some(false))]
            .into_iter()
            .enumerate()
        {
            let mut record = dbase::Record::default();
            record.insert("when".to_string(), FieldValue::Date(date));
            record.insert("ok".to_string(), FieldValue::Logical(ok));
            record.insert("n".to_string(), FieldValue::Numeric(Some(idx as f64 + 40.0)));
            writer
                .write_shape_and_record(&Point::new(idx as f64, 1.0), &record)
                .unwrap();
        }
        drop(writer);

        let loaded = load_point_layer(&path, None).unwrap();
        let kinds: Vec<_> = loaded.table().columns().iter().map(|c| c.kind).collect();
        assert_eq!(kinds, [ColumnKind::Date, ColumnKind::Bool, ColumnKind::Integer]);
        assert_eq!(
            loaded.table().value(0, "when"),
            Some(&AttributeValue::Text("2021-03-02".into()))
        );
        assert_eq!(loaded.table().value(1, "when"), Some(&AttributeValue::Null));
        assert_eq!(loaded.table().value(1, "ok"), Some(&AttributeValue::Bool(false)));
        assert_eq!(loaded.table().value(1, "n"), Some(&AttributeValue::Int(41)));

        let mut edited = loaded;
        edited.set_value(1, "when", "20221231").unwrap();
        let again = reload(&edited);
        assert_eq!(again.table().columns()[0].kind, ColumnKind::Date);
        assert_eq!(
            again.table().value(0, "when"),
            Some(&AttributeValue::Text("2021-03-02".into()))
        );
        assert_eq!(
            again.table().value(1, "when"),
            Some(&AttributeValue::Text("2022-12-31".into()))
        );
    }

    #[test]
    fn polyline_features_load_at_their_vertex_centroid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lines.shp");
        let builder = TableWriterBuilder::new().add_character_field(FieldName::try_from("name").unwrap(), 10);
        let mut writer = shapefile::Writer::from_path(&path, builder).unwrap();
        let line = Polyline::new(vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(4.0, 3.0)]);
        let mut record = dbase::Record::default();
        record.insert("name".to_string(), FieldValue::Character(Some("road".into())));
        writer.write_shape_and_record(&line, &record).unwrap();
        drop(writer);

        let loaded = load_point_layer(&path, None).unwrap();
        assert_eq!(loaded.len(), 1);
        let coord = loaded.features()[0].coord;
        assert!((coord.x - 8.0 / 3.0).abs() < 1e-9);
        assert!((coord.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn polygon_anchor_skips_closing_vertex() {
        let square = Polygon::new(PolygonRing::Outer(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 4.0),
            Point::new(4.0, 4.0),
            Point::new(4.0, 0.0),
        ]));
        assert_eq!(square.rings()[0].points().len(), 5);
        assert_eq!(anchor(&Shape::Polygon(square)), Some(Coordinate::new(2.0, 2.0)));
    }

    #[test]
    fn null_shapes_have_no_anchor() {
        assert_eq!(anchor(&Shape::NullShape), None);
    }

    #[test]
    fn key_column_drives_feature_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("keyed.shp");
        save_point_layer(&sample_layer(), &path).unwrap();

        let loaded = load_point_layer(&path, Some("name")).unwrap();
        assert_eq!(loaded.position_of_key("Point 2"), Some(2));
        assert!(load_point_layer(&path, Some("missing")).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(load_point_layer(&dir.path().join("nope.shp"), None).is_err());
    }

    #[test]
    fn centroid_of_vertices() {
        let c = vertex_centroid(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]).unwrap();
        assert_eq!(c, Coordinate::new(1.0, 1.0));
        assert!(vertex_centroid(&[]).is_none());
    }
}

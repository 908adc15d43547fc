//! Sample shapefile and georeferenced image for trying the tool out.

use crate::config::DEFAULT_ID_FIELD;
use crate::data::{AttributeTable, ColumnDef, PointFeature, PointLayer};
use crate::geo::{Extent, GeoTransform};
use crate::io::{vector, world_file};
use crate::prelude::{AttributeValue, Coordinate, CoreError, CoreResult};
use image::{Rgb, RgbImage};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

pub const POINTS_FILE: &str = "test_points.shp";
pub const IMAGE_FILE: &str = "test_georef.jpg";

const BACKGROUND: Rgb<u8> = Rgb([173, 216, 230]);
const GRID: Rgb<u8> = Rgb([128, 128, 128]);
const BORDER: Rgb<u8> = Rgb([0, 0, 0]);

/// Paths produced by [`write_test_dataset`].
#[derive(Debug, Clone)]
pub struct TestDataset {
    pub points: PathBuf,
    pub image: PathBuf,
    pub world_file: PathBuf,
}

/// Point layer with `id`, `name`, `value` and an empty `ID` column to log into.
pub fn sample_point_layer(coords: &[Coordinate]) -> CoreResult<PointLayer> {
    let mut table = AttributeTable::new(vec![
        ColumnDef::integer("id"),
        ColumnDef::text("name", 32),
        ColumnDef::number("value", 10, 0),
        ColumnDef::text(DEFAULT_ID_FIELD, 32),
    ]);
    let mut features = Vec::with_capacity(coords.len());
    for (idx, coord) in coords.iter().enumerate() {
        table.push_row(vec![
            AttributeValue::Int(idx as i64 + 1),
            AttributeValue::Text(format!("Point {}", point_label(idx))),
            AttributeValue::Float(((idx + 1) * 10) as f64),
            AttributeValue::Null,
        ])?;
        features.push(PointFeature::numbered(idx, *coord));
    }
    PointLayer::new(features, table)
}

/// Spreadsheet-style label: A..Z, AA, AB, ...
fn point_label(mut idx: usize) -> String {
    let mut label = Vec::new();
    loop {
        label.push(b'A' + (idx % 26) as u8);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

/// Grid-pattern test image with a border and three coloured landmarks.
pub fn test_image(width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

    for x in (0..width).step_by(50) {
        for y in 0..height {
            img.put_pixel(x, y, GRID);
        }
    }
    for y in (0..height).step_by(50) {
        for x in 0..width {
            img.put_pixel(x, y, GRID);
        }
    }

    let inset = 10.min(width / 4).min(height / 4);
    for t in 0..2u32 {
        for x in inset..width.saturating_sub(inset) {
            for y in [inset + t, height.saturating_sub(inset + 1 + t)] {
                if y < height {
                    img.put_pixel(x, y, BORDER);
                }
            }
        }
        for y in inset..height.saturating_sub(inset) {
            for x in [inset + t, width.saturating_sub(inset + 1 + t)] {
                if x < width {
                    img.put_pixel(x, y, BORDER);
                }
            }
        }
    }

    let landmarks = [
        (0.275, 0.275, Rgb([255, 0, 0])),
        (0.525, 0.525, Rgb([0, 128, 0])),
        (0.775, 0.275, Rgb([255, 255, 0])),
    ];
    let radius = (width.min(height) as f64 * 0.025).max(2.0);
    for (fx, fy, color) in landmarks {
        let cx = fx * width as f64;
        let cy = fy * height as f64;
        for y in 0..height {
            for x in 0..width {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= radius * radius {
                    img.put_pixel(x, y, color);
                }
            }
        }
    }
    img
}

/// Write the sample points plus a test image whose world file spans `extent`.
pub fn write_test_dataset(dir: &Path, coords: &[Coordinate], extent: &Extent, image_size: u32) -> CoreResult<TestDataset> {
    if image_size == 0 {
        return Err(CoreError::InvalidInput("image size must be positive".into()));
    }
    fs::create_dir_all(dir)?;

    let points = dir.join(POINTS_FILE);
    vector::save_point_layer(&sample_point_layer(coords)?, &points)?;

    let image = dir.join(IMAGE_FILE);
    test_image(image_size, image_size).save(&image)?;

    let transform = GeoTransform::new(
        extent.min_x,
        extent.max_y,
        extent.width() / image_size as f64,
        -extent.height() / image_size as f64,
    );
    let world = image.with_extension("jgw");
    world_file::write_world_file(&world, &transform)?;

    info!(
        "wrote {} points to {} and test image {}",
        coords.len(),
        points.display(),
        image.display()
    );
    Ok(TestDataset {
        points,
        image,
        world_file: world,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{load_image_layer, load_point_layer};
    use tempfile::tempdir;

    #[test]
    fn labels_continue_past_z() {
        assert_eq!(point_label(0), "A");
        assert_eq!(point_label(25), "Z");
        assert_eq!(point_label(26), "AA");
        assert_eq!(point_label(27), "AB");
    }

    #[test]
    fn dataset_loads_back_aligned() {
        let dir = tempdir().unwrap();
        let coords: Vec<Coordinate> = (1..=5)
            .map(|i| Coordinate::new(i as f64, i as f64))
            .collect();
        let extent = Extent::new(0.0, 0.0, 6.0, 6.0);
        let dataset = write_test_dataset(dir.path(), &coords, &extent, 120).unwrap();

        let layer = load_point_layer(&dataset.points, None).unwrap();
        assert_eq!(layer.len(), 5);
        assert_eq!(layer.table().value(4, "name"), Some(&AttributeValue::Text("Point E".into())));
        assert_eq!(layer.table().value(0, "ID"), Some(&AttributeValue::Null));

        let image = load_image_layer(&dataset.image).unwrap();
        assert!(image.georeferenced);
        let bounds = image.bounds();
        assert!((bounds.max_x - 6.0).abs() < 1e-9);
        assert!(coords.iter().all(|c| bounds.contains(c)));
    }

    #[test]
    fn test_image_has_landmarks() {
        let img = test_image(400, 400);
        assert_eq!(*img.get_pixel(110, 110), Rgb([255, 0, 0]));
        assert_eq!(*img.get_pixel(210, 210), Rgb([0, 128, 0]));
        assert_eq!(*img.get_pixel(30, 30), BACKGROUND);
    }
}

//! Affine pixel-to-map transform for georeferenced images.

use crate::geo::Extent;
use crate::prelude::Coordinate;
use serde::{Deserialize, Serialize};

/// Affine transformation coefficients for a georeferenced image.
///
/// Converts between pixel coordinates (col, row) and map coordinates (x, y):
/// ```text
/// x = origin_x + col * pixel_width + row * row_rotation
/// y = origin_y + col * col_rotation + row * pixel_height
/// ```
///
/// `origin_*` is the outer corner of the top-left pixel, not its centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    pub origin_x: f64,
    pub origin_y: f64,
    pub pixel_width: f64,
    /// Usually negative for north-up images.
    pub pixel_height: f64,
    pub row_rotation: f64,
    pub col_rotation: f64,
}

impl GeoTransform {
    /// North-up transform with no rotation.
    pub fn new(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
            row_rotation: 0.0,
            col_rotation: 0.0,
        }
    }

    /// Build from the six world-file values in file order `[A, D, B, E, C, F]`.
    ///
    /// World files reference the centre of the top-left pixel; the origin is
    /// shifted half a pixel back to the corner.
    pub fn from_world_file(values: [f64; 6]) -> Self {
        let [a, d, b, e, c, f] = values;
        Self {
            origin_x: c - 0.5 * a - 0.5 * b,
            origin_y: f - 0.5 * d - 0.5 * e,
            pixel_width: a,
            pixel_height: e,
            row_rotation: b,
            col_rotation: d,
        }
    }

    /// Back to world-file order `[A, D, B, E, C, F]` with a centre-based origin.
    pub fn to_world_file(&self) -> [f64; 6] {
        let (c, f) = self.pixel_to_geo(0.0, 0.0);
        [
            self.pixel_width,
            self.col_rotation,
            self.row_rotation,
            self.pixel_height,
            c,
            f,
        ]
    }

    /// Identity grid used when an image has no world file: one map unit per
    /// pixel, rows growing downwards from `y = height`.
    pub fn pixel_grid(height: u32) -> Self {
        Self::new(0.0, height as f64, 1.0, -1.0)
    }

    /// Map coordinate of the centre of pixel (col, row).
    pub fn pixel_to_geo(&self, col: f64, row: f64) -> (f64, f64) {
        self.corner_to_geo(col + 0.5, row + 0.5)
    }

    /// Map coordinate of a fractional pixel position measured from the image corner.
    pub fn corner_to_geo(&self, col: f64, row: f64) -> (f64, f64) {
        let x = self.origin_x + col * self.pixel_width + row * self.row_rotation;
        let y = self.origin_y + col * self.col_rotation + row * self.pixel_height;
        (x, y)
    }

    /// Fractional pixel position of a map coordinate; NaN for a degenerate transform.
    pub fn geo_to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        let det = self.pixel_width * self.pixel_height - self.row_rotation * self.col_rotation;
        if det.abs() < 1e-12 {
            return (f64::NAN, f64::NAN);
        }

        let dx = x - self.origin_x;
        let dy = y - self.origin_y;
        let col = (self.pixel_height * dx - self.row_rotation * dy) / det;
        let row = (-self.col_rotation * dx + self.pixel_width * dy) / det;
        (col, row)
    }

    pub fn is_north_up(&self) -> bool {
        self.row_rotation.abs() < 1e-12 && self.col_rotation.abs() < 1e-12 && self.pixel_height < 0.0
    }

    /// Map-space bounding box of an image of the given size.
    pub fn bounds(&self, width: u32, height: u32) -> Extent {
        let (w, h) = (width as f64, height as f64);
        let corners = [
            self.corner_to_geo(0.0, 0.0),
            self.corner_to_geo(w, 0.0),
            self.corner_to_geo(0.0, h),
            self.corner_to_geo(w, h),
        ];
        let coords: Vec<Coordinate> = corners
            .iter()
            .map(|&(x, y)| Coordinate::new(x, y))
            .collect();
        Extent::from_coordinates(coords.iter())
            .unwrap_or_else(|| Extent::new(self.origin_x, self.origin_y, self.origin_x, self.origin_y))
    }
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, -1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_file_center_is_shifted_to_corner() {
        let gt = GeoTransform::from_world_file([0.5, 0.0, 0.0, -0.5, 200_000.25, 600_000.75]);
        assert!((gt.origin_x - 200_000.0).abs() < 1e-9);
        assert!((gt.origin_y - 600_001.0).abs() < 1e-9);
        assert!(gt.is_north_up());

        let (x, y) = gt.pixel_to_geo(0.0, 0.0);
        assert!((x - 200_000.25).abs() < 1e-9);
        assert!((y - 600_000.75).abs() < 1e-9);
    }

    #[test]
    fn world_file_values_survive_a_round_trip() {
        let values = [2.0, 0.1, -0.2, -2.0, 1000.0, 5000.0];
        let back = GeoTransform::from_world_file(values).to_world_file();
        for (a, b) in values.iter().zip(back.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn geo_to_pixel_inverts_rotated_transform() {
        let gt = GeoTransform::from_world_file([1.5, 0.25, -0.3, -1.5, 10.0, 20.0]);
        let (x, y) = gt.pixel_to_geo(7.0, 3.0);
        let (col, row) = gt.geo_to_pixel(x, y);
        assert!((col - 7.5).abs() < 1e-9);
        assert!((row - 3.5).abs() < 1e-9);
    }

    #[test]
    fn bounds_cover_whole_image() {
        let gt = GeoTransform::new(0.0, 100.0, 1.0, -1.0);
        let extent = gt.bounds(100, 50);
        assert!(extent.min_x.abs() < 1e-9);
        assert!((extent.min_y - 50.0).abs() < 1e-9);
        assert!((extent.max_x - 100.0).abs() < 1e-9);
        assert!((extent.max_y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_transform_yields_nan() {
        let gt = GeoTransform::new(0.0, 0.0, 0.0, 0.0);
        let (col, row) = gt.geo_to_pixel(1.0, 1.0);
        assert!(col.is_nan() && row.is_nan());
    }
}

use crate::config::LoggerConfig;
use crate::geo::Extent;
use crate::prelude::Coordinate;
use serde::{Deserialize, Serialize};

/// Width and height of the visible window for a zoom factor.
///
/// Higher zoom means a closer view; ranges never drop below `min_range`.
pub fn zoom_range(base_range_x: f64, base_range_y: f64, zoom: f64, min_range: f64) -> (f64, f64) {
    let zoom = if zoom > 0.0 { zoom } else { 1.0 };
    (
        (base_range_x / zoom).max(min_range),
        (base_range_y / zoom).max(min_range),
    )
}

/// Visible map window: a centre and the full width/height in map units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: Coordinate,
    pub range_x: f64,
    pub range_y: f64,
    pub min_range: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: Coordinate::new(0.0, 0.0),
            range_x: 500.0,
            range_y: 500.0,
            min_range: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(center: Coordinate, range_x: f64, range_y: f64) -> Self {
        Self {
            center,
            range_x,
            range_y,
            ..Default::default()
        }
    }

    /// Centre on a point with the window size implied by `zoom`.
    pub fn recenter(&mut self, center: Coordinate, zoom: f64, config: &LoggerConfig) {
        let zoom = config.clamp_zoom(zoom);
        let (range_x, range_y) = zoom_range(
            config.base_zoom_range_x,
            config.base_zoom_range_y,
            zoom,
            config.min_zoom_range,
        );
        self.center = center;
        self.range_x = range_x;
        self.range_y = range_y;
        self.min_range = config.min_zoom_range;
    }

    /// Show the whole extent with a relative margin on every side.
    pub fn fit(&mut self, extent: &Extent, margin: f64) {
        let grow = 1.0 + 2.0 * margin.max(0.0);
        self.center = extent.center();
        self.range_x = (extent.width() * grow).max(self.min_range);
        self.range_y = (extent.height() * grow).max(self.min_range);
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.center.x += dx;
        self.center.y += dy;
    }

    /// Shrink (factor > 1) or grow (factor < 1) the window around its centre.
    pub fn zoom_by(&mut self, factor: f64) {
        if !(factor > 0.0) {
            return;
        }
        self.range_x = (self.range_x / factor).max(self.min_range);
        self.range_y = (self.range_y / factor).max(self.min_range);
    }

    /// Zoom while keeping the map point under `anchor` (screen pixels) fixed.
    pub fn zoom_at(&mut self, factor: f64, anchor: (f32, f32), width: f32, height: f32) {
        let before = self.screen_to_world(anchor.0, anchor.1, width, height);
        self.zoom_by(factor);
        let after = self.screen_to_world(anchor.0, anchor.1, width, height);
        self.pan(before.x - after.x, before.y - after.y);
    }

    /// Pan by a screen-space drag.
    pub fn pan_pixels(&mut self, dx: f32, dy: f32, width: f32, height: f32) {
        let scale = self.scale(width, height);
        if scale > 0.0 {
            self.pan(-(dx as f64) / scale, dy as f64 / scale);
        }
    }

    pub fn extent(&self) -> Extent {
        Extent::new(
            self.center.x - self.range_x / 2.0,
            self.center.y - self.range_y / 2.0,
            self.center.x + self.range_x / 2.0,
            self.center.y + self.range_y / 2.0,
        )
    }

    /// Pixels per map unit for a screen of the given size, aspect preserved.
    pub fn scale(&self, width: f32, height: f32) -> f64 {
        let sx = width as f64 / self.range_x;
        let sy = height as f64 / self.range_y;
        sx.min(sy)
    }

    pub fn world_to_screen(&self, coord: Coordinate, width: f32, height: f32) -> (f32, f32) {
        let scale = self.scale(width, height);
        let x = width as f64 / 2.0 + (coord.x - self.center.x) * scale;
        let y = height as f64 / 2.0 - (coord.y - self.center.y) * scale;
        (x as f32, y as f32)
    }

    pub fn screen_to_world(&self, sx: f32, sy: f32, width: f32, height: f32) -> Coordinate {
        let scale = self.scale(width, height);
        if !(scale > 0.0) {
            return self.center;
        }
        Coordinate::new(
            self.center.x + (sx as f64 - width as f64 / 2.0) / scale,
            self.center.y - (sy as f64 - height as f64 / 2.0) / scale,
        )
    }
}

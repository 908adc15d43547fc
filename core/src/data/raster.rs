use crate::geo::{Extent, GeoTransform};
use crate::imaging::ImageAdjustments;
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Georeferenced image overlay. Independent of the point data.
#[derive(Debug, Clone)]
pub struct ImageLayer {
    path: PathBuf,
    pixels: RgbaImage,
    pub transform: GeoTransform,
    /// `false` when no world file was found and a pixel grid is used instead.
    pub georeferenced: bool,
    pub adjustments: ImageAdjustments,
}

impl ImageLayer {
    pub fn new(path: impl Into<PathBuf>, pixels: RgbaImage, transform: GeoTransform, georeferenced: bool) -> Self {
        Self {
            path: path.into(),
            pixels,
            transform,
            georeferenced,
            adjustments: ImageAdjustments::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Pixels with the current display adjustments applied.
    pub fn rendered(&self) -> RgbaImage {
        self.adjustments.apply(&self.pixels)
    }

    pub fn bounds(&self) -> Extent {
        self.transform.bounds(self.width(), self.height())
    }
}

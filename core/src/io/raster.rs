use crate::data::ImageLayer;
use crate::geo::GeoTransform;
use crate::io::world_file;
use crate::prelude::CoreResult;
use log::{info, warn};
use std::path::Path;

/// Decode an image and georeference it from its world file.
///
/// Without a world file the image is placed on a one-unit-per-pixel grid
/// and `georeferenced` is `false`.
pub fn load_image_layer(path: &Path) -> CoreResult<ImageLayer> {
    let pixels = image::open(path)?.to_rgba8();

    let layer = match world_file::load_transform(path)? {
        Some((world, transform)) => {
            info!(
                "georeferenced {} ({}x{}) from {}",
                path.display(),
                pixels.width(),
                pixels.height(),
                world.display()
            );
            ImageLayer::new(path, pixels, transform, true)
        }
        None => {
            warn!("no world file for {}, using pixel coordinates", path.display());
            let transform = GeoTransform::pixel_grid(pixels.height());
            ImageLayer::new(path, pixels, transform, false)
        }
    };
    Ok(layer)
}

//! File input and output: shapefiles, images and world files.

pub mod raster;
pub mod testdata;
pub mod vector;
pub mod world_file;

pub use raster::load_image_layer;
pub use vector::{load_point_layer, save_point_layer};
pub use world_file::{find_world_file, parse_world_file};

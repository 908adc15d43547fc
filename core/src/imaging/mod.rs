pub mod adjust;

pub use adjust::{ImageAdjustments, Interpolation};

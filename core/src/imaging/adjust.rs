use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

/// Slider value that leaves brightness, contrast and saturation untouched.
pub const NEUTRAL: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interpolation {
    #[default]
    Nearest,
    Bilinear,
    Bicubic,
}

impl Interpolation {
    pub const ALL: [Interpolation; 3] = [
        Interpolation::Nearest,
        Interpolation::Bilinear,
        Interpolation::Bicubic,
    ];

    pub fn filter_type(self) -> FilterType {
        match self {
            Interpolation::Nearest => FilterType::Nearest,
            Interpolation::Bilinear => FilterType::Triangle,
            Interpolation::Bicubic => FilterType::CatmullRom,
        }
    }
}

impl std::fmt::Display for Interpolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Interpolation::Nearest => "Nearest",
            Interpolation::Bilinear => "Bilinear",
            Interpolation::Bicubic => "Bicubic",
        })
    }
}

/// Display parameters for the image overlay.
///
/// Brightness, contrast and saturation run 0..=100 with 50 as neutral;
/// threshold runs 0..=255 with 0 meaning off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAdjustments {
    pub brightness: u8,
    pub contrast: u8,
    pub saturation: u8,
    pub threshold: u8,
    pub interpolation: Interpolation,
}

impl Default for ImageAdjustments {
    fn default() -> Self {
        Self {
            brightness: NEUTRAL,
            contrast: NEUTRAL,
            saturation: NEUTRAL,
            threshold: 0,
            interpolation: Interpolation::default(),
        }
    }
}

fn factor(slider: u8) -> f32 {
    slider.min(100) as f32 / NEUTRAL as f32
}

fn luma(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

impl ImageAdjustments {
    pub fn is_neutral(&self) -> bool {
        self.brightness == NEUTRAL
            && self.contrast == NEUTRAL
            && self.saturation == NEUTRAL
            && self.threshold == 0
    }

    /// Apply the adjustments to every pixel. Alpha is preserved.
    pub fn apply(&self, source: &RgbaImage) -> RgbaImage {
        if self.is_neutral() {
            return source.clone();
        }

        let brightness = factor(self.brightness);
        let contrast = factor(self.contrast);
        let saturation = factor(self.saturation);
        let threshold = self.threshold as f32;

        let mut out = source.clone();
        for pixel in out.pixels_mut() {
            let Rgba([r, g, b, a]) = *pixel;
            let mut rgb = [r as f32, g as f32, b as f32];

            for channel in &mut rgb {
                *channel *= brightness;
                *channel = (*channel - 128.0) * contrast + 128.0;
            }

            let gray = luma(rgb[0], rgb[1], rgb[2]);
            for channel in &mut rgb {
                *channel = gray + (*channel - gray) * saturation;
            }

            if self.threshold > 0 {
                let level = if luma(rgb[0], rgb[1], rgb[2]) >= threshold {
                    255.0
                } else {
                    0.0
                };
                rgb = [level; 3];
            }

            *pixel = Rgba([
                rgb[0].round().clamp(0.0, 255.0) as u8,
                rgb[1].round().clamp(0.0, 255.0) as u8,
                rgb[2].round().clamp(0.0, 255.0) as u8,
                a,
            ]);
        }
        out
    }

    /// Downsample so the longest side fits `max_side`, using the chosen interpolation.
    pub fn fit_for_display(&self, source: &RgbaImage, max_side: u32) -> RgbaImage {
        let (w, h) = source.dimensions();
        let longest = w.max(h);
        if longest <= max_side || max_side == 0 {
            return source.clone();
        }
        let scale = max_side as f64 / longest as f64;
        let nw = ((w as f64 * scale).round() as u32).max(1);
        let nh = ((h as f64 * scale).round() as u32).max(1);
        imageops::resize(source, nw, nh, self.interpolation.filter_type())
    }
}

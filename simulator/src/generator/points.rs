use anyhow::{ensure, Context};
use geopointcore::geo::Extent;
use geopointcore::Coordinate;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for generating a synthetic point set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub count: usize,
    pub center_x: f64,
    pub center_y: f64,
    /// Half-width of the square the points are scattered in, in map units.
    pub spread: f64,
    pub seed: u64,
    pub image_size: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 5,
            center_x: 275_000.0,
            center_y: 675_000.0,
            spread: 400.0,
            seed: 0,
            image_size: 400,
        }
    }
}

/// Points scattered uniformly around the centre, reproducible from the seed.
pub fn build_coordinates(config: &GeneratorConfig) -> anyhow::Result<Vec<Coordinate>> {
    ensure!(config.count > 0, "count must be at least 1");
    ensure!(config.spread > 0.0, "spread must be positive");

    let mut rng = StdRng::seed_from_u64(config.seed);
    let coords = (0..config.count)
        .map(|_| {
            Coordinate::new(
                config.center_x + rng.gen_range(-config.spread..config.spread),
                config.center_y + rng.gen_range(-config.spread..config.spread),
            )
        })
        .collect();
    Ok(coords)
}

/// Square extent around the points with a 20% margin, so the image covers them all.
pub fn covering_extent(coords: &[Coordinate]) -> anyhow::Result<Extent> {
    let extent = Extent::from_coordinates(coords.iter()).context("no coordinates to cover")?;
    let side = extent.width().max(extent.height()).max(1.0) * 1.4;
    let center = extent.center();
    Ok(Extent::new(
        center.x - side / 2.0,
        center.y - side / 2.0,
        center.x + side / 2.0,
        center.y + side / 2.0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_is_reproducible() {
        let config = GeneratorConfig {
            count: 12,
            seed: 3,
            ..Default::default()
        };
        let a = build_coordinates(&config).unwrap();
        let b = build_coordinates(&config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
        assert!(a
            .iter()
            .all(|c| (c.x - config.center_x).abs() <= config.spread && (c.y - config.center_y).abs() <= config.spread));
    }

    #[test]
    fn extent_covers_generated_points() {
        let coords = build_coordinates(&GeneratorConfig::default()).unwrap();
        let extent = covering_extent(&coords).unwrap();
        assert!(coords.iter().all(|c| extent.contains(c)));
        assert!((extent.width() - extent.height()).abs() < 1e-6);
    }

    #[test]
    fn zero_count_is_rejected() {
        let config = GeneratorConfig {
            count: 0,
            ..Default::default()
        };
        assert!(build_coordinates(&config).is_err());
    }
}

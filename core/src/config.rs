use crate::geo::Extent;
use crate::prelude::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// World-file extensions tried next to an image, in lookup order.
pub const WORLD_FILE_EXTENSIONS: [&str; 8] =
    ["jgw", "jgwx", "jpgw", "pgw", "pgwx", "tfw", "tfwx", "wld"];

pub const DEFAULT_ID_FIELD: &str = "ID";
pub const DEFAULT_CRS: &str = "EPSG:2039";

/// Named extents that can stand in for an explicit `expected_bounds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsPreset {
    IsraeliGrid,
}

impl BoundsPreset {
    pub fn extent(self) -> Extent {
        match self {
            BoundsPreset::IsraeliGrid => LoggerConfig::israeli_grid_bounds(),
        }
    }
}

/// Settings shared by the workflow controller, the CLI and the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Column that `record_and_advance` writes into.
    pub id_field: String,
    /// Column whose value identifies a point for `go_to`; `None` uses the feature number.
    pub key_column: Option<String>,
    /// Zoom factor applied when recentering; higher is closer.
    pub zoom: f64,
    pub base_zoom_range_x: f64,
    pub base_zoom_range_y: f64,
    pub min_zoom_range: f64,
    pub min_zoom_factor: f64,
    pub max_zoom_factor: f64,
    /// Label of the coordinate reference system the data is expected in.
    pub crs: String,
    /// Points outside this box are reported as suspicious on load.
    pub expected_bounds: Option<Extent>,
    /// Used when `expected_bounds` is not given.
    pub bounds_preset: Option<BoundsPreset>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            id_field: DEFAULT_ID_FIELD.to_string(),
            key_column: None,
            zoom: 1.0,
            base_zoom_range_x: 500.0,
            base_zoom_range_y: 500.0,
            min_zoom_range: 1.0,
            min_zoom_factor: 0.1,
            max_zoom_factor: 5.0,
            crs: DEFAULT_CRS.to_string(),
            expected_bounds: None,
            bounds_preset: None,
        }
    }
}

impl LoggerConfig {
    /// Bounds of the Israeli TM grid, the coordinate system the tool was first used with.
    pub fn israeli_grid_bounds() -> Extent {
        Extent::new(200_000.0, 500_000.0, 350_000.0, 850_000.0)
    }

    /// Box that loaded points are checked against; explicit bounds win over a preset.
    pub fn expected_extent(&self) -> Option<Extent> {
        self.expected_bounds
            .or_else(|| self.bounds_preset.map(BoundsPreset::extent))
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.id_field.trim().is_empty() {
            return Err(CoreError::Config("id_field must not be empty".into()));
        }
        if !(self.min_zoom_factor > 0.0) || self.max_zoom_factor < self.min_zoom_factor {
            return Err(CoreError::Config(format!(
                "zoom bounds {}..{} are invalid",
                self.min_zoom_factor, self.max_zoom_factor
            )));
        }
        if !(self.min_zoom_range > 0.0)
            || !(self.base_zoom_range_x > 0.0)
            || !(self.base_zoom_range_y > 0.0)
        {
            return Err(CoreError::Config("zoom ranges must be positive".into()));
        }
        Ok(())
    }

    /// Clamp a requested zoom into the configured bounds.
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.zoom.clamp(self.min_zoom_factor, self.max_zoom_factor);
        }
        zoom.clamp(self.min_zoom_factor, self.max_zoom_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = LoggerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.id_field, "ID");
        assert_eq!(config.base_zoom_range_x, 500.0);
    }

    #[test]
    fn empty_id_field_is_rejected() {
        let config = LoggerConfig {
            id_field: "  ".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn zoom_is_clamped_to_bounds() {
        let config = LoggerConfig::default();
        assert_eq!(config.clamp_zoom(0.01), 0.1);
        assert_eq!(config.clamp_zoom(12.0), 5.0);
        assert_eq!(config.clamp_zoom(2.0), 2.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: LoggerConfig = serde_json::from_str(r#"{"id_field": "TAG"}"#).unwrap();
        assert_eq!(config.id_field, "TAG");
        assert_eq!(config.zoom, 1.0);
        assert!(config.expected_bounds.is_none());
    }

    #[test]
    fn preset_supplies_expected_extent() {
        let config: LoggerConfig = serde_json::from_str(r#"{"bounds_preset": "israeli_grid"}"#).unwrap();
        let extent = config.expected_extent().unwrap();
        assert_eq!(extent, LoggerConfig::israeli_grid_bounds());
        assert!(extent.contains(&crate::Coordinate::new(275_000.0, 675_000.0)));

        let explicit = LoggerConfig {
            expected_bounds: Some(Extent::new(0.0, 0.0, 10.0, 10.0)),
            ..config
        };
        assert_eq!(explicit.expected_extent(), Some(Extent::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(LoggerConfig::default().expected_extent(), None);
    }
}

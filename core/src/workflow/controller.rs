use crate::config::LoggerConfig;
use crate::data::{ColumnDef, PointFeature, PointLayer};
use crate::prelude::{AttributeValue, Coordinate, CoreError, CoreResult};
use crate::telemetry::{LogManager, SessionMetrics};

/// Width given to a record column created on demand; saving widens it as needed.
const TARGET_COLUMN_WIDTH: u8 = 32;

/// Request for the map to centre on a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recenter {
    pub index: usize,
    pub coord: Coordinate,
    pub zoom: f64,
}

/// Result of a successful workflow step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// Cursor after the step.
    pub index: usize,
    pub status: String,
    pub recenter: Option<Recenter>,
}

/// Cursor over a point layer plus the record-and-advance logic.
///
/// The cursor is always within `[0, len-1]`, or 0 for an empty layer.
pub struct WorkflowController {
    layer: PointLayer,
    index: usize,
    target_column: String,
    zoom: f64,
    config: LoggerConfig,
    logger: LogManager,
    metrics: SessionMetrics,
}

impl WorkflowController {
    pub fn new(layer: PointLayer, config: LoggerConfig) -> Self {
        let mut controller = Self {
            layer: PointLayer::default(),
            index: 0,
            target_column: config.id_field.clone(),
            zoom: config.clamp_zoom(config.zoom),
            config,
            logger: LogManager::default(),
            metrics: SessionMetrics::new(),
        };
        controller.load(layer);
        controller
    }

    /// Replace the layer and reset the cursor.
    pub fn load(&mut self, layer: PointLayer) {
        self.layer = layer;
        self.index = 0;
        self.metrics.reset();

        if let Some(bounds) = self.config.expected_extent() {
            let outside = self.layer.outside(&bounds);
            if !outside.is_empty() {
                self.logger.warn(&format!(
                    "{} of {} points lie outside the expected {} bounds (first: {})",
                    outside.len(),
                    self.layer.len(),
                    self.config.crs,
                    outside[0]
                ));
            }
        }
        if self.layer.table().column_index(&self.target_column).is_none() && !self.layer.is_empty() {
            self.logger.warn(&format!(
                "no '{}' column found in data; recording is disabled until a column is chosen",
                self.target_column
            ));
        }
        self.logger
            .record(&format!("loaded {} points", self.layer.len()));
    }

    pub fn layer(&self) -> &PointLayer {
        &self.layer
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.layer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layer.is_empty()
    }

    pub fn current_point(&self) -> Option<&PointFeature> {
        self.layer.feature(self.index)
    }

    pub fn target_column(&self) -> &str {
        &self.target_column
    }

    /// Choose the column `record_and_advance` writes into.
    pub fn set_target_column(&mut self, column: &str) -> CoreResult<()> {
        let col = self.layer.table().require_column(column)?;
        self.target_column = self.layer.table().columns()[col].name.clone();
        Ok(())
    }

    /// Create the record column as an empty text column when the layer lacks it.
    ///
    /// Returns `true` when a column was added.
    pub fn add_target_column(&mut self) -> CoreResult<bool> {
        if self.layer.table().column_index(&self.target_column).is_some() {
            return Ok(false);
        }
        self.layer
            .add_column(ColumnDef::text(self.target_column.clone(), TARGET_COLUMN_WIDTH))?;
        self.logger
            .record(&format!("added empty '{}' column", self.target_column));
        Ok(true)
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set the recenter zoom; returns the clamped value actually used.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.zoom = self.config.clamp_zoom(zoom);
        self.zoom
    }

    pub fn recenter_current(&self) -> Option<Recenter> {
        self.current_point().map(|point| Recenter {
            index: self.index,
            coord: point.coord,
            zoom: self.zoom,
        })
    }

    /// Write `value` into the target column of the current point, then
    /// advance (saturating at the last point) and recenter.
    pub fn record_and_advance(&mut self, value: &str) -> CoreResult<StepOutcome> {
        if value.trim().is_empty() {
            return Err(CoreError::InvalidInput("please enter a value to record".into()));
        }
        let column = self.target_column.clone();
        let (before, stored) = self.write_current(&column, value)?;

        self.index = (before + 1).min(self.len() - 1);
        self.metrics.record_value();

        let status = if self.index == before {
            format!("Recorded {} {} for point {}, last point reached", column, stored, before)
        } else {
            format!("Recorded {} {} for point {}, moved to next point", column, stored, before)
        };
        Ok(self.outcome(status))
    }

    /// Write `value` into any column of the current point; advance only when `move_next`.
    pub fn assign(&mut self, column: &str, value: &str, move_next: bool) -> CoreResult<StepOutcome> {
        let (before, stored) = self.write_current(column, value)?;
        self.metrics.record_value();

        let mut status = format!("Assigned '{}' to column '{}' for point {}", stored, column, before);
        if move_next {
            self.index = (before + 1).min(self.len() - 1);
            status.push_str(", moved to next point");
        }
        Ok(self.outcome(status))
    }

    fn write_current(&mut self, column: &str, value: &str) -> CoreResult<(usize, AttributeValue)> {
        if self.is_empty() {
            self.metrics.record_failure();
            return Err(CoreError::NoData);
        }
        let before = self.index;
        match self.layer.set_value(before, column, value) {
            Ok(stored) => {
                self.logger
                    .record(&format!("point {} {} = {}", before, column, stored));
                Ok((before, stored))
            }
            Err(err) => {
                self.metrics.record_failure();
                self.logger.warn(&format!("write to point {} failed: {}", before, err));
                Err(err)
            }
        }
    }

    /// Jump to the first point whose identifier equals `id`.
    ///
    /// An unknown id leaves the cursor where it is.
    pub fn go_to(&mut self, id: &str) -> CoreResult<StepOutcome> {
        if self.is_empty() {
            return Err(CoreError::NoData);
        }
        match self.layer.position_of_key(id) {
            Some(found) => {
                self.index = found;
                self.metrics.record_navigation();
                Ok(self.outcome(format!("Navigated to point {}", id.trim())))
            }
            None => {
                self.metrics.record_failure();
                self.logger.warn(&format!("go to {}: not found", id.trim()));
                Err(CoreError::IdNotFound(id.trim().to_string()))
            }
        }
    }

    /// Move by index, failing for an index past the end.
    pub fn move_to_index(&mut self, index: usize) -> CoreResult<StepOutcome> {
        if index >= self.len() {
            self.metrics.record_failure();
            return Err(CoreError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        self.index = index;
        self.metrics.record_navigation();
        Ok(self.outcome(format!("Moved to point {}", index)))
    }

    /// Advance one point; stays on the last point.
    pub fn next(&mut self) -> CoreResult<StepOutcome> {
        if self.is_empty() {
            return Err(CoreError::NoData);
        }
        let target = (self.index + 1).min(self.len() - 1);
        Ok(self.step_to(target, "Already at the last point"))
    }

    /// Go back one point; stays on the first point.
    pub fn previous(&mut self) -> CoreResult<StepOutcome> {
        if self.is_empty() {
            return Err(CoreError::NoData);
        }
        let target = self.index.saturating_sub(1);
        Ok(self.step_to(target, "Already at the first point"))
    }

    fn step_to(&mut self, target: usize, at_bound: &str) -> StepOutcome {
        if target == self.index {
            return self.outcome(at_bound.to_string());
        }
        self.index = target;
        self.metrics.record_navigation();
        self.outcome(format!("Moved to point {}", target))
    }

    /// Text of a column at the cursor, used to prefill the input field.
    pub fn current_value(&self, column: &str) -> Option<String> {
        self.layer
            .table()
            .value(self.index, column)
            .map(|v| v.as_text())
    }

    /// Direct table edit; does not move the cursor.
    pub fn edit_cell(&mut self, row: usize, col: usize, input: &str) -> CoreResult<AttributeValue> {
        let value = self.layer.set_cell_text(row, col, input)?;
        self.logger
            .record(&format!("edited row {} column {} = {}", row, col, value));
        Ok(value)
    }

    /// How many points have a value in the target column.
    pub fn recorded_count(&self) -> usize {
        let Some(col) = self.layer.table().column_index(&self.target_column) else {
            return 0;
        };
        self.layer
            .table()
            .rows()
            .filter(|row| !row[col].is_null())
            .count()
    }

    fn outcome(&self, status: String) -> StepOutcome {
        self.logger.record(&status);
        StepOutcome {
            index: self.index,
            status,
            recenter: self.recenter_current(),
        }
    }
}

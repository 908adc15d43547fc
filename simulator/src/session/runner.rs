use crate::session::config::{Action, SessionConfig, Step};
use anyhow::Context;
use geopointcore::io::{load_point_layer, save_point_layer};
use geopointcore::{CoreError, StepOutcome, WorkflowController};
use log::warn;
use std::path::PathBuf;

pub struct SessionResult {
    pub points: usize,
    pub final_index: usize,
    pub recorded: usize,
    pub statuses: Vec<String>,
    pub failures: usize,
    pub saved_to: Option<PathBuf>,
}

/// Replays a scripted session through the workflow controller.
#[derive(Clone)]
pub struct SessionRunner {
    config: SessionConfig,
}

impl SessionRunner {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> anyhow::Result<SessionResult> {
        let layer = load_point_layer(&self.config.shapefile, self.config.logger.key_column.as_deref())
            .with_context(|| format!("loading {}", self.config.shapefile.display()))?;
        let mut controller = WorkflowController::new(layer, self.config.logger.clone());

        let mut statuses = Vec::with_capacity(self.config.steps.len());
        for (number, step) in self.config.steps.iter().enumerate() {
            // step failures are reported, not fatal, the same way the viewer shows them
            match apply_step(&mut controller, step) {
                Ok(outcome) => statuses.push(outcome.status),
                Err(err) => {
                    warn!("step {} ({:?}) failed: {}", number + 1, step.action, err);
                    statuses.push(format!("step {} failed: {}", number + 1, err));
                }
            }
        }

        let saved_to = match &self.config.output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("creating {}", parent.display()))?;
                }
                save_point_layer(controller.layer(), path)
                    .with_context(|| format!("saving {}", path.display()))?;
                Some(path.clone())
            }
            None => None,
        };

        let (_, _, failures) = controller.metrics().snapshot();
        Ok(SessionResult {
            points: controller.len(),
            final_index: controller.index(),
            recorded: controller.recorded_count(),
            statuses,
            failures,
            saved_to,
        })
    }
}

fn required<'a>(value: &'a Option<String>, what: &str) -> Result<&'a str, CoreError> {
    value
        .as_deref()
        .ok_or_else(|| CoreError::InvalidInput(format!("step needs a {}", what)))
}

fn apply_step(controller: &mut WorkflowController, step: &Step) -> Result<StepOutcome, CoreError> {
    match step.action {
        Action::Record => controller.record_and_advance(required(&step.value, "value")?),
        Action::Assign => {
            let column = required(&step.column, "column")?;
            let value = step.value.as_deref().unwrap_or("");
            controller.assign(column, value, step.move_next)
        }
        Action::GoTo => controller.go_to(required(&step.value, "value")?),
        Action::MoveTo => {
            let index = step
                .index
                .ok_or_else(|| CoreError::InvalidInput("step needs an index".into()))?;
            controller.move_to_index(index)
        }
        Action::Next => controller.next(),
        Action::Previous => controller.previous(),
        Action::AddTargetColumn => {
            let status = if controller.add_target_column()? {
                format!("Added column '{}'", controller.target_column())
            } else {
                format!("Column '{}' already present", controller.target_column())
            };
            Ok(StepOutcome {
                index: controller.index(),
                status,
                recenter: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geopointcore::io::testdata::{sample_point_layer, POINTS_FILE};
    use geopointcore::{AttributeValue, Coordinate, LoggerConfig};
    use tempfile::tempdir;

    fn step(action: Action, value: Option<&str>) -> Step {
        Step {
            action,
            value: value.map(str::to_string),
            column: None,
            index: None,
            move_next: false,
        }
    }

    #[test]
    fn runner_records_and_saves() {
        let dir = tempdir().unwrap();
        let input = dir.path().join(POINTS_FILE);
        let coords: Vec<Coordinate> = (0..4).map(|i| Coordinate::new(i as f64, i as f64)).collect();
        save_point_layer(&sample_point_layer(&coords).unwrap(), &input).unwrap();

        let config = SessionConfig {
            shapefile: input,
            output: Some(dir.path().join("out").join("logged.shp")),
            report: None,
            logger: LoggerConfig::default(),
            steps: vec![
                step(Action::Record, Some("A-1")),
                step(Action::Record, Some("A-2")),
                step(Action::GoTo, Some("42")),
                step(Action::Next, None),
                step(Action::Record, None),
                step(Action::Record, Some("A-4")),
            ],
        };

        let result = SessionRunner::new(config).execute().unwrap();
        assert_eq!(result.points, 4);
        assert_eq!(result.final_index, 3);
        assert_eq!(result.recorded, 3);
        assert_eq!(result.failures, 1);
        assert!(result.statuses[2].contains("not found"));
        assert!(result.statuses[4].contains("needs a value"));

        let saved = load_point_layer(result.saved_to.as_ref().unwrap(), None).unwrap();
        assert_eq!(saved.table().value(1, "ID"), Some(&AttributeValue::Text("A-2".into())));
        assert_eq!(saved.table().value(3, "ID"), Some(&AttributeValue::Text("A-4".into())));
        assert_eq!(saved.table().value(2, "ID"), Some(&AttributeValue::Null));
    }

    #[test]
    fn runner_creates_missing_record_column() {
        let dir = tempdir().unwrap();
        let input = dir.path().join(POINTS_FILE);
        let coords: Vec<Coordinate> = (0..2).map(|i| Coordinate::new(i as f64, 0.0)).collect();
        save_point_layer(&sample_point_layer(&coords).unwrap(), &input).unwrap();

        let config = SessionConfig {
            shapefile: input,
            output: Some(dir.path().join("tagged.shp")),
            report: None,
            logger: LoggerConfig {
                id_field: "TAG".into(),
                ..Default::default()
            },
            steps: vec![
                step(Action::Record, Some("lost")),
                step(Action::AddTargetColumn, None),
                step(Action::Record, Some("T-1")),
            ],
        };

        let result = SessionRunner::new(config).execute().unwrap();
        assert!(result.statuses[0].contains("no 'TAG' column"));
        assert_eq!(result.statuses[1], "Added column 'TAG'");
        let saved = load_point_layer(result.saved_to.as_ref().unwrap(), None).unwrap();
        assert_eq!(saved.table().value(0, "TAG"), Some(&AttributeValue::Text("T-1".into())));
    }

    #[test]
    fn missing_shapefile_fails_the_run() {
        let dir = tempdir().unwrap();
        let config = SessionConfig {
            shapefile: dir.path().join("missing.shp"),
            output: None,
            report: None,
            logger: LoggerConfig::default(),
            steps: Vec::new(),
        };
        assert!(SessionRunner::new(config).execute().is_err());
    }
}

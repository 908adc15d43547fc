use anyhow::Context;
use geopointcore::LoggerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Record,
    Assign,
    GoTo,
    MoveTo,
    Next,
    Previous,
    /// Create the record column when the layer lacks it.
    AddTargetColumn,
}

/// One scripted user action.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Step {
    pub action: Action,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default)]
    pub index: Option<usize>,
    #[serde(default)]
    pub move_next: bool,
}

/// A replayable logging session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    pub shapefile: PathBuf,
    /// Where the logged layer is written; nothing is saved when absent.
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Summary lines are appended here when set.
    #[serde(default)]
    pub report: Option<PathBuf>,
    #[serde(default)]
    pub logger: LoggerConfig,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl SessionConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading session config {}", path_ref.display()))?;
        let mut config: SessionConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing session config {}", path_ref.display()))?;
        config.resolve_relative_to(path_ref.parent().unwrap_or_else(|| Path::new(".")));
        config
            .logger
            .validate()
            .with_context(|| format!("validating session config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Paths in the file are taken relative to the file itself.
    fn resolve_relative_to(&mut self, base: &Path) {
        let resolve = |p: &Path| -> PathBuf {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                base.join(p)
            }
        };
        self.shapefile = resolve(&self.shapefile);
        self.output = self.output.as_deref().map(resolve);
        self.report = self.report.as_deref().map(resolve);
    }
}

/// Load just the logger settings, for commands that take `--config`.
pub fn load_logger_config<P: AsRef<Path>>(path: P) -> anyhow::Result<LoggerConfig> {
    let path_ref = path.as_ref();
    let contents = fs::read_to_string(path_ref)
        .with_context(|| format!("reading logger config {}", path_ref.display()))?;
    let config: LoggerConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("parsing logger config {}", path_ref.display()))?;
    config
        .validate()
        .with_context(|| format!("validating logger config {}", path_ref.display()))?;
    Ok(config)
}

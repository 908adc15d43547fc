use crate::session::runner::SessionResult;
use anyhow::Context;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Summary of a replayed session, printed and optionally appended to a log.
#[derive(Debug, Clone, Serialize, Default)]
pub struct SessionReport {
    pub shapefile: String,
    pub points: usize,
    pub recorded: usize,
    pub final_index: usize,
    pub failures: usize,
    pub saved_to: Option<String>,
    pub statuses: Vec<String>,
}

impl SessionReport {
    pub fn new(shapefile: &Path, result: &SessionResult) -> Self {
        Self {
            shapefile: shapefile.display().to_string(),
            points: result.points,
            recorded: result.recorded,
            final_index: result.final_index,
            failures: result.failures,
            saved_to: result.saved_to.as_ref().map(|p| p.display().to_string()),
            statuses: result.statuses.clone(),
        }
    }

    pub fn summary_line(&self) -> String {
        format!(
            "shapefile={} points={} recorded={} final_index={} failures={} saved_to={}",
            self.shapefile,
            self.points,
            self.recorded,
            self.final_index,
            self.failures,
            self.saved_to.as_deref().unwrap_or("-")
        )
    }

    pub fn append_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening report {}", path.display()))?;
        writeln!(file, "{}", self.summary_line())?;
        Ok(())
    }
}

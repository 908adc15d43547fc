use log::{info, warn};

/// Tagged logging for workflow events so a session can be followed in the log.
pub struct LogManager {
    tag: &'static str,
}

impl LogManager {
    pub fn new(tag: &'static str) -> Self {
        Self { tag }
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.tag, message);
    }

    pub fn warn(&self, message: &str) {
        warn!("[{}] {}", self.tag, message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("workflow")
    }
}

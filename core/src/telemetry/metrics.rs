use serde::Serialize;

/// Counters for one logging session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionMetrics {
    recorded: usize,
    navigations: usize,
    failures: usize,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_value(&mut self) {
        self.recorded += 1;
    }

    pub fn record_navigation(&mut self) {
        self.navigations += 1;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// `(recorded, navigations, failures)`
    pub fn snapshot(&self) -> (usize, usize, usize) {
        (self.recorded, self.navigations, self.failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_and_reset() {
        let mut metrics = SessionMetrics::new();
        metrics.record_value();
        metrics.record_value();
        metrics.record_navigation();
        metrics.record_failure();
        assert_eq!(metrics.snapshot(), (2, 1, 1));
        metrics.reset();
        assert_eq!(metrics.snapshot(), (0, 0, 0));
    }
}

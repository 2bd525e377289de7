//! Timing for pipeline stages.

use std::time::{Duration, Instant};
use tracing::info;

/// Logs how long a pipeline stage took when finished.
#[derive(Debug)]
pub struct StageTimer {
    stage: &'static str,
    started: Instant,
}

impl StageTimer {
    pub fn start(stage: &'static str) -> Self {
        Self {
            stage,
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Log the stage duration along with how many rows it produced.
    pub fn finish(self, rows: usize) -> Duration {
        let elapsed = self.elapsed();
        info!(
            stage = self.stage,
            rows,
            elapsed_ms = elapsed.as_millis() as u64,
            "Stage complete"
        );
        elapsed
    }
}

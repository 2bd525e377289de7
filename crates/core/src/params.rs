//! Benchmark parameters and their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Minimum daily impressions for a record to count toward a benchmark.
pub const DEFAULT_MIN_IMPRESSIONS: u64 = 100;

/// Trailing window length, in daily rows.
pub const DEFAULT_WINDOW: usize = 7;

/// Device categories without a click affordance.
pub const CONNECTED_TV: &str = "CONNECTED_TV";

/// Parameters for the pre-filter, benchmark and join stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkParams {
    /// Records below this many impressions are filtered out
    #[serde(default = "default_min_impressions")]
    pub min_impressions: u64,
    /// Devices excluded before benchmarking
    #[serde(default = "default_excluded_devices")]
    pub excluded_devices: Vec<String>,
    /// Rolling window length in daily rows
    #[serde(default = "default_window")]
    pub window: usize,
    /// Join benchmarks onto the unfiltered query result
    #[serde(default)]
    pub annotate_all_records: bool,
}

fn default_min_impressions() -> u64 {
    DEFAULT_MIN_IMPRESSIONS
}

fn default_excluded_devices() -> Vec<String> {
    vec![CONNECTED_TV.to_string()]
}

fn default_window() -> usize {
    DEFAULT_WINDOW
}

impl Default for BenchmarkParams {
    fn default() -> Self {
        Self {
            min_impressions: default_min_impressions(),
            excluded_devices: default_excluded_devices(),
            window: default_window(),
            annotate_all_records: false,
        }
    }
}

impl BenchmarkParams {
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(Error::config("benchmark window must be at least 1"));
        }
        Ok(())
    }

    pub fn is_excluded(&self, device: &str) -> bool {
        self.excluded_devices.iter().any(|d| d == device)
    }
}

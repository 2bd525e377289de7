//! Performance and annotated report records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Date format used by the warehouse query and both exports.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Click-through rate as a percentage.
///
/// Returns 0 when there are no impressions.
pub fn ctr(clicks: u64, impressions: u64) -> f64 {
    if impressions == 0 {
        return 0.0;
    }
    clicks as f64 / impressions as f64 * 100.0
}

/// Parse a `YYYY-MM-DD` date coming out of the warehouse.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|e| Error::invalid_record(format!("bad date {:?}: {}", raw, e)))
}

/// One ad's performance on one device for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub date: NaiveDate,
    pub ad_id: String,
    pub device: String,
    pub impressions: u64,
    pub clicks: u64,
}

impl PerformanceRecord {
    pub fn new(
        date: NaiveDate,
        ad_id: impl Into<String>,
        device: impl Into<String>,
        impressions: u64,
        clicks: u64,
    ) -> Self {
        Self {
            date,
            ad_id: ad_id.into(),
            device: device.into(),
            impressions,
            clicks,
        }
    }

    /// This record's own CTR, independent of any device aggregate.
    pub fn ctr(&self) -> f64 {
        ctr(self.clicks, self.impressions)
    }
}

/// A performance record with its CTR and the device benchmark for its date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedRecord {
    /// Contiguous position in the final report, starting at 0.
    pub index: usize,
    pub date: NaiveDate,
    pub ad_id: String,
    pub device: String,
    pub impressions: u64,
    pub clicks: u64,
    pub ctr: f64,
    pub benchmark: f64,
}

impl AnnotatedRecord {
    /// Date rendered the way both exports print it.
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

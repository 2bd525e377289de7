//! Pre-filter applied before any benchmark computation.

use crate::params::BenchmarkParams;
use crate::records::PerformanceRecord;

/// Whether a record has enough impressions and an eligible device.
pub fn is_eligible(record: &PerformanceRecord, params: &BenchmarkParams) -> bool {
    record.impressions >= params.min_impressions && !params.is_excluded(&record.device)
}

/// Keep only eligible records, preserving order.
pub fn prefilter(records: &[PerformanceRecord], params: &BenchmarkParams) -> Vec<PerformanceRecord> {
    records
        .iter()
        .filter(|r| is_eligible(r, params))
        .cloned()
        .collect()
}

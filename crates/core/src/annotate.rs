//! Joins device benchmarks onto individual ad records.

use tracing::{debug, info};

use crate::benchmark::BenchmarkSet;
use crate::error::Result;
use crate::filter::prefilter;
use crate::params::BenchmarkParams;
use crate::records::{AnnotatedRecord, PerformanceRecord};

/// Attach each record's CTR and its (date, device) benchmark.
///
/// Records without a benchmark are dropped. Survivors are indexed from 0 in
/// input order.
pub fn annotate(records: &[PerformanceRecord], benchmarks: &BenchmarkSet) -> Vec<AnnotatedRecord> {
    records
        .iter()
        .filter_map(|record| {
            benchmarks
                .get(record.date, &record.device)
                .map(|benchmark| (record, benchmark))
        })
        .enumerate()
        .map(|(index, (record, benchmark))| AnnotatedRecord {
            index,
            date: record.date,
            ad_id: record.ad_id.clone(),
            device: record.device.clone(),
            impressions: record.impressions,
            clicks: record.clicks,
            ctr: record.ctr(),
            benchmark,
        })
        .collect()
}

/// Run pre-filter, benchmark and join over a query result.
pub fn build_report(
    records: &[PerformanceRecord],
    params: &BenchmarkParams,
) -> Result<Vec<AnnotatedRecord>> {
    params.validate()?;

    let eligible = prefilter(records, params);
    debug!(
        total = records.len(),
        eligible = eligible.len(),
        "Applied pre-filter"
    );

    let benchmarks = BenchmarkSet::compute(&eligible, params.window);

    let joined = if params.annotate_all_records {
        annotate(records, &benchmarks)
    } else {
        annotate(&eligible, &benchmarks)
    };

    info!(
        records = records.len(),
        eligible = eligible.len(),
        benchmark_days = benchmarks.len(),
        annotated = joined.len(),
        "Built CTR benchmark report"
    );

    Ok(joined)
}

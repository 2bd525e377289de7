//! Rolling per-device CTR benchmark.
//!
//! Records are summed per (date, device), a daily CTR is derived from the
//! sums, and the benchmark is the trailing mean of that CTR over a fixed
//! number of daily rows. Dates without a full window have no benchmark.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::records::{ctr, PerformanceRecord};

/// Impressions and clicks summed across all ads of a device on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyDeviceTotals {
    pub date: NaiveDate,
    pub device: String,
    pub impressions: u64,
    pub clicks: u64,
    pub ctr: f64,
}

/// Benchmark CTR for a device on a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceBenchmark {
    pub date: NaiveDate,
    pub device: String,
    pub benchmark: f64,
}

/// Distinct devices in order of first appearance.
pub fn distinct_devices(records: &[PerformanceRecord]) -> Vec<String> {
    let mut devices: Vec<String> = Vec::new();
    for record in records {
        if !devices.iter().any(|d| d == &record.device) {
            devices.push(record.device.clone());
        }
    }
    devices
}

/// Sum a device's records per date, one row per date in ascending order.
pub fn daily_device_totals(records: &[PerformanceRecord], device: &str) -> Vec<DailyDeviceTotals> {
    let mut by_date: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
    for record in records.iter().filter(|r| r.device == device) {
        let entry = by_date.entry(record.date).or_default();
        entry.0 += record.impressions;
        entry.1 += record.clicks;
    }

    by_date
        .into_iter()
        .map(|(date, (impressions, clicks))| DailyDeviceTotals {
            date,
            device: device.to_string(),
            impressions,
            clicks,
            ctr: ctr(clicks, impressions),
        })
        .collect()
}

/// Trailing mean over `window` consecutive values, inclusive of the current one.
///
/// Positions before the window fills are `None`. A zero window yields all `None`.
pub fn trailing_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                None
            } else {
                let slice = &values[i + 1 - window..=i];
                Some(slice.iter().sum::<f64>() / window as f64)
            }
        })
        .collect()
}

/// Benchmark series for one device. Dates without a full window are omitted.
pub fn device_benchmark(
    records: &[PerformanceRecord],
    device: &str,
    window: usize,
) -> Vec<DeviceBenchmark> {
    let totals = daily_device_totals(records, device);
    let ctrs: Vec<f64> = totals.iter().map(|t| t.ctr).collect();

    totals
        .iter()
        .zip(trailing_mean(&ctrs, window))
        .filter_map(|(day, mean)| {
            mean.map(|benchmark| DeviceBenchmark {
                date: day.date,
                device: day.device.clone(),
                benchmark,
            })
        })
        .collect()
}

/// Benchmarks for every device, looked up by (date, device).
#[derive(Debug, Clone, Default)]
pub struct BenchmarkSet {
    series: Vec<DeviceBenchmark>,
    lookup: HashMap<(NaiveDate, String), usize>,
}

impl BenchmarkSet {
    /// Compute benchmarks for every device present in `records`.
    pub fn compute(records: &[PerformanceRecord], window: usize) -> Self {
        let mut set = Self::default();
        for device in distinct_devices(records) {
            let series = device_benchmark(records, &device, window);
            debug!(
                device = %device,
                benchmark_days = series.len(),
                "Computed device benchmark"
            );
            set.extend(series);
        }
        set
    }

    fn extend(&mut self, series: Vec<DeviceBenchmark>) {
        for entry in series {
            let key = (entry.date, entry.device.clone());
            self.lookup.insert(key, self.series.len());
            self.series.push(entry);
        }
    }

    /// Benchmark for a device on a date, if one exists.
    pub fn get(&self, date: NaiveDate, device: &str) -> Option<f64> {
        self.lookup
            .get(&(date, device.to_string()))
            .map(|&i| self.series[i].benchmark)
    }

    /// All benchmark entries, grouped by device in order of first appearance.
    pub fn entries(&self) -> &[DeviceBenchmark] {
        &self.series
    }

    /// Benchmark entries for one device, in date order.
    pub fn for_device<'a>(&'a self, device: &'a str) -> impl Iterator<Item = &'a DeviceBenchmark> {
        self.series.iter().filter(move |b| b.device == device)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

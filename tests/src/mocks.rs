//! Mock implementations for testing.

use async_trait::async_trait;
use benchmark_core::{Error, PerformanceRecord, PerformanceSource, Result, WarehouseErrorCode};
use parking_lot::Mutex;
use std::sync::Arc;

/// Mock source that serves canned performance rows.
///
/// Implements the same `PerformanceSource` trait as the warehouse adapter,
/// so a report run goes through the production pipeline without a warehouse.
#[derive(Clone)]
pub struct MockSource {
    /// Rows returned by every fetch.
    records: Arc<Mutex<Vec<PerformanceRecord>>>,
    /// Simulate failures if set.
    should_fail: Arc<Mutex<bool>>,
    /// Number of fetches served.
    fetches: Arc<Mutex<usize>>,
}

impl MockSource {
    pub fn new(records: Vec<PerformanceRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            should_fail: Arc::new(Mutex::new(false)),
            fetches: Arc::new(Mutex::new(0)),
        }
    }

    /// Replace the canned rows.
    pub fn set_records(&self, records: Vec<PerformanceRecord>) {
        *self.records.lock() = records;
    }

    /// Set failure mode for testing error handling.
    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock() = fail;
    }

    /// Number of fetches made against this source.
    pub fn fetch_count(&self) -> usize {
        *self.fetches.lock()
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl PerformanceSource for MockSource {
    async fn fetch_performance(&self) -> Result<Vec<PerformanceRecord>> {
        *self.fetches.lock() += 1;

        if *self.should_fail.lock() {
            return Err(Error::warehouse(
                WarehouseErrorCode::QueryFailed,
                "Mock source failure",
            ));
        }

        Ok(self.records.lock().clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn test_mock_source_serves_records() {
        let source = MockSource::new(fixtures::mobile_scenario());
        let records = source.fetch_performance().await.unwrap();
        assert_eq!(records.len(), 10);
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_source_failure() {
        let source = MockSource::default();
        source.set_should_fail(true);
        let err = source.fetch_performance().await.unwrap_err();
        assert_eq!(err.error_code(), Some("WH_001"));

        source.set_should_fail(false);
        assert!(source.fetch_performance().await.unwrap().is_empty());
        assert_eq!(source.fetch_count(), 2);
    }
}

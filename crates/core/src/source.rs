//! Source of daily ad performance records.

use async_trait::async_trait;

use crate::error::Result;
use crate::records::PerformanceRecord;

/// Anything that can produce the daily (date, ad, device) performance rows.
///
/// The warehouse adapter implements this, as do the test mocks.
#[async_trait]
pub trait PerformanceSource: Send + Sync {
    /// Fetch performance rows ordered by date, ad id and device.
    async fn fetch_performance(&self) -> Result<Vec<PerformanceRecord>>;

    /// Short label used in logs.
    fn name(&self) -> &str;
}

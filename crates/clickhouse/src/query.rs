//! Daily ad performance query against the ads performance mart.

use async_trait::async_trait;
use benchmark_core::{
    parse_date, Error, PerformanceRecord, PerformanceSource, Result, WarehouseErrorCode,
};
use clickhouse::Row;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::client::ClickHouseClient;

/// Rows shown in the debug preview after a fetch.
const PREVIEW_ROWS: usize = 5;

/// Which fact table to read and how far back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Fully qualified fact table, e.g. `dbt.mart_googleads_performancereport_ads`
    #[serde(default = "default_table")]
    pub table: String,
    /// Trailing calendar days to read
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
}

fn default_table() -> String {
    "dbt.mart_googleads_performancereport_ads".to_string()
}

fn default_lookback_days() -> u32 {
    30
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            table: default_table(),
            lookback_days: default_lookback_days(),
        }
    }
}

impl QueryConfig {
    /// Table names are interpolated, so only plain identifiers are allowed.
    pub fn validate(&self) -> Result<()> {
        let valid = !self.table.is_empty()
            && !self.table.starts_with('.')
            && !self.table.ends_with('.')
            && self
                .table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
        if !valid {
            return Err(Error::config(format!(
                "invalid fact table name: {:?}",
                self.table
            )));
        }
        Ok(())
    }

    /// SQL for the daily (date, ad, device) aggregate. Lookback is bound as `?`.
    ///
    /// Grouping and ordering use the raw columns so ad ids sort numerically.
    pub fn sql(&self) -> String {
        format!(
            r#"
        SELECT
            toString(toDate(date)) AS day,
            toString(adid) AS ad,
            toString(device) AS dev,
            toUInt64(sum(impressions)) AS total_impressions,
            toUInt64(sum(clicks)) AS total_clicks
        FROM {table}
        WHERE toDate(date) >= today() - toIntervalDay(?)
        GROUP BY toDate(date), adid, device
        ORDER BY toDate(date) ASC, adid ASC, device ASC
    "#,
            table = self.table
        )
    }
}

/// Raw row as returned by ClickHouse. Field order follows the SELECT list.
#[derive(Debug, Clone, Row, Deserialize)]
pub struct PerformanceRow {
    #[serde(rename = "day")]
    pub date: String,
    #[serde(rename = "ad")]
    pub adid: String,
    #[serde(rename = "dev")]
    pub device: String,
    #[serde(rename = "total_impressions")]
    pub impressions: u64,
    #[serde(rename = "total_clicks")]
    pub clicks: u64,
}

impl PerformanceRow {
    pub fn into_record(self) -> Result<PerformanceRecord> {
        Ok(PerformanceRecord {
            date: parse_date(&self.date)?,
            ad_id: self.adid,
            device: self.device,
            impressions: self.impressions,
            clicks: self.clicks,
        })
    }
}

/// Fetch raw performance rows.
pub async fn query_performance(
    client: &ClickHouseClient,
    query: &QueryConfig,
) -> Result<Vec<PerformanceRow>> {
    query.validate()?;

    let rows: Vec<PerformanceRow> = client
        .inner()
        .query(&query.sql())
        .bind(query.lookback_days)
        .fetch_all()
        .await
        .map_err(|e| {
            Error::warehouse(
                WarehouseErrorCode::QueryFailed,
                format!("Query error on {}: {}", query.table, e),
            )
        })?;
    Ok(rows)
}

/// Performance source backed by the ClickHouse warehouse.
pub struct WarehouseSource {
    client: ClickHouseClient,
    query: QueryConfig,
}

impl WarehouseSource {
    pub fn new(client: ClickHouseClient, query: QueryConfig) -> Result<Self> {
        query.validate()?;
        Ok(Self { client, query })
    }

    pub fn query(&self) -> &QueryConfig {
        &self.query
    }
}

#[async_trait]
impl PerformanceSource for WarehouseSource {
    async fn fetch_performance(&self) -> Result<Vec<PerformanceRecord>> {
        let rows = query_performance(&self.client, &self.query).await?;
        let records = rows
            .into_iter()
            .map(PerformanceRow::into_record)
            .collect::<Result<Vec<_>>>()?;

        info!(
            table = %self.query.table,
            lookback_days = self.query.lookback_days,
            rows = records.len(),
            "Fetched ad performance"
        );
        for record in records.iter().take(PREVIEW_ROWS) {
            debug!(
                date = %record.date,
                adid = %record.ad_id,
                device = %record.device,
                impressions = record.impressions,
                clicks = record.clicks,
                "Performance row"
            );
        }

        Ok(records)
    }

    fn name(&self) -> &str {
        "clickhouse"
    }
}

//! ClickHouse schema for the ads performance mart.
//!
//! The report only reads this table. The DDL documents the columns the
//! performance query expects and is used to seed test warehouses.

use crate::client::ClickHouseClient;
use crate::query::QueryConfig;
use benchmark_core::{Error, Result, WarehouseErrorCode};
use tracing::debug;

/// DDL for the hourly ads performance fact table.
pub fn create_performance_table(table: &str) -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {table} (
    date DateTime,
    campaignid Int64,
    adid Int64,
    device LowCardinality(String),
    impressions UInt64,
    clicks UInt64
)
ENGINE = MergeTree()
PARTITION BY toYYYYMM(date)
ORDER BY (date, adid, device)
"#
    )
}

/// Create the database and fact table named by `query` if missing.
pub async fn init_schema(client: &ClickHouseClient, query: &QueryConfig) -> Result<()> {
    query.validate()?;

    if let Some((database, _)) = query.table.split_once('.') {
        execute(client, &format!("CREATE DATABASE IF NOT EXISTS {}", database)).await?;
    }
    execute(client, &create_performance_table(&query.table)).await?;

    debug!(table = %query.table, "ClickHouse schema initialized");
    Ok(())
}

async fn execute(client: &ClickHouseClient, ddl: &str) -> Result<()> {
    client.inner().query(ddl).execute().await.map_err(|e| {
        Error::warehouse(
            WarehouseErrorCode::QueryFailed,
            format!("Failed to execute DDL: {}", e),
        )
    })
}

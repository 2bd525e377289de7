//! ClickHouse health checks.

use crate::client::ClickHouseClient;
use benchmark_core::{Error, Result, WarehouseErrorCode};
use tracing::{debug, error};

/// Check ClickHouse connection health.
pub async fn check_connection(client: &ClickHouseClient) -> bool {
    match client.inner().query("SELECT 1").fetch_one::<u8>().await {
        Ok(_) => {
            debug!("ClickHouse connection healthy");
            true
        }
        Err(e) => {
            error!("ClickHouse health check failed: {}", e);
            false
        }
    }
}

/// Fail with WH_002 when the warehouse does not answer.
pub async fn ensure_reachable(client: &ClickHouseClient) -> Result<()> {
    if check_connection(client).await {
        Ok(())
    } else {
        Err(Error::warehouse(
            WarehouseErrorCode::Unreachable,
            format!("ClickHouse at {} is not reachable", client.config().url),
        ))
    }
}

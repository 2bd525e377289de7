//! Warehouse connection handle.

use benchmark_core::{Error, Result};
use clickhouse::Client;
use tracing::info;

use crate::config::ClickHouseConfig;

/// A configured `clickhouse::Client` plus the settings it was built from.
/// Cloning shares the underlying HTTP pool.
#[derive(Clone)]
pub struct ClickHouseClient {
    inner: Client,
    config: ClickHouseConfig,
}

impl ClickHouseClient {
    pub fn new(config: ClickHouseConfig) -> Result<Self> {
        let url = config.url.trim();
        if url.is_empty() {
            return Err(Error::config("clickhouse url is empty"));
        }

        let mut inner = Client::default()
            .with_url(url)
            .with_database(&config.database);
        if let Some(user) = config.username.as_deref() {
            inner = inner.with_user(user);
        }
        if let Some(password) = config.password.as_deref() {
            inner = inner.with_password(password);
        }

        info!(
            url,
            database = %config.database,
            authenticated = config.username.is_some(),
            "Connecting to warehouse"
        );

        Ok(Self { inner, config })
    }

    pub fn inner(&self) -> &Client {
        &self.inner
    }

    pub fn config(&self) -> &ClickHouseConfig {
        &self.config
    }
}

//! CTR Benchmark Report
//!
//! Reads the last 30 days of ad performance from the warehouse, computes a
//! trailing 7-day CTR benchmark per device type, and writes:
//! - a raw TSV of every ad/day/device row with its CTR and benchmark
//! - a color-coded HTML table fragment for the dashboard

use anyhow::{Context, Result};
use tracing::{error, info};

use benchmark_core::BenchmarkParams;
use clickhouse_client::{health, ClickHouseClient, ClickHouseConfig, QueryConfig, WarehouseSource};
use report::ReportConfig;
use telemetry::init_tracing_from_env;

/// Application configuration.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default)]
    clickhouse: ClickHouseConfig,

    #[serde(default)]
    query: QueryConfig,

    #[serde(default)]
    benchmark: BenchmarkParams,

    #[serde(default)]
    report: ReportConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing_from_env();

    info!("Starting CTR benchmark report v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    info!(
        url = %config.clickhouse.url,
        table = %config.query.table,
        lookback_days = config.query.lookback_days,
        window = config.benchmark.window,
        "Loaded configuration"
    );

    let clickhouse = ClickHouseClient::new(config.clickhouse.clone())
        .context("Failed to create ClickHouse client")?;
    health::ensure_reachable(&clickhouse)
        .await
        .context("ClickHouse is unavailable")?;

    let source = WarehouseSource::new(clickhouse, config.query.clone())
        .context("Invalid performance query")?;

    match report::run(&source, &config.benchmark, &config.report).await {
        Ok(summary) => {
            info!(reported = summary.reported, "Done");
            Ok(())
        }
        Err(e) => {
            error!(code = e.error_code().unwrap_or("none"), "Report run failed: {}", e);
            Err(e).context("CTR benchmark report failed")
        }
    }
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(environment())
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Flat overrides for warehouse credentials
    if let Ok(url) = std::env::var("CTR_BENCHMARK_CLICKHOUSE_URL") {
        config.clickhouse.url = url;
    }
    if let Ok(database) = std::env::var("CTR_BENCHMARK_CLICKHOUSE_DATABASE") {
        config.clickhouse.database = database;
    }
    if let Ok(username) = std::env::var("CTR_BENCHMARK_CLICKHOUSE_USERNAME") {
        config.clickhouse.username = Some(username);
    }
    if let Ok(password) = std::env::var("CTR_BENCHMARK_CLICKHOUSE_PASSWORD") {
        config.clickhouse.password = Some(password);
    }

    config.benchmark.validate()?;
    config.query.validate()?;

    Ok(config)
}

/// `CTR_BENCHMARK__<SECTION>__<KEY>` overrides. Lists are comma separated.
fn environment() -> config::Environment {
    config::Environment::default()
        .separator("__")
        .prefix("CTR_BENCHMARK")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("benchmark.excluded_devices")
}

//! Exports for the CTR benchmark report and the end-to-end run.
//!
//! A run fetches the daily performance rows, builds the annotated report and
//! writes it twice: a raw TSV and a color-coded HTML table fragment.

pub mod format;
pub mod html;
pub mod style;
pub mod tsv;

use std::path::PathBuf;

use benchmark_core::{build_report, AnnotatedRecord, BenchmarkParams, PerformanceSource, Result};
use serde::{Deserialize, Serialize};
use telemetry::StageTimer;
use tracing::info;

pub use html::{render_table, write_html_file, TableOptions};
pub use style::Highlight;
pub use tsv::{write_tsv, write_tsv_file};

/// Where and how the report is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// TSV output path
    #[serde(default = "default_tsv_path")]
    pub tsv_path: PathBuf,
    /// HTML fragment output path, usually inside a web root
    #[serde(default = "default_html_path")]
    pub html_path: PathBuf,
    /// Stable table id used in the HTML fragment
    #[serde(default = "default_table_id")]
    pub table_id: String,
    /// CSS classes on the HTML table
    #[serde(default = "default_table_class")]
    pub table_class: String,
}

fn default_tsv_path() -> PathBuf {
    PathBuf::from("ctrvsbenchmark.tsv")
}

fn default_html_path() -> PathBuf {
    PathBuf::from("/var/www/html/ctrvsbenchmark.html")
}

fn default_table_id() -> String {
    "ctrvsbenchmark".to_string()
}

fn default_table_class() -> String {
    "table table-bordered".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            tsv_path: default_tsv_path(),
            html_path: default_html_path(),
            table_id: default_table_id(),
            table_class: default_table_class(),
        }
    }
}

impl ReportConfig {
    pub fn table_options(&self) -> TableOptions {
        TableOptions {
            table_id: self.table_id.clone(),
            table_class: self.table_class.clone(),
        }
    }
}

/// Outcome of a report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub fetched: usize,
    pub reported: usize,
    pub positive: usize,
    pub caution: usize,
    pub negative: usize,
}

impl RunSummary {
    fn new(fetched: usize, rows: &[AnnotatedRecord]) -> Self {
        let mut summary = Self {
            fetched,
            reported: rows.len(),
            positive: 0,
            caution: 0,
            negative: 0,
        };
        for row in rows {
            match Highlight::classify(row.impressions, row.ctr, row.benchmark) {
                Highlight::Positive => summary.positive += 1,
                Highlight::Caution => summary.caution += 1,
                Highlight::Negative => summary.negative += 1,
                Highlight::None => {}
            }
        }
        summary
    }
}

/// Write both outputs.
pub fn export(rows: &[AnnotatedRecord], config: &ReportConfig) -> Result<()> {
    write_tsv_file(rows, &config.tsv_path)?;
    info!(path = %config.tsv_path.display(), rows = rows.len(), "Wrote TSV report");

    write_html_file(rows, &config.table_options(), &config.html_path)?;
    info!(path = %config.html_path.display(), rows = rows.len(), "Wrote HTML report");
    Ok(())
}

/// Fetch, benchmark, annotate and export.
pub async fn run(
    source: &dyn PerformanceSource,
    params: &BenchmarkParams,
    config: &ReportConfig,
) -> Result<RunSummary> {
    let timer = StageTimer::start("fetch");
    let records = source.fetch_performance().await?;
    timer.finish(records.len());

    let timer = StageTimer::start("benchmark");
    let rows = build_report(&records, params)?;
    timer.finish(rows.len());

    let timer = StageTimer::start("export");
    export(&rows, config)?;
    timer.finish(rows.len());

    let summary = RunSummary::new(records.len(), &rows);
    info!(
        source = source.name(),
        fetched = summary.fetched,
        reported = summary.reported,
        positive = summary.positive,
        caution = summary.caution,
        negative = summary.negative,
        "CTR benchmark report complete"
    );
    Ok(summary)
}

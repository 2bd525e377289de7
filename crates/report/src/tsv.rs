//! Tab-separated export of the annotated report.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use benchmark_core::{AnnotatedRecord, Error, Result};

use crate::format::raw_float;

/// Header row, in column order.
pub const TSV_HEADER: [&str; 8] = [
    "index",
    "date",
    "adid",
    "device",
    "impressions",
    "clicks",
    "ctr",
    "ctr benchmark",
];

fn csv_error(e: csv::Error) -> Error {
    Error::export(format!("TSV write failed: {}", e))
}

/// Write the annotated rows as TSV with a header row.
pub fn write_tsv<W: Write>(rows: &[AnnotatedRecord], out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(out);

    writer.write_record(TSV_HEADER).map_err(csv_error)?;
    for row in rows {
        writer
            .write_record([
                row.index.to_string(),
                row.date_string(),
                row.ad_id.clone(),
                row.device.clone(),
                row.impressions.to_string(),
                row.clicks.to_string(),
                raw_float(row.ctr),
                raw_float(row.benchmark),
            ])
            .map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the TSV to a file, replacing any previous report.
pub fn write_tsv_file(rows: &[AnnotatedRecord], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_tsv(rows, file)
}

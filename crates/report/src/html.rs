//! Styled HTML table fragment.
//!
//! The fragment is a `<style>` block followed by a `<table>`, meant to be
//! fetched and inserted into a parent page that already loads the table CSS.
//! Each highlighted row gets a background color through per-cell id rules,
//! grouped by color.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use benchmark_core::{AnnotatedRecord, Result};

use crate::format::{percent, thousands};
use crate::style::Highlight;

/// Visible columns. The row index is hidden.
pub const HTML_COLUMNS: [&str; 7] = [
    "date",
    "adid",
    "device",
    "impressions",
    "clicks",
    "ctr",
    "ctr benchmark",
];

/// Table identity and classes.
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Stable id; the element id is `T_<table_id>`
    pub table_id: String,
    /// Value of the table's `class` attribute
    pub table_class: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            table_id: "ctrvsbenchmark".to_string(),
            table_class: "table table-bordered".to_string(),
        }
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn cell_values(row: &AnnotatedRecord) -> [String; 7] {
    [
        row.date_string(),
        html_escape(&row.ad_id),
        html_escape(&row.device),
        thousands(row.impressions),
        thousands(row.clicks),
        percent(row.ctr),
        percent(row.benchmark),
    ]
}

/// Render the styled table fragment.
pub fn render_table(rows: &[AnnotatedRecord], options: &TableOptions) -> String {
    let uuid = format!("T_{}", html_escape(&options.table_id));

    let mut html = String::new();
    html.push_str(&render_styles(rows, &uuid));

    let _ = writeln!(
        html,
        r#"<table id="{uuid}" class="{class}">"#,
        uuid = uuid,
        class = html_escape(&options.table_class),
    );

    html.push_str("  <thead>\n    <tr>\n");
    for (col, name) in HTML_COLUMNS.iter().enumerate() {
        let _ = writeln!(
            html,
            r#"      <th id="{uuid}_level0_col{col}" class="col_heading level0 col{col}" >{name}</th>"#,
        );
    }
    html.push_str("    </tr>\n  </thead>\n  <tbody>\n");

    for (row_num, row) in rows.iter().enumerate() {
        html.push_str("    <tr>\n");
        for (col, value) in cell_values(row).iter().enumerate() {
            let _ = writeln!(
                html,
                r#"      <td id="{uuid}_row{row_num}_col{col}" class="data row{row_num} col{col}" >{value}</td>"#,
            );
        }
        html.push_str("    </tr>\n");
    }

    html.push_str("  </tbody>\n</table>\n");
    html
}

/// Background rules for every highlighted row, one rule per color.
fn render_styles(rows: &[AnnotatedRecord], uuid: &str) -> String {
    let mut groups: Vec<(&'static str, Vec<String>)> = Vec::new();

    for (row_num, row) in rows.iter().enumerate() {
        let Some(color) = Highlight::classify(row.impressions, row.ctr, row.benchmark).color()
        else {
            continue;
        };
        let selectors =
            (0..HTML_COLUMNS.len()).map(|col| format!("#{uuid}_row{row_num}_col{col}"));
        if let Some(pos) = groups.iter().position(|(c, _)| *c == color) {
            groups[pos].1.extend(selectors);
        } else {
            groups.push((color, selectors.collect()));
        }
    }

    let mut css = String::from("<style type=\"text/css\">\n");
    for (color, selectors) in groups {
        let _ = writeln!(
            css,
            "{} {{\n  background-color: {};\n}}",
            selectors.join(", "),
            color
        );
    }
    css.push_str("</style>\n");
    css
}

/// Write the fragment, replacing any previous report.
pub fn write_html_file(
    rows: &[AnnotatedRecord],
    options: &TableOptions,
    path: &Path,
) -> Result<()> {
    fs::write(path, render_table(rows, options))?;
    Ok(())
}

//! End-to-end report runs against a mock performance source.
//!
//! These go through the same pipeline as the binary: fetch, pre-filter,
//! benchmark, join, and both exports.

use std::collections::{BTreeSet, HashMap};

use benchmark_core::{ctr, BenchmarkParams};
use chrono::NaiveDate;
use integration_tests::fixtures::{self, day};
use integration_tests::mocks::MockSource;
use integration_tests::setup::ReportContext;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

/// Ten MOBILE days: only days 7-10 are reported, and day 7 uses days 1-7.
#[tokio::test]
async fn test_mobile_scenario_end_to_end() {
    let ctx = ReportContext::new();
    let source = MockSource::new(fixtures::mobile_scenario());

    let summary = report::run(&source, &ctx.params, &ctx.config).await.unwrap();
    assert_eq!(summary.fetched, 10);
    assert_eq!(summary.reported, 4);

    let rows = ctx.tsv_rows();
    assert_eq!(rows.len(), 4);

    let dates: Vec<&str> = rows.iter().map(|r| r[1].as_str()).collect();
    assert_eq!(dates, vec!["2024-06-07", "2024-06-08", "2024-06-09", "2024-06-10"]);

    let first_benchmark: f64 = rows[0][7].parse().unwrap();
    assert_close(first_benchmark, fixtures::mobile_first_week_benchmark());
}

/// TSV header and column order.
#[tokio::test]
async fn test_tsv_layout() {
    let ctx = ReportContext::new();
    let source = MockSource::new(fixtures::mobile_scenario());
    report::run(&source, &ctx.params, &ctx.config).await.unwrap();

    let tsv = ctx.read_tsv();
    let header = tsv.lines().next().unwrap();
    assert_eq!(
        header,
        "index\tdate\tadid\tdevice\timpressions\tclicks\tctr\tctr benchmark"
    );

    let rows = ctx.tsv_rows();
    assert_eq!(rows[0][0], "0");
    assert_eq!(rows[0][2], "5501");
    assert_eq!(rows[0][3], "MOBILE");
    assert_eq!(rows[0][4], "200");
    assert_eq!(rows[0][5], "10");
    assert_close(rows[0][6].parse().unwrap(), 5.0);
}

/// Every reported row has a benchmark and lies past its device's warm-up dates.
#[tokio::test]
async fn test_reported_rows_are_past_warmup() {
    let ctx = ReportContext::new();
    let input = fixtures::mixed_devices();
    let source = MockSource::new(input.clone());
    report::run(&source, &ctx.params, &ctx.config).await.unwrap();

    let params = BenchmarkParams::default();
    let mut dates_by_device: HashMap<String, BTreeSet<NaiveDate>> = HashMap::new();
    for r in input
        .iter()
        .filter(|r| r.impressions >= params.min_impressions && !params.is_excluded(&r.device))
    {
        dates_by_device.entry(r.device.clone()).or_default().insert(r.date);
    }

    let rows = ctx.tsv_rows();
    assert_eq!(rows.len(), 10);
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row[0], i.to_string());
        assert!(!row[7].is_empty());

        let date = NaiveDate::parse_from_str(&row[1], "%Y-%m-%d").unwrap();
        let warmup: Vec<NaiveDate> = dates_by_device[&row[3]].iter().take(6).copied().collect();
        assert!(!warmup.contains(&date), "row {} is in warm-up", i);
    }

    let devices: BTreeSet<&str> = rows.iter().map(|r| r[3].as_str()).collect();
    assert_eq!(devices, BTreeSet::from(["DESKTOP", "MOBILE"]));
}

/// The MOBILE benchmark is shared by both ads and built from daily sums.
#[tokio::test]
async fn test_benchmark_aggregates_across_ads() {
    let ctx = ReportContext::new();
    let source = MockSource::new(fixtures::mixed_devices());
    report::run(&source, &ctx.params, &ctx.config).await.unwrap();

    let daily_ctr: Vec<f64> = fixtures::MOBILE_CLICKS
        .iter()
        .map(|&c| ctr(c + 30, 1_200))
        .collect();
    let expected = daily_ctr[..7].iter().sum::<f64>() / 7.0;

    let rows = ctx.tsv_rows();
    let day7: Vec<&Vec<String>> = rows
        .iter()
        .filter(|r| r[1] == day(6).to_string() && r[3] == "MOBILE")
        .collect();
    assert_eq!(day7.len(), 2);
    for row in day7 {
        assert_close(row[7].parse().unwrap(), expected);
    }

    let ad_5502: f64 = rows
        .iter()
        .find(|r| r[2] == "5502")
        .map(|r| r[6].parse().unwrap())
        .unwrap();
    assert_close(ad_5502, 3.0);
}

/// Including unfiltered rows brings back the low-volume ad but never CONNECTED_TV.
#[tokio::test]
async fn test_annotate_all_records() {
    let mut ctx = ReportContext::new();
    ctx.params.annotate_all_records = true;
    let source = MockSource::new(fixtures::mixed_devices());

    let summary = report::run(&source, &ctx.params, &ctx.config).await.unwrap();
    assert_eq!(summary.reported, 11);

    let rows = ctx.tsv_rows();
    assert!(rows.iter().any(|r| r[2] == "5503"));
    assert!(rows.iter().all(|r| r[3] != "CONNECTED_TV"));
}

/// HTML fragment: stable id, hidden index, formatted cells, row colors.
#[tokio::test]
async fn test_html_fragment() {
    let ctx = ReportContext::new();
    let source = MockSource::new(fixtures::mixed_devices());
    let summary = report::run(&source, &ctx.params, &ctx.config).await.unwrap();

    let html = ctx.read_html();
    assert!(html.starts_with("<style type=\"text/css\">"));
    assert!(html.contains(r#"<table id="T_ctrvsbenchmark" class="table table-bordered">"#));
    assert!(!html.contains(">index</th>"));
    assert!(html.contains(">2,500</td>"));
    assert!(html.contains(">1,000</td>"));
    assert!(html.contains(">3.00%</td>"));
    assert_eq!(html.matches("<tr>").count(), summary.reported + 1);

    let highlighted = summary.positive + summary.caution + summary.negative;
    assert_eq!(highlighted, summary.reported);
}

/// One row of each highlight class, each colored by its own rule.
#[tokio::test]
async fn test_html_row_colors() {
    let ctx = ReportContext::new();
    let source = MockSource::new(fixtures::highlight_mix());
    let summary = report::run(&source, &ctx.params, &ctx.config).await.unwrap();

    assert_eq!(summary.reported, 3);
    assert_eq!((summary.positive, summary.caution, summary.negative), (1, 1, 1));

    let rows = ctx.tsv_rows();
    let ads: Vec<&str> = rows.iter().map(|r| r[2].as_str()).collect();
    assert_eq!(ads, vec!["1", "2", "3"]);

    let html = ctx.read_html();
    for (row, color) in [(0, "#7dcea0"), (1, "#f4d03f"), (2, "#e74c3c")] {
        let rule = format!(
            "#T_ctrvsbenchmark_row{}_col6 {{\n  background-color: {};\n}}",
            row, color
        );
        assert!(html.contains(&rule), "missing rule: {}", rule);
    }
    assert_eq!(html.matches("background-color").count(), 3);
}

/// Rows keep the source order, so the numerically smaller ad id gets index 0.
#[tokio::test]
async fn test_index_follows_numeric_ad_order() {
    let ctx = ReportContext::new();
    let source = MockSource::new(fixtures::mixed_width_ad_ids());
    report::run(&source, &ctx.params, &ctx.config).await.unwrap();

    let rows = ctx.tsv_rows();
    let indexed: Vec<(&str, &str)> = rows
        .iter()
        .map(|r| (r[0].as_str(), r[2].as_str()))
        .collect();
    assert_eq!(indexed, vec![("0", "9"), ("1", "10")]);
}

/// Fewer than seven days of history produces header-only outputs.
#[tokio::test]
async fn test_short_history_writes_empty_report() {
    let ctx = ReportContext::new();
    let source = MockSource::new(fixtures::daily_rows("1", "DESKTOP", 500, &[5; 6]));

    let summary = report::run(&source, &ctx.params, &ctx.config).await.unwrap();
    assert_eq!(summary.reported, 0);
    assert_eq!(ctx.read_tsv().lines().count(), 1);
    assert!(ctx.read_html().contains("<tbody>\n  </tbody>"));
}

/// A second run replaces the previous outputs.
#[tokio::test]
async fn test_rerun_overwrites_outputs() {
    let ctx = ReportContext::new();
    let source = MockSource::new(fixtures::mixed_devices());
    report::run(&source, &ctx.params, &ctx.config).await.unwrap();
    assert_eq!(ctx.tsv_rows().len(), 10);

    source.set_records(fixtures::mobile_scenario());
    report::run(&source, &ctx.params, &ctx.config).await.unwrap();
    assert_eq!(ctx.tsv_rows().len(), 4);
    assert_eq!(source.fetch_count(), 2);
}

//! Markdown and JSON report generation.
//!
//! The Markdown report carries the per-dataset summary tables, the
//! aligned aggregate tables, and the rendered charts. The JSON report
//! serializes the same [`Report`] structure for machine consumers.

use crate::models::{
    ChartArtifact, ColumnSummary, DatasetSummary, GroupedSeries, Report, ReportMetadata,
};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# California Housing Comparison Report\n\n");

    output.push_str(&generate_metadata_section(&report.metadata));

    for summary in &report.summaries {
        output.push_str(&generate_summary_section(summary));
    }

    let (original_label, updated_label) = dataset_labels(report);
    output.push_str(&generate_aggregate_section(
        "Median House Value by Housing Age Range",
        "Housing Age Range",
        &report.aggregates.value_by_age,
        original_label,
        updated_label,
    ));
    output.push_str(&generate_aggregate_section(
        "Median House Value by Ocean Proximity",
        "Ocean Proximity",
        &report.aggregates.value_by_proximity,
        original_label,
        updated_label,
    ));

    output.push_str(&generate_charts_section(&report.charts));

    output.push_str(&generate_footer());

    output
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

fn dataset_labels(report: &Report) -> (&str, &str) {
    let original = report
        .summaries
        .first()
        .map(|s| s.label.as_str())
        .unwrap_or("Original");
    let updated = report
        .summaries
        .get(1)
        .map(|s| s.label.as_str())
        .unwrap_or("Updated");
    (original, updated)
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!(
        "- **Original Snapshot:** `{}` ({} records)\n",
        metadata.original_path, metadata.original_records
    ));
    section.push_str(&format!(
        "- **Updated Snapshot:** `{}` ({} records)\n",
        metadata.updated_path, metadata.updated_records
    ));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the per-dataset summary section with one table per column
/// kind.
fn generate_summary_section(summary: &DatasetSummary) -> String {
    let mut section = String::new();

    section.push_str(&format!("## Summary – {}\n\n", summary.label));

    let numeric: Vec<_> = summary
        .columns
        .iter()
        .filter_map(|column| match &column.summary {
            ColumnSummary::Numeric(numeric) => Some((column.name.as_str(), numeric)),
            ColumnSummary::Categorical(_) => None,
        })
        .collect();
    if !numeric.is_empty() {
        section.push_str("### Numeric Columns\n\n");
        section.push_str("| Column | Count | Mean | Std | Min | 25% | 50% | 75% | Max |\n");
        section.push_str("|:---|---:|---:|---:|---:|---:|---:|---:|---:|\n");
        for (name, stats) in numeric {
            section.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
                name,
                stats.count,
                fmt_opt(stats.mean),
                fmt_opt(stats.std),
                fmt_opt(stats.min),
                fmt_opt(stats.q1),
                fmt_opt(stats.median),
                fmt_opt(stats.q3),
                fmt_opt(stats.max),
            ));
        }
        section.push('\n');
    }

    let categorical: Vec<_> = summary
        .columns
        .iter()
        .filter_map(|column| match &column.summary {
            ColumnSummary::Categorical(cat) => Some((column.name.as_str(), cat)),
            ColumnSummary::Numeric(_) => None,
        })
        .collect();
    if !categorical.is_empty() {
        section.push_str("### Categorical Columns\n\n");
        section.push_str("| Column | Count | Unique | Top | Freq |\n");
        section.push_str("|:---|---:|---:|:---|---:|\n");
        for (name, stats) in categorical {
            section.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                name,
                stats.count,
                stats.unique,
                stats.top.as_deref().unwrap_or("-"),
                stats.freq,
            ));
        }
        section.push('\n');
    }

    section
}

/// Generate one aligned aggregate table; missing groups show as `-`.
fn generate_aggregate_section(
    title: &str,
    group_header: &str,
    series: &GroupedSeries,
    original_label: &str,
    updated_label: &str,
) -> String {
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", title));
    section.push_str(&format!(
        "| {} | {} | {} |\n",
        group_header, original_label, updated_label
    ));
    section.push_str("|:---|---:|---:|\n");
    for (group, (original, updated)) in series
        .labels
        .iter()
        .zip(series.original.iter().zip(series.updated.iter()))
    {
        section.push_str(&format!(
            "| {} | {} | {} |\n",
            group,
            fmt_opt(*original),
            fmt_opt(*updated)
        ));
    }
    section.push('\n');

    section
}

/// Generate the charts section, embedding rendered figures.
fn generate_charts_section(charts: &[ChartArtifact]) -> String {
    if charts.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## Charts\n\n");

    for chart in charts {
        match &chart.file {
            Some(file) => {
                section.push_str(&format!("### {}\n\n![{}]({})\n\n", chart.title, chart.title, file));
            }
            None => {
                section.push_str(&format!(
                    "### {}\n\n⚠️ Rendering failed: {}\n\n",
                    chart.title,
                    chart.error.as_deref().unwrap_or("unknown error")
                ));
            }
        }
    }

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    format!(
        "---\n\n*Report generated by housingcmp v{}*\n",
        env!("CARGO_PKG_VERSION")
    )
}

/// Format a possibly missing statistic; `-` marks a missing value.
fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{:.2}", value),
        None => "-".to_string(),
    }
}

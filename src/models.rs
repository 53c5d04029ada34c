//! Data models for the housing comparison report.
//!
//! This module contains all the core data structures used throughout
//! the application for representing datasets, grouped aggregates,
//! summaries, and the final report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the target value column, present in both snapshots.
pub const VALUE_COLUMN: &str = "median_house_value";

/// Name of the categorical proximity column, present in both snapshots.
pub const PROXIMITY_COLUMN: &str = "ocean_proximity";

/// Fixed edges of the housing-age taxonomy.
///
/// Interior bins are left-inclusive, right-exclusive; the overall range
/// is closed at both ends, so an age of exactly 100 still lands in the
/// last bin. Ages outside `[0, 100]` belong to no bin.
pub const AGE_BIN_EDGES: [f64; 10] = [
    0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 100.0,
];

/// Labels for the nine fixed age bins, in taxonomy order.
pub const AGE_BIN_LABELS: [&str; 9] = [
    "0-9", "10-19", "20-29", "30-39", "40-49", "50-59", "60-69", "70-79", "80+",
];

/// Values of a single dataset column.
///
/// A column is numeric when every non-empty cell parses as `f64`;
/// empty cells become `None`. Everything else stays text.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Numeric(Vec<Option<f64>>),
    Text(Vec<String>),
}

/// A named dataset column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name from the CSV header.
    pub name: String,
    /// Column values, one entry per record.
    pub values: ColumnValues,
}

impl Column {
    /// Creates a numeric column.
    pub fn numeric(name: &str, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.to_string(),
            values: ColumnValues::Numeric(values),
        }
    }

    /// Creates a text column.
    pub fn text(name: &str, values: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            values: ColumnValues::Text(values),
        }
    }
}

/// One loaded snapshot: an immutable, column-oriented table.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Human-readable label ("1990", "Updated").
    pub label: String,
    /// Number of records.
    pub row_count: usize,
    /// Columns in CSV header order.
    pub columns: Vec<Column>,
}

impl Dataset {
    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Look up a numeric column by name.
    ///
    /// Returns `None` when the column is absent or was loaded as text.
    pub fn numeric(&self, name: &str) -> Option<&[Option<f64>]> {
        match self.column(name) {
            Some(Column {
                values: ColumnValues::Numeric(values),
                ..
            }) => Some(values),
            _ => None,
        }
    }

    /// Look up a text column by name.
    pub fn text(&self, name: &str) -> Option<&[String]> {
        match self.column(name) {
            Some(Column {
                values: ColumnValues::Text(values),
                ..
            }) => Some(values),
            _ => None,
        }
    }
}

/// Two index-aligned series of group means sharing one label set.
///
/// `labels` is the union of groups occupied in either dataset; a `None`
/// entry marks a group with no records in that dataset, which is distinct
/// from a computed zero and renders as a gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedSeries {
    /// Shared, ordered group labels.
    pub labels: Vec<String>,
    /// Mean value per group for the original snapshot.
    pub original: Vec<Option<f64>>,
    /// Mean value per group for the updated snapshot.
    pub updated: Vec<Option<f64>>,
}

/// Record count for one proximity category in one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Descriptive statistics for a numeric column.
///
/// `count` is the number of present values; the statistics are `None`
/// when too few values exist to compute them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

/// Descriptive statistics for a categorical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    /// Number of non-empty values.
    pub count: usize,
    /// Number of distinct non-empty values.
    pub unique: usize,
    /// Most frequent value, if any.
    pub top: Option<String>,
    /// Frequency of the most frequent value.
    pub freq: usize,
}

/// Summary of a single column, by column kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnSummary {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

/// Summary of one column, paired with its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnReport {
    pub name: String,
    pub summary: ColumnSummary,
}

/// Column-wise descriptive report for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Dataset label.
    pub label: String,
    /// One entry per column, in original column order.
    pub columns: Vec<ColumnReport>,
}

/// All grouped aggregates consumed by the charts and the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregates {
    /// Mean value per occupied age bin, aligned across both snapshots.
    pub value_by_age: GroupedSeries,
    /// Mean value per proximity category, aligned across both snapshots.
    pub value_by_proximity: GroupedSeries,
    /// Proximity record counts for the original snapshot (pie input).
    pub original_proximity_counts: Vec<CategoryCount>,
    /// Proximity record counts for the updated snapshot (pie input).
    pub updated_proximity_counts: Vec<CategoryCount>,
}

/// Outcome of rendering one chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartArtifact {
    /// Chart title.
    pub title: String,
    /// File name of the rendered image, relative to the output directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Error message if rendering failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChartArtifact {
    /// Creates a successfully rendered artifact.
    pub fn rendered(title: &str, file: String) -> Self {
        Self {
            title: title.to_string(),
            file: Some(file),
            error: None,
        }
    }

    /// Creates a failed artifact.
    pub fn failed(title: &str, error: String) -> Self {
        Self {
            title: title.to_string(),
            file: None,
            error: Some(error),
        }
    }
}

/// Metadata about the generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Path of the original snapshot input.
    pub original_path: String,
    /// Path of the updated snapshot input.
    pub updated_path: String,
    /// Date and time of generation.
    pub generated_at: DateTime<Utc>,
    /// Record count of the original snapshot.
    pub original_records: usize,
    /// Record count of the updated snapshot.
    pub updated_records: usize,
    /// Duration of the run in seconds.
    pub duration_seconds: f64,
}

/// The complete comparison report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Metadata about the report.
    pub metadata: ReportMetadata,
    /// Column-wise summaries, one per dataset (original first).
    pub summaries: Vec<DatasetSummary>,
    /// Grouped aggregates behind the comparison charts.
    pub aggregates: Aggregates,
    /// Outcome of every chart, in rendering order.
    pub charts: Vec<ChartArtifact>,
}

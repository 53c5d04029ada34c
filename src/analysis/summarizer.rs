//! Column-wise descriptive summaries.
//!
//! Computes the per-column report shown at the top of the comparison:
//! count/mean/std/min/quartiles/max for numeric columns, and
//! count/unique/top/freq for categorical ones. Every column present in
//! the dataset is summarized; nothing downstream consumes the result.

use crate::analysis::stats;
use crate::models::{
    CategoricalSummary, ColumnReport, ColumnSummary, ColumnValues, Dataset, DatasetSummary,
    NumericSummary,
};
use std::collections::HashMap;

/// Summarize every column of `dataset`.
pub fn summarize(dataset: &Dataset) -> DatasetSummary {
    let columns = dataset
        .columns
        .iter()
        .map(|column| {
            let summary = match &column.values {
                ColumnValues::Numeric(values) => ColumnSummary::Numeric(summarize_numeric(values)),
                ColumnValues::Text(values) => {
                    ColumnSummary::Categorical(summarize_categorical(values))
                }
            };
            ColumnReport {
                name: column.name.clone(),
                summary,
            }
        })
        .collect();

    DatasetSummary {
        label: dataset.label.clone(),
        columns,
    }
}

fn summarize_numeric(values: &[Option<f64>]) -> NumericSummary {
    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    present.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    NumericSummary {
        count: present.len(),
        mean: stats::mean(&present),
        std: stats::std_dev(&present),
        min: present.first().copied(),
        q1: stats::quantile_sorted(&present, 0.25),
        median: stats::quantile_sorted(&present, 0.5),
        q3: stats::quantile_sorted(&present, 0.75),
        max: present.last().copied(),
    }
}

fn summarize_categorical(values: &[String]) -> CategoricalSummary {
    let mut frequencies: HashMap<&str, usize> = HashMap::new();
    let mut count = 0;
    for value in values {
        if value.is_empty() {
            continue;
        }
        count += 1;
        *frequencies.entry(value.as_str()).or_default() += 1;
    }

    // Ties on frequency break lexicographically for a stable report.
    let top = frequencies
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
        .map(|(value, freq)| (value.to_string(), *freq));

    CategoricalSummary {
        count,
        unique: frequencies.len(),
        freq: top.as_ref().map(|(_, freq)| *freq).unwrap_or(0),
        top: top.map(|(value, _)| value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Column;

    fn make_dataset() -> Dataset {
        Dataset {
            label: "1990".to_string(),
            row_count: 4,
            columns: vec![
                Column::numeric(
                    "median_house_value",
                    vec![Some(100.0), Some(200.0), Some(300.0), Some(400.0)],
                ),
                Column::text(
                    "ocean_proximity",
                    vec![
                        "INLAND".to_string(),
                        "NEAR BAY".to_string(),
                        "INLAND".to_string(),
                        String::new(),
                    ],
                ),
            ],
        }
    }

    #[test]
    fn test_summarize_covers_all_columns() {
        let summary = summarize(&make_dataset());
        assert_eq!(summary.label, "1990");
        assert_eq!(summary.columns.len(), 2);
        assert_eq!(summary.columns[0].name, "median_house_value");
        assert_eq!(summary.columns[1].name, "ocean_proximity");
    }

    #[test]
    fn test_numeric_summary() {
        let summary = summarize_numeric(&[Some(100.0), Some(200.0), Some(300.0), Some(400.0)]);
        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, Some(250.0));
        assert_eq!(summary.min, Some(100.0));
        assert_eq!(summary.q1, Some(175.0));
        assert_eq!(summary.median, Some(250.0));
        assert_eq!(summary.q3, Some(325.0));
        assert_eq!(summary.max, Some(400.0));
    }

    #[test]
    fn test_numeric_summary_skips_missing() {
        let summary = summarize_numeric(&[Some(10.0), None, Some(30.0)]);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean, Some(20.0));
    }

    #[test]
    fn test_empty_numeric_summary() {
        let summary = summarize_numeric(&[None, None]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean, None);
        assert_eq!(summary.std, None);
        assert_eq!(summary.median, None);
    }

    #[test]
    fn test_categorical_summary() {
        let summary = summarize(&make_dataset());
        let ColumnSummary::Categorical(cat) = &summary.columns[1].summary else {
            panic!("expected a categorical summary");
        };

        // The empty cell is missing, not a category.
        assert_eq!(cat.count, 3);
        assert_eq!(cat.unique, 2);
        assert_eq!(cat.top.as_deref(), Some("INLAND"));
        assert_eq!(cat.freq, 2);
    }

    #[test]
    fn test_categorical_tie_breaks_lexicographically() {
        let summary = summarize_categorical(&["B".to_string(), "A".to_string()]);
        assert_eq!(summary.top.as_deref(), Some("A"));
        assert_eq!(summary.freq, 1);
    }
}

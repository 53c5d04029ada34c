//! Grouped-mean aggregation for the comparison charts.
//!
//! Both chart dimensions follow the same pattern: group each snapshot's
//! records, compute the mean of `median_house_value` per group, then
//! align the two results on the union of occupied group labels. Groups
//! with no records in one snapshot stay `None`: an absent bar, never a
//! zero-height one.

use crate::models::{
    CategoryCount, Dataset, GroupedSeries, AGE_BIN_EDGES, AGE_BIN_LABELS, PROXIMITY_COLUMN,
    VALUE_COLUMN,
};
use anyhow::{Context, Result};
use std::collections::{BTreeSet, HashMap};

/// Index of the age bin containing `age`, or `None` when out of range.
///
/// Interior bins are left-inclusive, right-exclusive; the overall range
/// is closed at both ends, so 0 lands in the first bin and 100 in the
/// last. Anything above 100, below 0, or non-finite is excluded.
pub fn age_bin_index(age: f64) -> Option<usize> {
    if !age.is_finite() {
        return None;
    }
    if age == AGE_BIN_EDGES[AGE_BIN_EDGES.len() - 1] {
        return Some(AGE_BIN_LABELS.len() - 1);
    }
    AGE_BIN_EDGES
        .windows(2)
        .position(|edge| age >= edge[0] && age < edge[1])
}

/// Mean value per age bin for one snapshot, in taxonomy order.
fn mean_value_by_age_bin(dataset: &Dataset, age_column: &str) -> Result<Vec<Option<f64>>> {
    let ages = dataset
        .numeric(age_column)
        .with_context(|| column_err(dataset, age_column, "numeric"))?;
    let values = dataset
        .numeric(VALUE_COLUMN)
        .with_context(|| column_err(dataset, VALUE_COLUMN, "numeric"))?;

    let mut sums = vec![0.0; AGE_BIN_LABELS.len()];
    let mut counts = vec![0usize; AGE_BIN_LABELS.len()];
    for (age, value) in ages.iter().zip(values) {
        let (Some(age), Some(value)) = (age, value) else {
            continue;
        };
        if let Some(bin) = age_bin_index(*age) {
            sums[bin] += value;
            counts[bin] += 1;
        }
    }

    Ok(sums
        .into_iter()
        .zip(counts)
        .map(|(sum, count)| (count > 0).then(|| sum / count as f64))
        .collect())
}

/// Mean `median_house_value` per housing-age bin, aligned across both
/// snapshots on the union of occupied bins (taxonomy order).
pub fn value_by_age_range(
    original: &Dataset,
    original_age_column: &str,
    updated: &Dataset,
    updated_age_column: &str,
) -> Result<GroupedSeries> {
    let by_bin_original = mean_value_by_age_bin(original, original_age_column)?;
    let by_bin_updated = mean_value_by_age_bin(updated, updated_age_column)?;

    let mut series = GroupedSeries {
        labels: Vec::new(),
        original: Vec::new(),
        updated: Vec::new(),
    };
    for (bin, label) in AGE_BIN_LABELS.iter().enumerate() {
        if by_bin_original[bin].is_some() || by_bin_updated[bin].is_some() {
            series.labels.push(label.to_string());
            series.original.push(by_bin_original[bin]);
            series.updated.push(by_bin_updated[bin]);
        }
    }
    Ok(series)
}

/// Mean value per proximity category for one snapshot.
fn mean_value_by_category(dataset: &Dataset) -> Result<HashMap<String, f64>> {
    let categories = dataset
        .text(PROXIMITY_COLUMN)
        .with_context(|| column_err(dataset, PROXIMITY_COLUMN, "categorical"))?;
    let values = dataset
        .numeric(VALUE_COLUMN)
        .with_context(|| column_err(dataset, VALUE_COLUMN, "numeric"))?;

    let mut groups: HashMap<&str, (f64, usize)> = HashMap::new();
    for (category, value) in categories.iter().zip(values) {
        let Some(value) = value else { continue };
        if category.is_empty() {
            continue;
        }
        let entry = groups.entry(category).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    Ok(groups
        .into_iter()
        .map(|(category, (sum, count))| (category.to_string(), sum / count as f64))
        .collect())
}

/// Mean `median_house_value` per proximity category, aligned across both
/// snapshots on the lexicographically sorted union of categories seen in
/// either one.
pub fn value_by_proximity(original: &Dataset, updated: &Dataset) -> Result<GroupedSeries> {
    let by_category_original = mean_value_by_category(original)?;
    let by_category_updated = mean_value_by_category(updated)?;

    let labels: Vec<String> = by_category_original
        .keys()
        .chain(by_category_updated.keys())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let original_series = labels
        .iter()
        .map(|label| by_category_original.get(label).copied())
        .collect();
    let updated_series = labels
        .iter()
        .map(|label| by_category_updated.get(label).copied())
        .collect();

    Ok(GroupedSeries {
        labels,
        original: original_series,
        updated: updated_series,
    })
}

/// Record counts per proximity category for one snapshot, largest first
/// (ties break by name). This is the pie-chart input.
pub fn category_counts(dataset: &Dataset) -> Result<Vec<CategoryCount>> {
    let categories = dataset
        .text(PROXIMITY_COLUMN)
        .with_context(|| column_err(dataset, PROXIMITY_COLUMN, "categorical"))?;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for category in categories {
        if category.is_empty() {
            continue;
        }
        *counts.entry(category).or_default() += 1;
    }

    let mut counts: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then(a.category.cmp(&b.category)));
    Ok(counts)
}

/// All present `median_house_value` values of one snapshot (box-plot
/// input).
pub fn value_distribution(dataset: &Dataset) -> Result<Vec<f64>> {
    let values = dataset
        .numeric(VALUE_COLUMN)
        .with_context(|| column_err(dataset, VALUE_COLUMN, "numeric"))?;
    Ok(values.iter().flatten().copied().collect())
}

fn column_err(dataset: &Dataset, column: &str, kind: &str) -> String {
    format!(
        "dataset `{}` has no {} column `{}`",
        dataset.label, kind, column
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Column;

    fn make_dataset(label: &str, ages: &[f64], values: &[f64], proximity: &[&str]) -> Dataset {
        Dataset {
            label: label.to_string(),
            row_count: values.len(),
            columns: vec![
                Column::numeric("housing_median_age", ages.iter().map(|a| Some(*a)).collect()),
                Column::numeric(VALUE_COLUMN, values.iter().map(|v| Some(*v)).collect()),
                Column::text(
                    PROXIMITY_COLUMN,
                    proximity.iter().map(|p| p.to_string()).collect(),
                ),
            ],
        }
    }

    #[test]
    fn test_bin_edges_are_left_inclusive() {
        for (bin, edge) in AGE_BIN_EDGES[..AGE_BIN_LABELS.len()].iter().enumerate() {
            assert_eq!(age_bin_index(*edge), Some(bin));
        }
        assert_eq!(age_bin_index(9.999), Some(0));
        assert_eq!(age_bin_index(10.0), Some(1));
    }

    #[test]
    fn test_overall_range_is_closed() {
        assert_eq!(age_bin_index(0.0), Some(0));
        assert_eq!(age_bin_index(100.0), Some(8));
        assert_eq!(age_bin_index(101.0), None);
        assert_eq!(age_bin_index(-1.0), None);
        assert_eq!(age_bin_index(f64::NAN), None);
    }

    #[test]
    fn test_age_means_per_bin() {
        let a = make_dataset(
            "1990",
            &[5.0, 15.0, 25.0],
            &[100.0, 200.0, 300.0],
            &["INLAND", "INLAND", "INLAND"],
        );
        let b = make_dataset("Updated", &[5.0], &[400.0], &["INLAND"]);

        let series = value_by_age_range(&a, "housing_median_age", &b, "housing_median_age").unwrap();
        assert_eq!(series.labels, vec!["0-9", "10-19", "20-29"]);
        assert_eq!(series.original, vec![Some(100.0), Some(200.0), Some(300.0)]);
        assert_eq!(series.updated, vec![Some(400.0), None, None]);
    }

    #[test]
    fn test_union_is_subset_of_taxonomy() {
        let a = make_dataset("1990", &[5.0, 95.0], &[100.0, 200.0], &["INLAND", "INLAND"]);
        let b = make_dataset("Updated", &[45.0], &[300.0], &["INLAND"]);

        let series = value_by_age_range(&a, "housing_median_age", &b, "housing_median_age").unwrap();
        assert!(series.labels.len() <= AGE_BIN_LABELS.len());
        assert!(series
            .labels
            .iter()
            .all(|label| AGE_BIN_LABELS.contains(&label.as_str())));
        assert_eq!(series.labels, vec!["0-9", "40-49", "80+"]);
    }

    #[test]
    fn test_out_of_range_ages_are_excluded() {
        let a = make_dataset(
            "1990",
            &[100.0, 101.0],
            &[500.0, 900.0],
            &["INLAND", "INLAND"],
        );
        let b = make_dataset("Updated", &[100.0], &[700.0], &["INLAND"]);

        let series = value_by_age_range(&a, "housing_median_age", &b, "housing_median_age").unwrap();
        // Age 101 contributes nowhere; age 100 lands in "80+".
        assert_eq!(series.labels, vec!["80+"]);
        assert_eq!(series.original, vec![Some(500.0)]);
        assert_eq!(series.updated, vec![Some(700.0)]);
    }

    #[test]
    fn test_proximity_union_is_sorted_with_gaps() {
        let a = make_dataset(
            "1990",
            &[10.0, 20.0],
            &[100.0, 200.0],
            &["NEAR BAY", "INLAND"],
        );
        let b = make_dataset(
            "Updated",
            &[10.0, 20.0],
            &[300.0, 500.0],
            &["INLAND", "ISLAND"],
        );

        let series = value_by_proximity(&a, &b).unwrap();
        assert_eq!(series.labels, vec!["INLAND", "ISLAND", "NEAR BAY"]);
        assert_eq!(series.original, vec![Some(200.0), None, Some(100.0)]);
        assert_eq!(series.updated, vec![Some(300.0), Some(500.0), None]);
    }

    #[test]
    fn test_missing_group_is_none_not_zero() {
        let a = make_dataset("1990", &[10.0], &[0.0], &["INLAND"]);
        let b = make_dataset("Updated", &[10.0], &[100.0], &["ISLAND"]);

        let series = value_by_proximity(&a, &b).unwrap();
        // A real zero-valued group keeps its zero; an absent group is None.
        assert_eq!(series.original, vec![Some(0.0), None]);
        assert_eq!(series.updated, vec![None, Some(100.0)]);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let a = make_dataset(
            "1990",
            &[5.0, 15.0, 82.0],
            &[100.0, 200.0, 300.0],
            &["NEAR BAY", "INLAND", "INLAND"],
        );
        let b = make_dataset("Updated", &[15.0], &[400.0], &["ISLAND"]);

        let first = value_by_age_range(&a, "housing_median_age", &b, "housing_median_age").unwrap();
        let second = value_by_age_range(&a, "housing_median_age", &b, "housing_median_age").unwrap();
        assert_eq!(first, second);

        assert_eq!(
            value_by_proximity(&a, &b).unwrap(),
            value_by_proximity(&a, &b).unwrap()
        );
    }

    #[test]
    fn test_category_counts_ordering() {
        let a = make_dataset(
            "1990",
            &[1.0, 2.0, 3.0, 4.0],
            &[1.0, 2.0, 3.0, 4.0],
            &["INLAND", "NEAR BAY", "INLAND", "ISLAND"],
        );

        let counts = category_counts(&a).unwrap();
        assert_eq!(counts[0].category, "INLAND");
        assert_eq!(counts[0].count, 2);
        // Tied counts fall back to name order.
        assert_eq!(counts[1].category, "ISLAND");
        assert_eq!(counts[2].category, "NEAR BAY");
    }

    #[test]
    fn test_value_distribution_skips_missing() {
        let dataset = Dataset {
            label: "1990".to_string(),
            row_count: 3,
            columns: vec![Column::numeric(
                VALUE_COLUMN,
                vec![Some(1.0), None, Some(3.0)],
            )],
        };
        assert_eq!(value_distribution(&dataset).unwrap(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_missing_value_column_is_an_error() {
        let dataset = Dataset {
            label: "1990".to_string(),
            row_count: 0,
            columns: Vec::new(),
        };
        assert!(value_distribution(&dataset).is_err());
    }
}

//! CSV dataset loading.
//!
//! This module reads one housing snapshot into a column-oriented
//! [`Dataset`], checking the schema against the configured column
//! mapping. Loading is fail-fast: any error aborts the run, there are
//! no retries and no partially loaded datasets.

use crate::config::SourceConfig;
use crate::models::{Column, ColumnValues, Dataset, PROXIMITY_COLUMN, VALUE_COLUMN};
use std::fs::File;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while loading a snapshot.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input file is missing or unreadable.
    #[error("cannot read {path}: {source}")]
    FileAccess {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A required column is absent from the header.
    #[error("{path}: required column `{column}` is missing")]
    Schema { path: String, column: String },

    /// The file is not well-formed CSV (e.g. a ragged row).
    #[error("{path}: malformed CSV: {source}")]
    Malformed {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Load one snapshot described by `source`.
///
/// The header must contain `median_house_value`, `ocean_proximity`, and
/// the age column named in the mapping; the age column is resolved by
/// dataset identity, never by sniffing the header.
pub fn load_dataset(source: &SourceConfig) -> Result<Dataset, LoadError> {
    let path = Path::new(&source.path);
    let display = source.path.clone();

    let file = File::open(path).map_err(|e| LoadError::FileAccess {
        path: display.clone(),
        source: e,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::Malformed {
            path: display.clone(),
            source: e,
        })?
        .iter()
        .map(str::to_string)
        .collect();

    for required in [VALUE_COLUMN, PROXIMITY_COLUMN, source.age_column.as_str()] {
        if !headers.iter().any(|h| h == required) {
            return Err(LoadError::Schema {
                path: display,
                column: required.to_string(),
            });
        }
    }

    // Materialize column-wise; the reader rejects ragged rows itself.
    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    let mut row_count = 0;
    for record in reader.records() {
        let record = record.map_err(|e| LoadError::Malformed {
            path: display.clone(),
            source: e,
        })?;
        for (column, field) in cells.iter_mut().zip(record.iter()) {
            column.push(field.to_string());
        }
        row_count += 1;
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| infer_column(name, raw))
        .collect();

    info!("Loaded {} records from {}", row_count, source.path);
    Ok(Dataset {
        label: source.label.clone(),
        row_count,
        columns,
    })
}

/// Decide the column type from its raw cells.
///
/// Numeric when at least one cell is non-empty and every non-empty cell
/// parses as `f64` (empty cells become `None`); text otherwise.
fn infer_column(name: String, raw: Vec<String>) -> Column {
    let mut parsed = Vec::with_capacity(raw.len());
    let mut any_value = false;

    for cell in &raw {
        let cell = cell.trim();
        if cell.is_empty() {
            parsed.push(None);
        } else if let Ok(value) = cell.parse::<f64>() {
            parsed.push(Some(value));
            any_value = true;
        } else {
            debug!("Column `{}` is not numeric (cell `{}`)", name, cell);
            return Column {
                name,
                values: ColumnValues::Text(raw),
            };
        }
    }

    if any_value {
        Column {
            name,
            values: ColumnValues::Numeric(parsed),
        }
    } else {
        Column {
            name,
            values: ColumnValues::Text(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> (tempfile::TempDir, SourceConfig) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.csv");
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();

        let source = SourceConfig {
            path: path.to_string_lossy().to_string(),
            label: "1990".to_string(),
            age_column: "housing_median_age".to_string(),
        };
        (dir, source)
    }

    #[test]
    fn test_load_dataset() {
        let (_dir, source) = write_csv(
            "housing_median_age,median_house_value,ocean_proximity\n\
             15,100000,NEAR BAY\n\
             42,250000,INLAND\n",
        );

        let dataset = load_dataset(&source).unwrap();
        assert_eq!(dataset.label, "1990");
        assert_eq!(dataset.row_count, 2);
        assert_eq!(
            dataset.numeric("median_house_value"),
            Some(&[Some(100000.0), Some(250000.0)][..])
        );
        assert_eq!(
            dataset.text("ocean_proximity"),
            Some(&["NEAR BAY".to_string(), "INLAND".to_string()][..])
        );
    }

    #[test]
    fn test_missing_file_is_file_access() {
        let source = SourceConfig {
            path: "/nonexistent/snapshot.csv".to_string(),
            label: "1990".to_string(),
            age_column: "housing_median_age".to_string(),
        };

        match load_dataset(&source) {
            Err(LoadError::FileAccess { path, .. }) => {
                assert_eq!(path, "/nonexistent/snapshot.csv")
            }
            other => panic!("expected FileAccess, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let (_dir, source) = write_csv(
            "housing_median_age,median_house_value\n\
             15,100000\n",
        );

        match load_dataset(&source) {
            Err(LoadError::Schema { column, .. }) => assert_eq!(column, "ocean_proximity"),
            other => panic!("expected Schema, got {:?}", other),
        }
    }

    #[test]
    fn test_age_column_checked_by_mapping() {
        // The updated snapshot names its age column differently; the
        // mapping decides what to require, not the header contents.
        let (_dir, mut source) = write_csv(
            "average_house_age,median_house_value,ocean_proximity\n\
             15,100000,INLAND\n",
        );

        assert!(matches!(
            load_dataset(&source),
            Err(LoadError::Schema { .. })
        ));

        source.age_column = "average_house_age".to_string();
        assert!(load_dataset(&source).is_ok());
    }

    #[test]
    fn test_ragged_row_is_malformed() {
        let (_dir, source) = write_csv(
            "housing_median_age,median_house_value,ocean_proximity\n\
             15,100000\n",
        );

        assert!(matches!(
            load_dataset(&source),
            Err(LoadError::Malformed { .. })
        ));
    }

    #[test]
    fn test_numeric_inference_with_gaps() {
        let (_dir, source) = write_csv(
            "housing_median_age,median_house_value,ocean_proximity\n\
             15,,NEAR BAY\n\
             42,250000,INLAND\n",
        );

        let dataset = load_dataset(&source).unwrap();
        assert_eq!(
            dataset.numeric("median_house_value"),
            Some(&[None, Some(250000.0)][..])
        );
    }
}

//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.housingcmp.toml` files. The `[data]` section carries the explicit
//! per-dataset field mapping: each snapshot names its own age column,
//! so the loader never has to sniff headers.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input data settings.
    #[serde(default)]
    pub data: DataConfig,

    /// Chart settings.
    #[serde(default)]
    pub charts: ChartsConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Input snapshot settings, including the per-dataset column mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path of the original snapshot.
    #[serde(default = "default_original_path")]
    pub original_path: String,

    /// Label of the original snapshot in charts and tables.
    #[serde(default = "default_original_label")]
    pub original_label: String,

    /// Age column name in the original snapshot.
    #[serde(default = "default_original_age_column")]
    pub original_age_column: String,

    /// Path of the updated snapshot.
    #[serde(default = "default_updated_path")]
    pub updated_path: String,

    /// Label of the updated snapshot in charts and tables.
    #[serde(default = "default_updated_label")]
    pub updated_label: String,

    /// Age column name in the updated snapshot.
    #[serde(default = "default_updated_age_column")]
    pub updated_age_column: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            original_path: default_original_path(),
            original_label: default_original_label(),
            original_age_column: default_original_age_column(),
            updated_path: default_updated_path(),
            updated_label: default_updated_label(),
            updated_age_column: default_updated_age_column(),
        }
    }
}

fn default_original_path() -> String {
    "cleaned_california_housing_1990.csv".to_string()
}

fn default_original_label() -> String {
    "1990".to_string()
}

fn default_original_age_column() -> String {
    "housing_median_age".to_string()
}

fn default_updated_path() -> String {
    "cleaned_california_housing_updated.csv".to_string()
}

fn default_updated_label() -> String {
    "Updated".to_string()
}

fn default_updated_age_column() -> String {
    "average_house_age".to_string()
}

/// Everything the loader needs to read one snapshot.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Input file path.
    pub path: String,
    /// Dataset label.
    pub label: String,
    /// Name of the age column in this snapshot.
    pub age_column: String,
}

impl DataConfig {
    /// The original snapshot's source description.
    pub fn original_source(&self) -> SourceConfig {
        SourceConfig {
            path: self.original_path.clone(),
            label: self.original_label.clone(),
            age_column: self.original_age_column.clone(),
        }
    }

    /// The updated snapshot's source description.
    pub fn updated_source(&self) -> SourceConfig {
        SourceConfig {
            path: self.updated_path.clone(),
            label: self.updated_label.clone(),
            age_column: self.updated_age_column.clone(),
        }
    }
}

/// Chart rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartsConfig {
    /// Figure width in pixels.
    #[serde(default = "default_chart_width")]
    pub width: u32,

    /// Figure height in pixels.
    #[serde(default = "default_chart_height")]
    pub height: u32,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
        }
    }
}

fn default_chart_width() -> u32 {
    1000
}

fn default_chart_height() -> u32 {
    500
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output directory for the report and the rendered charts.
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Report file name inside the output directory.
    #[serde(default = "default_report_file")]
    pub output: String,

    /// Render charts and embed them in the report.
    #[serde(default = "default_true")]
    pub include_charts: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            output: default_report_file(),
            include_charts: true,
        }
    }
}

fn default_out_dir() -> String {
    "report".to_string()
}

fn default_report_file() -> String {
    "housing_report.md".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists
    /// but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".housingcmp.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings; only
    /// explicitly provided values override.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref original) = args.original {
            self.data.original_path = original.display().to_string();
        }
        if let Some(ref updated) = args.updated {
            self.data.updated_path = updated.display().to_string();
        }
        if let Some(ref out_dir) = args.out_dir {
            self.report.out_dir = out_dir.display().to_string();
        }
        if args.no_charts {
            self.report.include_charts = false;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(
            config.data.original_path,
            "cleaned_california_housing_1990.csv"
        );
        assert_eq!(config.data.original_age_column, "housing_median_age");
        assert_eq!(config.data.updated_age_column, "average_house_age");
        assert_eq!(config.charts.width, 1000);
        assert!(config.report.include_charts);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[data]
original_path = "a.csv"
updated_path = "b.csv"
updated_label = "2024"

[charts]
width = 800

[report]
out_dir = "out"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.data.original_path, "a.csv");
        assert_eq!(config.data.updated_path, "b.csv");
        assert_eq!(config.data.updated_label, "2024");
        // Unspecified fields keep their defaults.
        assert_eq!(config.data.original_label, "1990");
        assert_eq!(config.charts.width, 800);
        assert_eq!(config.charts.height, 500);
        assert_eq!(config.report.out_dir, "out");
    }

    #[test]
    fn test_source_mapping_is_per_dataset() {
        let config = Config::default();
        assert_eq!(
            config.data.original_source().age_column,
            "housing_median_age"
        );
        assert_eq!(config.data.updated_source().age_column, "average_house_age");
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[data]"));
        assert!(toml_str.contains("[charts]"));
        assert!(toml_str.contains("[report]"));
    }
}

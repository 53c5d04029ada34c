//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// HousingCmp - visual comparison reports for California housing snapshots
///
/// Load two cleaned housing CSV snapshots, compute descriptive summaries
/// and grouped aggregates, render comparison charts, and write a
/// Markdown or JSON report.
///
/// Examples:
///   housingcmp
///   housingcmp --original 1990.csv --updated 2024.csv
///   housingcmp --out-dir comparison --format json
///   housingcmp --no-charts
///   housingcmp --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the original housing snapshot CSV
    ///
    /// Defaults to the path from .housingcmp.toml.
    #[arg(long, value_name = "FILE", env = "HOUSINGCMP_ORIGINAL")]
    pub original: Option<PathBuf>,

    /// Path to the updated housing snapshot CSV
    ///
    /// Defaults to the path from .housingcmp.toml.
    #[arg(long, value_name = "FILE", env = "HOUSINGCMP_UPDATED")]
    pub updated: Option<PathBuf>,

    /// Output directory for the report and rendered charts
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Report format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for .housingcmp.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Compute summaries and aggregates but skip chart rendering
    #[arg(long)]
    pub no_charts: bool,

    /// Abort on the first chart that fails to render
    ///
    /// By default a failed chart is logged and skipped while the
    /// remaining charts are still attempted (exit code 2).
    #[arg(long)]
    pub fail_fast: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .housingcmp.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // The two snapshots must be distinct inputs
        if let (Some(original), Some(updated)) = (&self.original, &self.updated) {
            if original == updated {
                return Err("Original and updated snapshots must be different files".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.no_charts && self.fail_fast {
            return Err("--fail-fast has no effect with --no-charts".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

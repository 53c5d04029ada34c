//! HousingCmp - California Housing Snapshot Comparison
//!
//! A CLI tool that loads two cleaned California housing CSV snapshots,
//! computes descriptive statistics and grouped aggregates, renders
//! comparison charts, and writes a Markdown or JSON report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (unreadable input, missing column, report IO)
//!   2 - Report written, but one or more charts failed to render

mod analysis;
mod chart;
mod cli;
mod config;
mod loader;
mod models;
mod report;

use analysis::{
    category_counts, summarize, value_by_age_range, value_by_proximity, value_distribution,
};
use anyhow::{Context, Result};
use chart::ChartRenderer;
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use models::{Aggregates, Report, ReportMetadata};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // Initialize logging
    init_logging(&args);

    info!("HousingCmp v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Generate the report
    match run_report(args) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Report generation failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .housingcmp.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".housingcmp.toml");

    if path.exists() {
        eprintln!("⚠️  .housingcmp.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .housingcmp.toml")?;

    println!("✅ Created .housingcmp.toml with default settings.");
    println!("   Edit it to customize input paths, labels, and the age column mapping.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete comparison workflow. Returns exit code (0 or 2).
fn run_report(args: Args) -> Result<i32> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Step 1: load both snapshots
    println!("📂 Loading datasets...");
    let original_source = config.data.original_source();
    let updated_source = config.data.updated_source();
    let original = loader::load_dataset(&original_source)?;
    let updated = loader::load_dataset(&updated_source)?;
    println!("   {}: {} records", original.label, original.row_count);
    println!("   {}: {} records", updated.label, updated.row_count);

    // Step 2: column-wise descriptive summaries
    println!("🧮 Computing summaries...");
    let summaries = vec![summarize(&original), summarize(&updated)];

    // Step 3: grouped aggregates along both dimensions
    let aggregates = Aggregates {
        value_by_age: value_by_age_range(
            &original,
            &original_source.age_column,
            &updated,
            &updated_source.age_column,
        )?,
        value_by_proximity: value_by_proximity(&original, &updated)?,
        original_proximity_counts: category_counts(&original)?,
        updated_proximity_counts: category_counts(&updated)?,
    };

    // Step 4: render charts into the output directory
    let out_dir = PathBuf::from(&config.report.out_dir);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let charts = if config.report.include_charts {
        println!("📊 Rendering charts...");
        let renderer = ChartRenderer::new(
            out_dir.clone(),
            config.charts.width,
            config.charts.height,
            original.label.clone(),
            updated.label.clone(),
        );
        let original_values = value_distribution(&original)?;
        let updated_values = value_distribution(&updated)?;
        chart::render_all(
            &renderer,
            &aggregates,
            &original_values,
            &updated_values,
            args.fail_fast,
        )?
    } else {
        info!("Chart rendering disabled (--no-charts)");
        Vec::new()
    };

    let charts_failed = charts.iter().filter(|c| c.error.is_some()).count();
    let charts_rendered = charts.len() - charts_failed;

    // Step 5: build and write the report
    println!("📝 Generating report...");
    let metadata = ReportMetadata {
        original_path: original_source.path.clone(),
        updated_path: updated_source.path.clone(),
        generated_at: Utc::now(),
        original_records: original.row_count,
        updated_records: updated.row_count,
        duration_seconds: start_time.elapsed().as_secs_f64(),
    };
    let report = Report {
        metadata,
        summaries,
        aggregates,
        charts,
    };

    let mut report_path = out_dir.join(&config.report.output);
    let output = match args.format {
        OutputFormat::Markdown => report::generate_markdown_report(&report),
        OutputFormat::Json => {
            report_path.set_extension("json");
            report::generate_json_report(&report)?
        }
    };

    std::fs::write(&report_path, &output)
        .with_context(|| format!("Failed to write report to {}", report_path.display()))?;

    // Print summary
    println!("\n📈 Comparison Summary:");
    println!(
        "   Records: {} ({}) vs {} ({})",
        report.metadata.original_records,
        original.label,
        report.metadata.updated_records,
        updated.label
    );
    println!(
        "   Age bins occupied: {} | Proximity categories: {}",
        report.aggregates.value_by_age.labels.len(),
        report.aggregates.value_by_proximity.labels.len()
    );
    if config.report.include_charts {
        println!(
            "   Charts rendered: {}/{}",
            charts_rendered,
            report.charts.len()
        );
    }
    println!(
        "\n✅ Report saved to: {} ({:.1}s)",
        report_path.display(),
        report.metadata.duration_seconds
    );

    if charts_failed > 0 {
        eprintln!(
            "\n⚠️  {} chart(s) failed to render; see the report for details (exit code 2).",
            charts_failed
        );
        return Ok(2);
    }

    Ok(0)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .housingcmp.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

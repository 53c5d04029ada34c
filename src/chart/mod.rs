//! Chart rendering.
//!
//! The presenter draws the four comparison figures in a fixed order.
//! The charts are independent, so a figure that fails to render is
//! logged and recorded while the remaining ones are still attempted;
//! `fail_fast` aborts on the first failure instead.

pub mod renderer;

pub use renderer::ChartRenderer;

use crate::models::{Aggregates, ChartArtifact};
use anyhow::Result;
use std::path::PathBuf;
use tracing::{info, warn};

/// Render every figure, in order: proximity pies, value by age range,
/// value by proximity, value distribution box plot.
pub fn render_all(
    renderer: &ChartRenderer,
    aggregates: &Aggregates,
    original_values: &[f64],
    updated_values: &[f64],
    fail_fast: bool,
) -> Result<Vec<ChartArtifact>> {
    type Job<'a> = (&'static str, Box<dyn FnOnce() -> Result<PathBuf> + 'a>);

    let jobs: Vec<Job<'_>> = vec![
        (
            "Ocean Proximity Distribution",
            Box::new(|| {
                renderer.render_proximity_pies(
                    &aggregates.original_proximity_counts,
                    &aggregates.updated_proximity_counts,
                )
            }),
        ),
        (
            "Median House Value by Housing Age Range",
            Box::new(|| renderer.render_age_bars(&aggregates.value_by_age)),
        ),
        (
            "Median House Value by Ocean Proximity",
            Box::new(|| renderer.render_proximity_bars(&aggregates.value_by_proximity)),
        ),
        (
            "Distribution of Median House Values",
            Box::new(|| renderer.render_value_boxplot(original_values, updated_values)),
        ),
    ];

    let mut artifacts = Vec::with_capacity(jobs.len());
    for (title, job) in jobs {
        match job() {
            Ok(path) => {
                info!("Rendered chart: {}", path.display());
                let file = path
                    .file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_default();
                artifacts.push(ChartArtifact::rendered(title, file));
            }
            Err(e) if fail_fast => {
                return Err(e.context(format!("failed to render `{}`", title)))
            }
            Err(e) => {
                warn!("Chart `{}` failed: {:#}", title, e);
                artifacts.push(ChartArtifact::failed(title, format!("{:#}", e)));
            }
        }
    }
    Ok(artifacts)
}

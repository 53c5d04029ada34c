//! Chart rendering with the plotters bitmap backend.
//!
//! Each public method draws one figure into the output directory and
//! returns the file path. Missing group means are drawn as gaps: no
//! rectangle is emitted for a `None` entry, so an absent group never
//! shows up as a zero-height bar.

use crate::models::{CategoryCount, GroupedSeries};
use anyhow::{bail, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::PathBuf;

/// Width of one bar in group units; the original bar sits left of the
/// group center, the updated bar right of it.
const BAR_WIDTH: f64 = 0.35;

/// Series colors: original snapshot, updated snapshot.
const SERIES_COLORS: [RGBColor; 2] = [RGBColor(31, 119, 180), RGBColor(255, 127, 14)];

/// Renders the comparison figures as PNG files.
pub struct ChartRenderer {
    out_dir: PathBuf,
    width: u32,
    height: u32,
    original_label: String,
    updated_label: String,
}

impl ChartRenderer {
    /// Create a renderer writing `width` x `height` figures into `out_dir`.
    pub fn new(
        out_dir: PathBuf,
        width: u32,
        height: u32,
        original_label: String,
        updated_label: String,
    ) -> Self {
        Self {
            out_dir,
            width,
            height,
            original_label,
            updated_label,
        }
    }

    /// Two pie charts side by side: proportion of records per proximity
    /// category, one pie per snapshot.
    pub fn render_proximity_pies(
        &self,
        original: &[CategoryCount],
        updated: &[CategoryCount],
    ) -> Result<PathBuf> {
        if original.is_empty() || updated.is_empty() {
            bail!("no proximity categories to draw");
        }

        let path = self.out_dir.join("ocean_proximity_distribution.png");
        {
            let root =
                BitMapBackend::new(&path, (self.width, self.height)).into_drawing_area();
            root.fill(&WHITE)?;

            let (left, right) = root.split_horizontally((self.width / 2) as i32);
            self.draw_pie(
                &left,
                original,
                &format!("Ocean Proximity - {}", self.original_label),
            )?;
            self.draw_pie(
                &right,
                updated,
                &format!("Ocean Proximity - {}", self.updated_label),
            )?;
            root.present()?;
        }
        Ok(path)
    }

    fn draw_pie(
        &self,
        area: &DrawingArea<BitMapBackend<'_>, Shift>,
        counts: &[CategoryCount],
        title: &str,
    ) -> Result<()> {
        let area = area.titled(title, ("sans-serif", 20))?;
        let (w, h) = area.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);
        let radius = f64::from(w.min(h)) * 0.3;

        let sizes: Vec<f64> = counts.iter().map(|c| c.count as f64).collect();
        let labels = slice_labels(counts);
        let colors: Vec<RGBColor> = (0..counts.len())
            .map(|i| {
                let (r, g, b) = Palette99::COLORS[i % Palette99::COLORS.len()];
                RGBColor(r, g, b)
            })
            .collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.label_style(("sans-serif", 14).into_font().color(&BLACK));
        area.draw(&pie)?;
        Ok(())
    }

    /// Grouped bar chart of mean value per age bin.
    pub fn render_age_bars(&self, series: &GroupedSeries) -> Result<PathBuf> {
        self.draw_grouped_bars(
            "value_by_age_range.png",
            "Comparison of Housing Median Age and Value",
            "Housing Age Range",
            series,
        )
    }

    /// Grouped bar chart of mean value per proximity category.
    pub fn render_proximity_bars(&self, series: &GroupedSeries) -> Result<PathBuf> {
        self.draw_grouped_bars(
            "value_by_ocean_proximity.png",
            "Comparison of Median House Value by Ocean Proximity",
            "Ocean Proximity",
            series,
        )
    }

    fn draw_grouped_bars(
        &self,
        file_name: &str,
        title: &str,
        x_desc: &str,
        series: &GroupedSeries,
    ) -> Result<PathBuf> {
        let Some(y_max) = series
            .original
            .iter()
            .chain(series.updated.iter())
            .flatten()
            .copied()
            .reduce(f64::max)
        else {
            bail!("no occupied groups to draw");
        };

        let n = series.labels.len();
        let path = self.out_dir.join(file_name);
        {
            let root =
                BitMapBackend::new(&path, (self.width, self.height)).into_drawing_area();
            root.fill(&WHITE)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(title, ("sans-serif", 22))
                .margin(10)
                .x_label_area_size(40)
                .y_label_area_size(80)
                .build_cartesian_2d(-0.6f64..(n as f64 - 0.4), 0.0..y_max * 1.1)?;

            let labels = &series.labels;
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(n)
                .x_label_formatter(&|x: &f64| {
                    let nearest = x.round();
                    if (x - nearest).abs() > 1e-6 || nearest < 0.0 || nearest >= n as f64 {
                        return String::new();
                    }
                    labels[nearest as usize].clone()
                })
                .x_desc(x_desc)
                .y_desc("Average Median House Value ($)")
                .draw()?;

            chart
                .draw_series(bars(&series.original, -BAR_WIDTH, SERIES_COLORS[0]))?
                .label(self.original_label.as_str())
                .legend(|(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], SERIES_COLORS[0].filled())
                });
            chart
                .draw_series(bars(&series.updated, 0.0, SERIES_COLORS[1]))?
                .label(self.updated_label.as_str())
                .legend(|(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], SERIES_COLORS[1].filled())
                });

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
            root.present()?;
        }
        Ok(path)
    }

    /// Box plot comparing the full value distribution of both snapshots.
    pub fn render_value_boxplot(&self, original: &[f64], updated: &[f64]) -> Result<PathBuf> {
        if original.is_empty() || updated.is_empty() {
            bail!("value distribution is empty");
        }

        let path = self.out_dir.join("value_distribution.png");
        {
            let root =
                BitMapBackend::new(&path, (self.width, self.height)).into_drawing_area();
            root.fill(&WHITE)?;

            let labels = [self.original_label.as_str(), self.updated_label.as_str()];
            let quartiles = [Quartiles::new(original), Quartiles::new(updated)];

            let mut lo = f32::INFINITY;
            let mut hi = f32::NEG_INFINITY;
            for value in quartiles.iter().flat_map(|q| q.values()) {
                lo = lo.min(value);
                hi = hi.max(value);
            }
            let pad = (hi - lo).max(1.0) * 0.05;

            let mut chart = ChartBuilder::on(&root)
                .caption(
                    "Comparison of Median House Value Distributions",
                    ("sans-serif", 22),
                )
                .margin(10)
                .x_label_area_size(40)
                .y_label_area_size(80)
                .build_cartesian_2d(labels[..].into_segmented(), (lo - pad)..(hi + pad))?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .y_desc("Median House Value ($)")
                .draw()?;

            chart.draw_series(vec![
                Boxplot::new_vertical(SegmentValue::CenterOf(&labels[0]), &quartiles[0])
                    .width(self.width.min(120))
                    .whisker_width(0.5)
                    .style(SERIES_COLORS[0]),
                Boxplot::new_vertical(SegmentValue::CenterOf(&labels[1]), &quartiles[1])
                    .width(self.width.min(120))
                    .whisker_width(0.5)
                    .style(SERIES_COLORS[1]),
            ])?;
            root.present()?;
        }
        Ok(path)
    }
}

/// Bars for one series at `offset` from each group center; `None` means
/// no bar.
fn bars(values: &[Option<f64>], offset: f64, color: RGBColor) -> Vec<Rectangle<(f64, f64)>> {
    values
        .iter()
        .enumerate()
        .filter_map(|(group, value)| {
            value.map(|v| {
                let x = group as f64 + offset;
                Rectangle::new([(x, 0.0), (x + BAR_WIDTH, v)], color.filled())
            })
        })
        .collect()
}

/// Pie slice labels: category name plus its share of records, one
/// decimal place.
fn slice_labels(counts: &[CategoryCount]) -> Vec<String> {
    let total: usize = counts.iter().map(|c| c.count).sum();
    counts
        .iter()
        .map(|c| {
            let pct = if total == 0 {
                0.0
            } else {
                c.count as f64 * 100.0 / total as f64
            };
            format!("{} ({:.1}%)", c.category, pct)
        })
        .collect()
}

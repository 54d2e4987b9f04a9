use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use polars::prelude::DataFrame;
use tracing::{debug, info};

use crate::charts::{self, Crosstab, HistogramBin};
use crate::error::{PipelineError, Result};

pub const TOP_CLASSIFICATIONS_FILE: &str = "bar_top_classifications.svg";
pub const MEDIUM_LENGTH_FILE: &str = "hist_medium_len.svg";
pub const YEARS_FILE: &str = "hist_years.svg";
pub const HEATMAP_FILE: &str = "heatmap_class_publicdomain.svg";

const TOP_CLASSIFICATION_LIMIT: usize = 10;
const MEDIUM_LENGTH_BINS: usize = 20;
const YEAR_BINS: usize = 15;
const FONT: &str = "sans-serif";

fn plot_err(err: impl Display) -> PipelineError {
    PipelineError::Visualize(err.to_string())
}

/// Renders every chart for the cleaned dataset into `outdir` and returns the files
/// written. The year histogram is skipped when no row has a year.
pub fn visualize(df: &DataFrame, outdir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(outdir)?;
    let mut written = Vec::new();

    let top = charts::top_classifications(df, TOP_CLASSIFICATION_LIMIT)?;
    let path = outdir.join(TOP_CLASSIFICATIONS_FILE);
    draw_top_classifications(&path, &top)?;
    written.push(path);

    let lengths: Vec<f64> = charts::medium_lengths(df)?
        .into_iter()
        .map(|len| len as f64)
        .collect();
    let path = outdir.join(MEDIUM_LENGTH_FILE);
    draw_histogram(
        &path,
        "Distribution of medium text length (proxy for detail)",
        "Characters",
        &charts::histogram(&lengths, MEDIUM_LENGTH_BINS),
    )?;
    written.push(path);

    let years: Vec<f64> = charts::extracted_years(df)?
        .into_iter()
        .map(|year| year as f64)
        .collect();
    if years.is_empty() {
        debug!("no extracted years; skipping year histogram");
    } else {
        let path = outdir.join(YEARS_FILE);
        draw_histogram(
            &path,
            "Distribution of Extracted Years (heuristic)",
            "Year",
            &charts::histogram(&years, YEAR_BINS),
        )?;
        written.push(path);
    }

    let table = charts::classification_by_public_domain(df)?;
    let path = outdir.join(HEATMAP_FILE);
    draw_heatmap(&path, &table)?;
    written.push(path);

    info!(outdir = %outdir.display(), charts = written.len(), "charts rendered");
    Ok(written)
}

fn draw_top_classifications(path: &Path, top: &[(String, usize)]) -> Result<()> {
    let root = SVGBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let rows = top.len().max(1) as u32;
    let max_count = top.iter().map(|(_, count)| *count).max().unwrap_or(0) as u32 + 1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Top Classifications in Sample", (FONT, 24))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(180)
        .build_cartesian_2d(0u32..max_count, (0u32..rows).into_segmented())
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(rows as usize)
        .y_label_formatter(&|value| match value {
            SegmentValue::CenterOf(idx) => top
                .get(*idx as usize)
                .map(|(name, _)| name.clone())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc("Count")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(top.iter().enumerate().map(|(idx, (_, count))| {
            let idx = idx as u32;
            Rectangle::new(
                [
                    (0, SegmentValue::Exact(idx)),
                    (*count as u32, SegmentValue::Exact(idx + 1)),
                ],
                BLUE.mix(0.7).filled(),
            )
        }))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

fn draw_histogram(path: &Path, title: &str, x_desc: &str, bins: &[HistogramBin]) -> Result<()> {
    let root = SVGBackend::new(path, (1000, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let x_start = bins.first().map_or(0.0, |bin| bin.start);
    let x_end = bins.last().map_or(1.0, |bin| bin.end);
    let max_count = bins.iter().map(|bin| bin.count).max().unwrap_or(0) as u32 + 1;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 24))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_start..x_end, 0u32..max_count)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc("Count")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(bins.iter().map(|bin| {
            Rectangle::new(
                [(bin.start, 0), (bin.end, bin.count as u32)],
                BLUE.mix(0.6).filled(),
            )
        }))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

// Light yellow to dark blue.
fn heat_color(ratio: f64) -> RGBColor {
    let lerp = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * ratio).round() as u8;
    RGBColor(lerp(255, 8), lerp(255, 29), lerp(217, 88))
}

fn draw_heatmap(path: &Path, table: &Crosstab) -> Result<()> {
    let root = SVGBackend::new(path, (1000, 800)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let rows = table.rows.len().max(1) as u32;
    let cols = table.columns.len().max(1) as u32;
    let max_count = table.max_count().max(1) as f64;

    let mut chart = ChartBuilder::on(&root)
        .caption("Heatmap: Classification vs Public Domain flag", (FONT, 24))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(180)
        .build_cartesian_2d((0u32..cols).into_segmented(), (0u32..rows).into_segmented())
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(cols as usize)
        .y_labels(rows as usize)
        .x_label_formatter(&|value| match value {
            SegmentValue::CenterOf(idx) => table
                .columns
                .get(*idx as usize)
                .map(|flag| flag.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .y_label_formatter(&|value| match value {
            SegmentValue::CenterOf(idx) => {
                table.rows.get(*idx as usize).cloned().unwrap_or_default()
            }
            _ => String::new(),
        })
        .x_desc("isPublicDomain")
        .y_desc("classification")
        .draw()
        .map_err(plot_err)?;

    let cells: Vec<(u32, u32, usize)> = table
        .counts
        .iter()
        .enumerate()
        .flat_map(|(row, counts)| {
            counts
                .iter()
                .enumerate()
                .map(move |(col, count)| (row as u32, col as u32, *count))
        })
        .collect();

    chart
        .draw_series(cells.iter().map(|&(row, col, count)| {
            Rectangle::new(
                [
                    (SegmentValue::Exact(col), SegmentValue::Exact(row)),
                    (SegmentValue::Exact(col + 1), SegmentValue::Exact(row + 1)),
                ],
                heat_color(count as f64 / max_count).filled(),
            )
        }))
        .map_err(plot_err)?;

    chart
        .draw_series(cells.iter().map(|&(row, col, count)| {
            let color = if count as f64 / max_count > 0.5 { WHITE } else { BLACK };
            Text::new(
                count.to_string(),
                (SegmentValue::CenterOf(col), SegmentValue::CenterOf(row)),
                (FONT, 16).into_font().color(&color),
            )
        }))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

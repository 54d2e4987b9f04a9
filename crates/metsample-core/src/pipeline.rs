use std::path::PathBuf;

use polars::prelude::DataFrame;
use tracing::info;

use crate::catalog::CatalogSource;
use crate::cleaner;
use crate::collector::{collect, CollectRequest, FetchFailure};
use crate::error::Result;
use crate::model::YEAR_COLUMN;
use crate::outputs::write_csv;
use crate::visualize::visualize;

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub request: CollectRequest,
    pub csv_path: PathBuf,
    /// Chart directory; `None` skips rendering.
    pub charts_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub struct PipelineReport {
    pub ids_found: usize,
    pub failures: Vec<FetchFailure>,
    /// Cleaned dataset as written to `csv_path`.
    pub dataset: DataFrame,
    pub csv_path: PathBuf,
    pub charts: Vec<PathBuf>,
}

impl PipelineReport {
    pub fn rows(&self) -> usize {
        self.dataset.height()
    }

    pub fn rows_with_year(&self) -> usize {
        self.dataset
            .column(YEAR_COLUMN)
            .map(|column| column.len() - column.null_count())
            .unwrap_or(0)
    }
}

/// Collect, flatten, clean, write the CSV and optionally render charts.
pub async fn run_pipeline<S>(source: &S, options: &PipelineOptions) -> Result<PipelineReport>
where
    S: CatalogSource + ?Sized,
{
    let collection = collect(source, &options.request).await?;
    let raw = collection.to_dataframe()?;
    let dataset = cleaner::clean(&raw)?;

    write_csv(&dataset, &options.csv_path)?;

    let charts = match options.charts_dir.as_deref() {
        Some(dir) => visualize(&dataset, dir)?,
        None => {
            info!("chart rendering skipped");
            Vec::new()
        }
    };

    Ok(PipelineReport {
        ids_found: collection.ids_found,
        failures: collection.failures,
        dataset,
        csv_path: options.csv_path.clone(),
        charts,
    })
}

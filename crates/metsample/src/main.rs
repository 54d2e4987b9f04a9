use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use comfy_table::{presets::UTF8_FULL, Table};
use metsample_core::{
    collector::{DEFAULT_QUERY, DEFAULT_SAMPLE_SIZE},
    run_pipeline, CatalogConfig, CollectRequest, HttpCatalog, PipelineOptions, PipelineReport,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Sample object metadata from the Met collection API into a CSV and charts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Search term sent to the collection search endpoint
    #[arg(long, default_value = DEFAULT_QUERY)]
    query: String,

    /// Maximum number of objects to fetch
    #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    n: usize,

    /// Output CSV path
    #[arg(long, default_value = "met_sample.csv")]
    out: PathBuf,

    /// Only match objects that have images
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    has_images: bool,

    /// Object fetches allowed in flight at once
    #[arg(long, default_value_t = 1)]
    concurrency: usize,

    /// Directory for rendered charts
    #[arg(long, default_value = "visualizations")]
    charts_dir: PathBuf,

    /// Do not render charts
    #[arg(long)]
    skip_charts: bool,
}

impl Cli {
    fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            request: CollectRequest {
                query: self.query.clone(),
                sample_size: self.n,
                has_images: self.has_images,
                concurrency: self.concurrency,
            },
            csv_path: self.out.clone(),
            charts_dir: (!self.skip_charts).then(|| self.charts_dir.clone()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let config = CatalogConfig::from_env().context("invalid catalog configuration")?;
    info!(search_url = %config.search_url, object_url = %config.object_url, "using catalog");
    let catalog = HttpCatalog::new(config)?;

    let options = cli.pipeline_options();
    let report = run_pipeline(&catalog, &options)
        .await
        .with_context(|| format!("failed to build sample for query '{}'", cli.query))?;

    println!("{}", summary_table(&report));
    println!("Done. Saved {}", report.csv_path.display());
    Ok(())
}

fn summary_table(report: &PipelineReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Ids found".to_string(), report.ids_found.to_string()]);
    table.add_row(vec!["Rows collected".to_string(), report.rows().to_string()]);
    table.add_row(vec!["Failed fetches".to_string(), report.failures.len().to_string()]);
    table.add_row(vec![
        "Rows with year".to_string(),
        report.rows_with_year().to_string(),
    ]);
    table.add_row(vec![
        "Output".to_string(),
        report.csv_path.display().to_string(),
    ]);
    for chart in &report.charts {
        table.add_row(vec!["Chart".to_string(), chart.display().to_string()]);
    }
    table
}

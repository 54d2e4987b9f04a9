use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::info;

use crate::error::Result;

/// Writes the dataset as CSV with a header row. Nulls become empty fields.
pub fn write_csv(df: &DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let mut frame = df.clone();
    CsvWriter::new(&mut writer)
        .include_header(true)
        .finish(&mut frame)?;
    writer.flush()?;

    info!(path = %path.display(), rows = df.height(), "dataset written");
    Ok(())
}

//! Aggregations behind the exploratory charts, kept separate from rendering.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use polars::prelude::*;

use crate::model::YEAR_COLUMN;

pub const UNKNOWN_CLASSIFICATION: &str = "Unknown";

/// Most frequent classifications (null counted as "Unknown"), highest count first,
/// ties broken by name.
pub fn top_classifications(df: &DataFrame, limit: usize) -> PolarsResult<Vec<(String, usize)>> {
    let classification = df.column("classification")?.str()?;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for idx in 0..df.height() {
        let name = classification.get(idx).unwrap_or(UNKNOWN_CLASSIFICATION);
        *counts.entry(name).or_default() += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);

    Ok(ranked)
}

/// Character length of each `medium` value; null counts as zero.
pub fn medium_lengths(df: &DataFrame) -> PolarsResult<Vec<usize>> {
    let medium = df.column("medium")?.str()?;
    Ok((0..df.height())
        .map(|idx| medium.get(idx).map_or(0, |text| text.chars().count()))
        .collect())
}

/// Non-null extracted years in row order.
pub fn extracted_years(df: &DataFrame) -> PolarsResult<Vec<i64>> {
    let years = df.column(YEAR_COLUMN)?.i64()?;
    Ok(years.into_iter().flatten().collect())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crosstab {
    pub rows: Vec<String>,
    pub columns: Vec<bool>,
    /// `counts[row][column]`
    pub counts: Vec<Vec<usize>>,
}

impl Crosstab {
    pub fn max_count(&self) -> usize {
        self.counts
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

/// Classification (null as "Unknown") against the public-domain flag. Rows whose flag
/// is null are left out; only flag values that occur become columns.
pub fn classification_by_public_domain(df: &DataFrame) -> PolarsResult<Crosstab> {
    let classification = df.column("classification")?.str()?;
    let public_domain = df.column("isPublicDomain")?.bool()?;

    let mut cells: BTreeMap<(&str, bool), usize> = BTreeMap::new();
    let mut row_names: BTreeSet<&str> = BTreeSet::new();
    let mut flags: BTreeSet<bool> = BTreeSet::new();

    for idx in 0..df.height() {
        let Some(flag) = public_domain.get(idx) else {
            continue;
        };
        let name = classification.get(idx).unwrap_or(UNKNOWN_CLASSIFICATION);
        row_names.insert(name);
        flags.insert(flag);
        *cells.entry((name, flag)).or_default() += 1;
    }

    let columns: Vec<bool> = flags.into_iter().collect();
    let counts = row_names
        .iter()
        .map(|name| {
            columns
                .iter()
                .map(|flag| cells.get(&(*name, *flag)).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    Ok(Crosstab {
        rows: row_names.into_iter().map(str::to_string).collect(),
        columns,
        counts,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width bins spanning the data range. The maximum value lands in the last bin;
/// a constant series gets a unit-wide range centred on its value.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for value in values {
        let slot = (((value - min) / width).floor() as usize).min(bins - 1);
        counts[slot] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| HistogramBin {
            start: min + width * idx as f64,
            end: min + width * (idx + 1) as f64,
            count,
        })
        .collect()
}

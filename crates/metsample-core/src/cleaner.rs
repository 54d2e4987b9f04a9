use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

use crate::model::{PERIOD_CLEAN_COLUMN, YEAR_COLUMN};

// First run of 3 or 4 digits; a longer run yields its first four.
static YEAR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{3,4}").expect("valid regex"));

/// Trimmed period text, or `None` when nothing is left.
pub fn clean_period(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Heuristic year: the leftmost 3-4 digit run, with no plausibility check.
pub fn extract_year(text: &str) -> Option<i64> {
    YEAR_PATTERN
        .find(text)
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

/// Returns a copy of `df` with `period_clean` and `year` derived from `period`.
///
/// Existing derived columns are replaced, so cleaning an already cleaned frame
/// yields the same values.
pub fn clean(df: &DataFrame) -> Result<DataFrame, PolarsError> {
    let period = df.column("period")?.str()?;

    let mut cleaned: Vec<Option<String>> = Vec::with_capacity(df.height());
    let mut years: Vec<Option<i64>> = Vec::with_capacity(df.height());

    for idx in 0..df.height() {
        let value = period.get(idx).and_then(clean_period);
        years.push(value.as_deref().and_then(extract_year));
        cleaned.push(value);
    }

    let period_clean = Series::new(
        PERIOD_CLEAN_COLUMN.into(),
        cleaned
            .iter()
            .map(|opt| opt.as_deref())
            .collect::<Vec<Option<&str>>>(),
    );
    let year = Series::new(YEAR_COLUMN.into(), years);

    let mut output = df.clone();
    output.with_column(period_clean)?;
    output.with_column(year)?;

    Ok(output)
}

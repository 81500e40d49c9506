//! Missing value analysis

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

/// Missing value statistics for one column
#[derive(Debug, Clone, Serialize)]
pub struct MissingStat {
    pub column: String,
    /// Number of null entries
    pub missing: usize,
    /// `missing / rows`
    pub ratio: f64,
    /// Share of non-null entries (`1 - ratio`)
    pub fill_rate: f64,
}

/// Analyze missing values in every column of the dataset.
///
/// Results are sorted by missing ratio, highest first. Ties keep the
/// column order of the frame.
pub fn analyze_missing_values(df: &DataFrame) -> Result<Vec<MissingStat>> {
    // Handle empty DataFrame
    if df.height() == 0 {
        return Ok(Vec::new());
    }

    let rows = df.height() as f64;

    let mut stats: Vec<MissingStat> = df
        .get_columns()
        .iter()
        .map(|column| {
            let missing = column.null_count();
            let ratio = missing as f64 / rows;
            MissingStat {
                column: column.name().to_string(),
                missing,
                ratio,
                fill_rate: 1.0 - ratio,
            }
        })
        .collect();

    // Sort by missing ratio descending
    stats.sort_by(|a, b| b.ratio.partial_cmp(&a.ratio).unwrap_or(std::cmp::Ordering::Equal));

    Ok(stats)
}

/// Names of columns that still hold at least one null
pub fn columns_with_missing(stats: &[MissingStat]) -> Vec<String> {
    stats
        .iter()
        .filter(|stat| stat.missing > 0)
        .map(|stat| stat.column.clone())
        .collect()
}

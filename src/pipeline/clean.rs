//! Data cleaning: drop identifier columns and impute missing values

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;

/// Sentinel category for an unknown port of embarkation
pub const UNKNOWN_PORT: &str = "U";

/// Which columns to drop and how to fill the rest.
///
/// Columns named here but absent from the frame are skipped, so cleaning
/// never fails on a partial dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanConfig {
    /// Identifier-like columns with no predictive value
    pub drop_columns: Vec<String>,
    /// Continuous columns filled with their mean
    pub mean_fill: Vec<String>,
    /// Categorical columns filled with `sentinel`
    pub sentinel_fill: Vec<String>,
    pub sentinel: String,
    /// Count columns filled with zero
    pub zero_fill: Vec<String>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            drop_columns: to_strings(&["Name", "Ticket", "Cabin"]),
            mean_fill: to_strings(&["Age", "Fare"]),
            sentinel_fill: to_strings(&["Embarked"]),
            sentinel: UNKNOWN_PORT.to_string(),
            zero_fill: to_strings(&["SibSp", "Parch"]),
        }
    }
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// How a column's missing values were filled
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum FillValue {
    Mean { value: Option<f64> },
    Sentinel { value: String },
    Zero,
}

/// One filled column
#[derive(Debug, Clone, Serialize)]
pub struct FillRecord {
    pub column: String,
    /// Number of nulls replaced
    pub filled: usize,
    pub fill: FillValue,
}

/// What a cleaning pass changed
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanReport {
    pub dropped: Vec<String>,
    pub filled: Vec<FillRecord>,
}

impl CleanReport {
    /// Total number of values imputed across all columns
    pub fn total_filled(&self) -> usize {
        self.filled.iter().map(|record| record.filled).sum()
    }
}

/// Clean a Titanic passenger table with the default column layout.
///
/// Drops `Name`, `Ticket` and `Cabin`; fills `Age` and `Fare` with their
/// mean, `Embarked` with `"U"`, and `SibSp`/`Parch` with zero.
pub fn clean(df: &DataFrame) -> Result<DataFrame> {
    let (cleaned, _) = clean_with(df, &CleanConfig::default())?;
    Ok(cleaned)
}

/// Clean a table according to `config`, returning the new frame and a
/// report of what changed. The input is not modified.
pub fn clean_with(df: &DataFrame, config: &CleanConfig) -> Result<(DataFrame, CleanReport)> {
    let present = |name: &str| df.get_column_index(name).is_some();

    let dropped: Vec<String> = config
        .drop_columns
        .iter()
        .filter(|name| present(name.as_str()))
        .cloned()
        .collect();
    let mut cleaned = df.drop_many(dropped.iter().map(|s| s.as_str()));

    // A column that was just dropped has nothing left to fill
    let retained = |name: &&String| present(name.as_str()) && !dropped.contains(*name);
    let mut filled_columns = Vec::new();

    for name in config.mean_fill.iter().filter(retained) {
        let column = cleaned.column(name)?;
        let filled = column.null_count();
        let (series, mean) = fill_with_mean(column)
            .with_context(|| format!("Failed to fill '{}' with its mean", name))?;
        cleaned.with_column(series)?;
        filled_columns.push(FillRecord {
            column: name.clone(),
            filled,
            fill: FillValue::Mean { value: mean },
        });
    }

    for name in config.sentinel_fill.iter().filter(retained) {
        let column = cleaned.column(name)?;
        let filled = column.null_count();
        let series = fill_with_sentinel(column, &config.sentinel)
            .with_context(|| format!("Failed to fill '{}' with '{}'", name, config.sentinel))?;
        cleaned.with_column(series)?;
        filled_columns.push(FillRecord {
            column: name.clone(),
            filled,
            fill: FillValue::Sentinel {
                value: config.sentinel.clone(),
            },
        });
    }

    for name in config.zero_fill.iter().filter(retained) {
        let column = cleaned.column(name)?;
        let filled = column.null_count();
        let series = fill_with_zero(column)
            .with_context(|| format!("Failed to fill '{}' with zero", name))?;
        cleaned.with_column(series)?;
        filled_columns.push(FillRecord {
            column: name.clone(),
            filled,
            fill: FillValue::Zero,
        });
    }

    let report = CleanReport {
        dropped,
        filled: filled_columns,
    };

    Ok((cleaned, report))
}

/// Replace nulls by the column mean. The result is Float64; an all-null
/// column has no mean and is returned unchanged (as Float64).
fn fill_with_mean(column: &Column) -> Result<(Series, Option<f64>)> {
    let values = column.cast(&DataType::Float64)?;
    let values = values.f64()?;
    let mean = values.mean();

    let filled = match mean {
        Some(mean) => values.fill_null_with_values(mean)?,
        None => values.clone(),
    };

    Ok((filled.into_series().with_name(column.name().clone()), mean))
}

/// Replace nulls by a fixed category label. The result is a String column.
fn fill_with_sentinel(column: &Column, sentinel: &str) -> Result<Series> {
    let values = column.cast(&DataType::String)?;
    let filled: StringChunked = values
        .str()?
        .into_iter()
        .map(|v| Some(v.unwrap_or(sentinel)))
        .collect();

    Ok(filled.into_series().with_name(column.name().clone()))
}

/// Replace nulls by zero, keeping the original numeric dtype.
fn fill_with_zero(column: &Column) -> Result<Series> {
    let dtype = column.dtype().clone();
    if !dtype.is_primitive_numeric() {
        anyhow::bail!("column '{}' is not numeric ({})", column.name(), dtype);
    }

    let values = column.cast(&DataType::Float64)?;
    let filled = values.f64()?.fill_null_with_values(0.0)?;

    Ok(filled
        .into_series()
        .cast(&dtype)?
        .with_name(column.name().clone()))
}

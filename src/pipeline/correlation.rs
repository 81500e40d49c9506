//! Association measures between passenger attributes
//!
//! The correlation ratio relates a categorical grouping to a continuous
//! measurement; Pearson correlation relates two numeric (or label-encoded)
//! columns.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use anyhow::{Context, Result};
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

/// Errors raised by the slice-level association routines
#[derive(Debug, Error, PartialEq)]
pub enum CorrelationError {
    #[error("length mismatch: {categories} categories but {measurements} measurements")]
    LengthMismatch {
        categories: usize,
        measurements: usize,
    },
}

/// Correlation ratio of one feature against the target
#[derive(Debug, Clone, Serialize)]
pub struct Association {
    pub feature: String,
    pub eta: f64,
}

/// Compute the correlation ratio between a categorical grouping and a
/// continuous measurement.
///
/// The value is the share of the measurement's variance explained by group
/// membership: `sum(n_i * (mean_i - mean)^2) / sum((y - mean)^2)`, where
/// `mean` is the count-weighted mean of the group means. It lies in `[0, 1]`.
///
/// * A row whose category is `None` belongs to no group, so it is left out
///   of the group means and the grand mean, but its measurement still counts
///   in the total sum of squares.
/// * A row whose measurement is `None` is ignored.
/// * A numerator of exactly zero yields `0.0`, which also covers a single
///   category and constant measurements (0/0).
pub fn correlation_ratio<K: Eq + Hash>(
    categories: &[Option<K>],
    measurements: &[Option<f64>],
) -> std::result::Result<f64, CorrelationError> {
    if categories.len() != measurements.len() {
        return Err(CorrelationError::LengthMismatch {
            categories: categories.len(),
            measurements: measurements.len(),
        });
    }

    // Sums are taken over deviations from the first measurement; constant
    // inputs must give a numerator of exactly zero.
    let Some(origin) = measurements.iter().flatten().copied().next() else {
        return Ok(0.0);
    };

    // Groups are kept in first-seen order so every sum runs in row order
    let mut index: HashMap<&K, usize> = HashMap::new();
    let mut groups: Vec<(f64, usize)> = Vec::new();
    let mut grouped_sum = 0.0;
    for (category, measurement) in categories.iter().zip(measurements) {
        if let (Some(category), Some(y)) = (category, measurement) {
            let slot = *index.entry(category).or_insert_with(|| {
                groups.push((0.0, 0));
                groups.len() - 1
            });
            groups[slot].0 += y - origin;
            groups[slot].1 += 1;
            grouped_sum += y - origin;
        }
    }

    let grouped: usize = groups.iter().map(|(_, n)| n).sum();
    if grouped == 0 {
        return Ok(0.0);
    }

    let group_means: Vec<(f64, f64)> = groups
        .iter()
        .map(|&(sum, n)| (sum / n as f64, n as f64))
        .collect();

    // Count-weighted mean of the group means, i.e. the mean of grouped rows
    let grand_mean = grouped_sum / grouped as f64;

    let numerator: f64 = group_means
        .iter()
        .map(|(mean, n)| n * (mean - grand_mean).powi(2))
        .sum();

    if numerator == 0.0 {
        return Ok(0.0);
    }

    let denominator: f64 = measurements
        .iter()
        .flatten()
        .map(|y| (y - origin - grand_mean).powi(2))
        .sum();

    Ok(numerator / denominator)
}

/// Correlation ratio between two DataFrame columns.
///
/// `categories` may have any dtype; values are grouped on their string
/// form, so numeric columns such as `Age` or `Pclass` work as groupings.
/// Null and NaN categories belong to no group.
/// `measurements` must be numeric or boolean.
pub fn column_correlation_ratio(categories: &Column, measurements: &Column) -> Result<f64> {
    let measurement_dtype = measurements.dtype();
    if !measurement_dtype.is_primitive_numeric() && *measurement_dtype != DataType::Boolean {
        anyhow::bail!(
            "Measurement column '{}' must be numeric, found {}",
            measurements.name(),
            measurement_dtype
        );
    }

    let keys = categories
        .cast(&DataType::String)
        .with_context(|| format!("Cannot group by column '{}'", categories.name()))?;
    let mut keys: Vec<Option<&str>> = keys.str()?.into_iter().collect();

    // NaN is a missing category, not a group of its own
    if categories.dtype().is_float() {
        let values = categories.cast(&DataType::Float64)?;
        for (key, value) in keys.iter_mut().zip(values.f64()?) {
            if value.is_some_and(f64::is_nan) {
                *key = None;
            }
        }
    }

    let values = measurements.cast(&DataType::Float64)?;
    let values: Vec<Option<f64>> = values.f64()?.into_iter().collect();

    Ok(correlation_ratio(&keys, &values)?)
}

/// Correlation ratio of each feature (as grouping) against the target
/// (as measurement), computed in parallel and sorted strongest first.
pub fn rank_associations(
    df: &DataFrame,
    target: &str,
    features: &[String],
) -> Result<Vec<Association>> {
    let measurements = df
        .column(target)
        .with_context(|| format!("Target column '{}' not found", target))?;

    let mut associations = features
        .par_iter()
        .filter(|feature| feature.as_str() != target)
        .map(|feature| {
            let categories = df
                .column(feature)
                .with_context(|| format!("Feature column '{}' not found", feature))?;
            let eta = column_correlation_ratio(categories, measurements)?;
            Ok(Association {
                feature: feature.clone(),
                eta,
            })
        })
        .collect::<Result<Vec<Association>>>()?;

    associations.sort_by(|a, b| b.eta.partial_cmp(&a.eta).unwrap_or(std::cmp::Ordering::Equal));

    Ok(associations)
}

/// Encode a column as integer codes of its sorted distinct values.
///
/// Numeric columns sort numerically, everything else lexically. Nulls stay
/// null.
pub fn label_encode(column: &Column) -> Result<Column> {
    let codes: Vec<Option<i64>> = if column.dtype().is_primitive_numeric() {
        let values = column.cast(&DataType::Float64)?;
        let values = values.f64()?;
        let mut distinct: Vec<f64> = values.into_iter().flatten().collect();
        distinct.sort_by(|a, b| a.total_cmp(b));
        distinct.dedup();

        values
            .into_iter()
            .map(|v| {
                v.and_then(|x| {
                    distinct
                        .binary_search_by(|probe| probe.total_cmp(&x))
                        .ok()
                        .map(|i| i as i64)
                })
            })
            .collect()
    } else {
        let values = column
            .cast(&DataType::String)
            .with_context(|| format!("Cannot label-encode column '{}'", column.name()))?;
        let values = values.str()?;
        let distinct: Vec<&str> = values
            .into_iter()
            .flatten()
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .collect();

        values
            .into_iter()
            .map(|v| v.and_then(|s| distinct.binary_search(&s).ok().map(|i| i as i64)))
            .collect()
    };

    Ok(Column::new(column.name().clone(), codes))
}

/// Pearson correlation between two numeric columns.
///
/// Rows where either value is null are skipped. Returns `None` when there
/// are no complete rows or either column has zero variance.
pub fn pearson_correlation(a: &Column, b: &Column) -> Result<Option<f64>> {
    if a.len() != b.len() {
        anyhow::bail!(
            "Columns '{}' and '{}' have different lengths ({} vs {})",
            a.name(),
            b.name(),
            a.len(),
            b.len()
        );
    }

    let a = a
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' is not numeric", a.name()))?;
    let b = b
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' is not numeric", b.name()))?;

    Ok(welford_pearson(a.f64()?, b.f64()?))
}

/// Single-pass Welford update over the complete pairs
fn welford_pearson(xs: &Float64Chunked, ys: &Float64Chunked) -> Option<f64> {
    let mut n = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (x, y) in xs.into_iter().zip(ys.into_iter()) {
        if let (Some(x), Some(y)) = (x, y) {
            n += 1.0;
            let dx = x - mean_x;
            let dy = y - mean_y;
            mean_x += dx / n;
            mean_y += dy / n;
            var_x += dx * (x - mean_x);
            var_y += dy * (y - mean_y);
            cov_xy += dx * (y - mean_y);
        }
    }

    if n == 0.0 || var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some(cov_xy / (var_x.sqrt() * var_y.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welford_matches_textbook_formula() {
        let xs = Float64Chunked::from_slice("x".into(), &[1.0, 2.0, 3.0, 4.0]);
        let ys = Float64Chunked::from_slice("y".into(), &[2.0, 4.0, 5.0, 4.0]);

        // co-moment 3.5, sums of squares 5.0 and 4.75
        let expected = 3.5 / (5.0f64.sqrt() * 4.75f64.sqrt());
        let r = welford_pearson(&xs, &ys).unwrap();
        assert!((r - expected).abs() < 1e-12, "got {}", r);
    }

    #[test]
    fn welford_rejects_constant_series() {
        let xs = Float64Chunked::from_slice("x".into(), &[1.0, 1.0, 1.0]);
        let ys = Float64Chunked::from_slice("y".into(), &[2.0, 4.0, 5.0]);
        assert!(welford_pearson(&xs, &ys).is_none());
    }
}

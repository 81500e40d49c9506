//! Survival rates by passenger group

use std::collections::{BTreeMap, HashMap};

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;

/// Age bin edges in years: (0, 18], (18, 25], (25, 40], (40, 60], (60, 100]
pub const AGE_BINS: [f64; 6] = [0.0, 18.0, 25.0, 40.0, 60.0, 100.0];

/// Fare bin edges: (0, 10], (10, 25], (25, 50], (50, 100], (100, 1000]
pub const FARE_BINS: [f64; 6] = [0.0, 10.0, 25.0, 50.0, 100.0, 1000.0];

/// Mean outcome of one group of passengers
#[derive(Debug, Clone, Serialize)]
pub struct GroupRate {
    pub group: String,
    pub count: usize,
    pub rate: f64,
}

fn outcome_values(df: &DataFrame, target: &str) -> Result<Vec<Option<f64>>> {
    let column = df
        .column(target)
        .with_context(|| format!("Target column '{}' not found", target))?;

    if !column.dtype().is_primitive_numeric() && *column.dtype() != DataType::Boolean {
        anyhow::bail!(
            "Target column '{}' must be numeric, found {}",
            target,
            column.dtype()
        );
    }

    let values = column.cast(&DataType::Float64)?;
    Ok(values.f64()?.into_iter().collect())
}

fn finish_rates(groups: impl IntoIterator<Item = (String, (f64, usize))>) -> Vec<GroupRate> {
    groups
        .into_iter()
        .map(|(group, (sum, count))| GroupRate {
            group,
            count,
            rate: sum / count as f64,
        })
        .collect()
}

/// Count each distinct outcome value, most frequent first
pub fn outcome_counts(df: &DataFrame, target: &str) -> Result<Vec<(String, usize)>> {
    let column = df
        .column(target)
        .with_context(|| format!("Target column '{}' not found", target))?;
    let values = column.cast(&DataType::String)?;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values.str()?.into_iter().flatten() {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    Ok(counts)
}

/// Mean of `target` for each distinct value of `group`.
///
/// Rows with a null (or NaN) group or a null target are left out. Groups are sorted
/// numerically for numeric group columns, lexically otherwise.
pub fn survival_rates(df: &DataFrame, target: &str, group: &str) -> Result<Vec<GroupRate>> {
    let outcomes = outcome_values(df, target)?;
    let column = df
        .column(group)
        .with_context(|| format!("Group column '{}' not found", group))?;

    if column.dtype().is_primitive_numeric() {
        let keys = column.cast(&DataType::Float64)?;
        let mut groups: Vec<(f64, (f64, usize))> = Vec::new();
        for (key, outcome) in keys.f64()?.into_iter().zip(&outcomes) {
            // NaN keys join no group, like nulls
            if let (Some(key), Some(y)) = (key.filter(|k| !k.is_nan()), outcome) {
                match groups.iter_mut().find(|(k, _)| *k == key) {
                    Some((_, acc)) => {
                        acc.0 += y;
                        acc.1 += 1;
                    }
                    None => groups.push((key, (*y, 1))),
                }
            }
        }
        groups.sort_by(|a, b| a.0.total_cmp(&b.0));

        // Render integral keys without a trailing ".0"
        let labelled = groups.into_iter().map(|(key, acc)| {
            let label = if key.fract() == 0.0 {
                format!("{}", key as i64)
            } else {
                key.to_string()
            };
            (label, acc)
        });
        return Ok(finish_rates(labelled));
    }

    let keys = column.cast(&DataType::String)?;
    let mut groups: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for (key, outcome) in keys.str()?.into_iter().zip(&outcomes) {
        if let (Some(key), Some(y)) = (key, outcome) {
            let acc = groups.entry(key.to_string()).or_insert((0.0, 0));
            acc.0 += y;
            acc.1 += 1;
        }
    }

    Ok(finish_rates(groups))
}

/// Mean of `target` per interval of a continuous column.
///
/// Intervals are right-closed, `(edges[i], edges[i + 1]]`, and labelled that
/// way. Values outside every interval (including the lowest edge itself)
/// are dropped. Empty intervals are omitted.
pub fn binned_survival_rates(
    df: &DataFrame,
    target: &str,
    column: &str,
    edges: &[f64],
) -> Result<Vec<GroupRate>> {
    if edges.len() < 2 {
        anyhow::bail!("At least two bin edges are required, got {}", edges.len());
    }
    if edges.windows(2).any(|pair| pair[0] >= pair[1]) {
        anyhow::bail!("Bin edges must be strictly increasing: {:?}", edges);
    }

    let outcomes = outcome_values(df, target)?;
    let values = df
        .column(column)
        .with_context(|| format!("Column '{}' not found", column))?
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' is not numeric", column))?;

    let mut bins: Vec<(f64, usize)> = vec![(0.0, 0); edges.len() - 1];
    for (value, outcome) in values.f64()?.into_iter().zip(&outcomes) {
        if let (Some(x), Some(y)) = (value, outcome) {
            if let Some(bin) = bin_index(edges, x) {
                bins[bin].0 += y;
                bins[bin].1 += 1;
            }
        }
    }

    let labelled = bins
        .into_iter()
        .enumerate()
        .filter(|(_, (_, count))| *count > 0)
        .map(|(i, acc)| (format!("({}, {}]", edges[i], edges[i + 1]), acc));

    Ok(finish_rates(labelled))
}

/// Index of the right-closed interval containing `x`
fn bin_index(edges: &[f64], x: f64) -> Option<usize> {
    if x.is_nan() || x <= edges[0] || x > edges[edges.len() - 1] {
        return None;
    }
    // First edge >= x closes the interval
    let upper = edges.partition_point(|&edge| edge < x);
    Some(upper - 1)
}

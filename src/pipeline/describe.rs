//! Column summaries in the spirit of a dataframe `describe()`

use std::collections::HashMap;

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

/// Summary statistics for one column.
///
/// Numeric columns report moments and quartiles over their non-null values;
/// every other dtype reports the most frequent value.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ColumnSummary {
    Numeric {
        column: String,
        count: usize,
        mean: Option<f64>,
        /// Sample standard deviation (n - 1 denominator)
        std: Option<f64>,
        min: Option<f64>,
        q25: Option<f64>,
        median: Option<f64>,
        q75: Option<f64>,
        max: Option<f64>,
    },
    Categorical {
        column: String,
        count: usize,
        unique: usize,
        top: Option<String>,
        freq: usize,
    },
}

impl ColumnSummary {
    pub fn column(&self) -> &str {
        match self {
            ColumnSummary::Numeric { column, .. } | ColumnSummary::Categorical { column, .. } => {
                column
            }
        }
    }

    /// Number of non-null values
    pub fn count(&self) -> usize {
        match self {
            ColumnSummary::Numeric { count, .. } | ColumnSummary::Categorical { count, .. } => {
                *count
            }
        }
    }
}

/// Summarize every column of the frame, in column order
pub fn describe_columns(df: &DataFrame) -> Result<Vec<ColumnSummary>> {
    df.get_columns().iter().map(describe_column).collect()
}

/// Summarize a single column
pub fn describe_column(column: &Column) -> Result<ColumnSummary> {
    if column.dtype().is_primitive_numeric() {
        describe_numeric(column)
    } else {
        describe_categorical(column)
    }
}

fn describe_numeric(column: &Column) -> Result<ColumnSummary> {
    let values = column.cast(&DataType::Float64)?;
    let mut values: Vec<f64> = values.f64()?.into_iter().flatten().collect();
    values.sort_by(|a, b| a.total_cmp(b));

    let count = values.len();
    let mean = (count > 0).then(|| values.iter().sum::<f64>() / count as f64);
    let std = mean.filter(|_| count > 1).map(|mean| {
        let ss: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    });

    Ok(ColumnSummary::Numeric {
        column: column.name().to_string(),
        count,
        mean,
        std,
        min: values.first().copied(),
        q25: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: values.last().copied(),
    })
}

fn describe_categorical(column: &Column) -> Result<ColumnSummary> {
    let values = column.cast(&DataType::String)?;
    let values = values.str()?;

    // First-seen order breaks frequency ties
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, value) in values.into_iter().flatten().enumerate() {
        counts.entry(value).or_insert((0, position)).0 += 1;
    }

    let top = counts
        .iter()
        .max_by(|a, b| a.1 .0.cmp(&b.1 .0).then(b.1 .1.cmp(&a.1 .1)))
        .map(|(value, (freq, _))| (value.to_string(), *freq));

    Ok(ColumnSummary::Categorical {
        column: column.name().to_string(),
        count: counts.values().map(|(n, _)| n).sum(),
        unique: counts.len(),
        freq: top.as_ref().map(|(_, freq)| *freq).unwrap_or(0),
        top: top.map(|(value, _)| value),
    })
}

/// Quantile of sorted values with linear interpolation between ranks
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantile_interpolates_between_ranks() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), Some(1.0));
        assert_eq!(quantile(&sorted, 0.25), Some(1.75));
        assert_eq!(quantile(&sorted, 0.5), Some(2.5));
        assert_eq!(quantile(&sorted, 1.0), Some(4.0));
    }

    #[test]
    fn quantile_of_empty_is_none() {
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn categorical_tie_goes_to_first_seen() {
        let column = Column::new("Embarked".into(), [Some("Q"), Some("S"), Some("S"), Some("Q")]);
        match describe_column(&column).unwrap() {
            ColumnSummary::Categorical { top, freq, unique, .. } => {
                assert_eq!(top.as_deref(), Some("Q"));
                assert_eq!(freq, 2);
                assert_eq!(unique, 2);
            }
            other => panic!("expected categorical summary, got {:?}", other),
        }
    }
}

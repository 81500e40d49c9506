//! Dataset loader and writer for CSV and Parquet files

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

/// Supported tabular file formats, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Parquet,
}

impl FileFormat {
    /// Detect the format of a path from its extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "csv" => Ok(FileFormat::Csv),
            "parquet" => Ok(FileFormat::Parquet),
            _ => anyhow::bail!(
                "Unsupported file format: '{}'. Supported formats: csv, parquet",
                extension
            ),
        }
    }
}

/// Load a dataset lazily from a file (CSV or Parquet based on extension)
///
/// `infer_schema_length` of 0 means a full table scan for CSV type inference.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<LazyFrame> {
    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match FileFormat::from_path(path)? {
        FileFormat::Csv => LazyCsvReader::new(path)
            .with_infer_schema_length(schema_length)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        FileFormat::Parquet => scan_parquet(path)?,
    };

    Ok(lf)
}

#[cfg(feature = "parquet")]
fn scan_parquet(path: &Path) -> Result<LazyFrame> {
    LazyFrame::scan_parquet(path, Default::default())
        .with_context(|| format!("Failed to load Parquet file: {}", path.display()))
}

#[cfg(not(feature = "parquet"))]
fn scan_parquet(path: &Path) -> Result<LazyFrame> {
    anyhow::bail!(
        "Cannot read {}: built without the 'parquet' feature",
        path.display()
    )
}

/// Load a dataset into memory and return it with its shape and estimated size
///
/// Returns `(df, rows, cols, memory_mb)`.
pub fn load_dataset_with_progress(
    path: &Path,
    infer_schema_length: usize,
) -> Result<(DataFrame, usize, usize, f64)> {
    let df = load_dataset(path, infer_schema_length)?
        .collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;

    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);

    Ok((df, rows, cols, memory_mb))
}

/// Read only the column names of a dataset (schema metadata, no full scan)
pub fn get_column_names(path: &Path) -> Result<Vec<String>> {
    let schema = load_dataset(path, 100)?
        .collect_schema()
        .with_context(|| format!("Failed to read schema: {}", path.display()))?;

    Ok(schema.iter_names().map(|name| name.to_string()).collect())
}

/// Save a dataset to file (CSV or Parquet based on extension)
pub fn save_dataset(df: &mut DataFrame, path: &Path) -> Result<()> {
    match FileFormat::from_path(path)? {
        FileFormat::Csv => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        FileFormat::Parquet => write_parquet(df, path)?,
    }

    Ok(())
}

#[cfg(feature = "parquet")]
fn write_parquet(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    ParquetWriter::new(file)
        .finish(df)
        .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
    Ok(())
}

#[cfg(not(feature = "parquet"))]
fn write_parquet(_df: &mut DataFrame, path: &Path) -> Result<()> {
    anyhow::bail!(
        "Cannot write {}: built without the 'parquet' feature",
        path.display()
    )
}

/// Require that every named column exists in the frame
pub fn require_columns(df: &DataFrame, columns: &[&str]) -> Result<()> {
    let available: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for column in columns {
        if !available.iter().any(|c| c == column) {
            anyhow::bail!(
                "Column '{}' not found in dataset. Available columns: {:?}",
                column,
                available
            );
        }
    }

    Ok(())
}

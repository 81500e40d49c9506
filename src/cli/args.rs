//! Command-line argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::fixtures::DEFAULT_SEED;
use crate::pipeline::CleanConfig;

/// titanic-eda - Explore and clean the Titanic survival dataset
#[derive(Parser, Debug)]
#[command(name = "titanic-eda")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print missing values, column summaries, survival rates and correlation ratios
    Explore(ExploreArgs),

    /// Drop identifier columns and impute missing values
    Clean(CleanArgs),

    /// Correlation ratio between one categorical and one numeric column
    Eta(EtaArgs),

    /// Generate seeded synthetic fixtures as JSON
    Fixtures {
        #[command(subcommand)]
        kind: FixtureKind,
    },
}

#[derive(Args, Debug)]
pub struct ExploreArgs {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Binary outcome column
    #[arg(short, long, default_value = "Survived")]
    pub target: String,

    /// Columns whose correlation ratio against the target is ranked (comma-separated)
    #[arg(long, value_delimiter = ',', default_values = ["Sex", "Age", "Fare", "Embarked", "Pclass"])]
    pub features: Vec<String>,

    /// Categorical columns broken down by survival rate (comma-separated)
    #[arg(long, value_delimiter = ',', default_values = ["Sex", "Pclass", "Embarked"])]
    pub group_columns: Vec<String>,

    /// Age column, binned as (0,18], (18,25], (25,40], (40,60], (60,100]
    #[arg(long, default_value = "Age")]
    pub age_column: String,

    /// Fare column, binned as (0,10], (10,25], (25,50], (50,100], (100,1000]
    #[arg(long, default_value = "Fare")]
    pub fare_column: String,

    /// Class column whose link to the fare column is reported as η(fare, class)
    #[arg(long, default_value = "Pclass")]
    pub class_column: String,

    /// Two columns to correlate with Pearson's r; a non-numeric first
    /// column is label-encoded first
    #[arg(long, value_delimiter = ',', default_values = ["Embarked", "Fare"], value_parser = validate_column_name)]
    pub pearson: Vec<String>,

    /// Skip the Pearson step
    #[arg(long, default_value = "false")]
    pub skip_pearson: bool,

    /// Write the full exploration report as JSON to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file path (CSV or Parquet, determined by extension).
    /// Defaults to input directory with '_clean' suffix (e.g., train.csv → train_clean.csv).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Columns to drop (comma-separated)
    #[arg(long, value_delimiter = ',', default_values = ["Name", "Ticket", "Cabin"])]
    pub drop_columns: Vec<String>,

    /// Columns whose missing values are replaced by the column mean
    #[arg(long, value_delimiter = ',', default_values = ["Age", "Fare"])]
    pub mean_fill: Vec<String>,

    /// Columns whose missing values are replaced by --sentinel
    #[arg(long, value_delimiter = ',', default_values = ["Embarked"])]
    pub sentinel_fill: Vec<String>,

    /// Category used for missing values in --sentinel-fill columns
    #[arg(long, default_value = "U")]
    pub sentinel: String,

    /// Count columns whose missing values are replaced by zero
    #[arg(long, value_delimiter = ',', default_values = ["SibSp", "Parch"])]
    pub zero_fill: Vec<String>,

    /// Overwrite an existing output file without asking
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl CleanArgs {
    /// Get the output path, deriving from input if not explicitly provided.
    /// The derived path will be in the same directory as the input with a '_clean' suffix.
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let parent = self.input.parent().unwrap_or_else(|| Path::new("."));
            let stem = self
                .input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            let extension = self
                .input
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("csv");
            parent.join(format!("{}_clean.{}", stem, extension))
        })
    }

    /// Cleaning configuration described by these arguments
    pub fn to_config(&self) -> CleanConfig {
        CleanConfig {
            drop_columns: self.drop_columns.clone(),
            mean_fill: self.mean_fill.clone(),
            sentinel_fill: self.sentinel_fill.clone(),
            sentinel: self.sentinel.clone(),
            zero_fill: self.zero_fill.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct EtaArgs {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Grouping column (any type)
    #[arg(short, long)]
    pub category: String,

    /// Numeric measurement column
    #[arg(short, long)]
    pub measurement: String,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

#[derive(Subcommand, Debug)]
pub enum FixtureKind {
    /// Random symmetric positive definite matrices
    Covariances {
        #[arg(long, default_value = "10", value_parser = validate_positive)]
        n_matrices: usize,

        #[arg(long, default_value = "4", value_parser = validate_positive)]
        n_channels: usize,

        /// Also emit the generating eigenvalues and eigenvectors
        #[arg(long, default_value = "false")]
        with_params: bool,

        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Output JSON path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Standard normal feature matrix
    Features {
        #[arg(long, default_value = "100", value_parser = validate_positive)]
        n_samples: usize,

        #[arg(long, default_value = "4", value_parser = validate_positive)]
        n_features: usize,

        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Output JSON path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Balanced class labels
    Labels {
        #[arg(long, default_value = "10", value_parser = validate_positive)]
        n_matrices: usize,

        #[arg(long, default_value = "2", value_parser = validate_positive)]
        n_classes: usize,

        /// Output JSON path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Validator for strictly positive counts
fn validate_positive(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid count", s))?;

    if value == 0 {
        Err("value must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

/// Validator for non-empty column names
fn validate_column_name(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        Err("column name must not be empty".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

//! Shared test utilities and fixture generators

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

use titanic_eda::pipeline::save_dataset;

/// Ten passengers in the Titanic column layout, with known gaps:
/// - `Age`, `Fare`, `Embarked`, `SibSp`, `Parch`: one missing value each
/// - `Cabin`: seven missing values
/// - `Sex` separates `Survived` perfectly (every female survived)
pub fn create_titanic_dataframe() -> DataFrame {
    df! {
        "PassengerId" => [1i64, 2, 3, 4, 5, 6, 7, 8, 9, 10],
        "Survived" => [0i64, 1, 1, 1, 0, 0, 0, 0, 1, 1],
        "Pclass" => [3i64, 1, 3, 1, 3, 3, 1, 3, 3, 2],
        "Name" => [
            "Braund, Mr. Owen Harris",
            "Cumings, Mrs. John Bradley",
            "Heikkinen, Miss. Laina",
            "Futrelle, Mrs. Jacques Heath",
            "Allen, Mr. William Henry",
            "Moran, Mr. James",
            "McCarthy, Mr. Timothy J",
            "Palsson, Master. Gosta Leonard",
            "Johnson, Mrs. Oscar W",
            "Nasser, Mrs. Nicholas",
        ],
        "Sex" => ["male", "female", "female", "female", "male", "male", "male", "male", "female", "female"],
        "Age" => [Some(22.0f64), Some(38.0), Some(26.0), Some(35.0), Some(35.0), None, Some(54.0), Some(2.0), Some(27.0), Some(14.0)],
        "SibSp" => [Some(1i64), Some(1), Some(0), Some(1), Some(0), Some(0), Some(0), Some(3), None, Some(1)],
        "Parch" => [Some(0i64), Some(0), Some(0), Some(0), Some(0), Some(0), Some(0), Some(1), Some(2), None],
        "Ticket" => ["A/5 21171", "PC 17599", "STON/O2. 3101282", "113803", "373450", "330877", "17463", "349909", "347742", "237736"],
        "Fare" => [Some(7.25f64), Some(71.2833), Some(7.925), Some(53.1), Some(8.05), None, Some(51.8625), Some(21.075), Some(11.1333), Some(30.0708)],
        "Cabin" => [None, Some("C85"), None, Some("C123"), None, None, Some("E46"), None, None, None],
        "Embarked" => [Some("S"), Some("C"), Some("S"), Some("S"), Some("S"), Some("Q"), Some("S"), Some("S"), None, Some("C")],
    }
    .unwrap()
}

/// Mean of the non-missing `Age` values in [`create_titanic_dataframe`]
pub const TITANIC_AGE_MEAN: f64 = 253.0 / 9.0;

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("train.csv");

    save_dataset(df, &csv_path).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("train.parquet");

    save_dataset(df, &parquet_path).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}

/// Assert that a column holds no nulls
pub fn assert_no_nulls(df: &DataFrame, column: &str) {
    let nulls = df.column(column).unwrap().null_count();
    assert_eq!(nulls, 0, "Column '{}' still has {} missing value(s)", column, nulls);
}

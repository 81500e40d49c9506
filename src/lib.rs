//! titanic-eda: Titanic survival exploration library
//!
//! Correlation ratios, survival-rate tables and data cleaning for the
//! Titanic passenger dataset, plus seeded fixture generators for tests.

pub mod cli;
pub mod fixtures;
pub mod pipeline;
pub mod report;
pub mod utils;

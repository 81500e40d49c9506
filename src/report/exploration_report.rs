//! JSON exploration report
//!
//! Collects every statistic the `explore` command prints so the run can be
//! archived or diffed.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{Association, ColumnSummary, GroupRate, MissingStat};

/// Report metadata
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub timestamp: String,
    pub version: String,
    pub input_file: String,
    pub target_column: String,
    pub rows: usize,
    pub columns: usize,
}

/// One survival-rate breakdown
#[derive(Debug, Clone, Serialize)]
pub struct RateTable {
    pub by: String,
    pub rates: Vec<GroupRate>,
}

/// Pearson correlation of two columns (the first label-encoded if needed)
#[derive(Debug, Clone, Serialize)]
pub struct PearsonEntry {
    pub x: String,
    pub y: String,
    pub label_encoded: bool,
    pub r: Option<f64>,
}

/// Full exploration report
#[derive(Debug, Clone, Serialize)]
pub struct ExplorationReport {
    pub metadata: ReportMetadata,
    pub missing: Vec<MissingStat>,
    pub columns: Vec<ColumnSummary>,
    pub outcome_counts: Vec<(String, usize)>,
    pub survival: Vec<RateTable>,
    pub associations: Vec<Association>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pearson: Option<PearsonEntry>,
}

/// Accumulates results step by step while `explore` runs
#[derive(Debug)]
pub struct ReportBuilder {
    input_file: String,
    target_column: String,
    rows: usize,
    columns: usize,
    missing: Vec<MissingStat>,
    summaries: Vec<ColumnSummary>,
    outcome_counts: Vec<(String, usize)>,
    survival: Vec<RateTable>,
    associations: Vec<Association>,
    pearson: Option<PearsonEntry>,
}

impl ReportBuilder {
    pub fn new(input: &Path, target: &str, rows: usize, columns: usize) -> Self {
        Self {
            input_file: input.display().to_string(),
            target_column: target.to_string(),
            rows,
            columns,
            missing: Vec::new(),
            summaries: Vec::new(),
            outcome_counts: Vec::new(),
            survival: Vec::new(),
            associations: Vec::new(),
            pearson: None,
        }
    }

    pub fn set_missing(&mut self, missing: Vec<MissingStat>) {
        self.missing = missing;
    }

    pub fn set_summaries(&mut self, summaries: Vec<ColumnSummary>) {
        self.summaries = summaries;
    }

    pub fn set_outcome_counts(&mut self, counts: Vec<(String, usize)>) {
        self.outcome_counts = counts;
    }

    pub fn add_survival(&mut self, by: &str, rates: Vec<GroupRate>) {
        self.survival.push(RateTable {
            by: by.to_string(),
            rates,
        });
    }

    pub fn set_associations(&mut self, associations: Vec<Association>) {
        self.associations = associations;
    }

    pub fn set_pearson(&mut self, entry: PearsonEntry) {
        self.pearson = Some(entry);
    }

    /// Build the final report
    pub fn build(self) -> ExplorationReport {
        ExplorationReport {
            metadata: ReportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: self.input_file,
                target_column: self.target_column,
                rows: self.rows,
                columns: self.columns,
            },
            missing: self.missing,
            columns: self.summaries,
            outcome_counts: self.outcome_counts,
            survival: self.survival,
            associations: self.associations,
            pearson: self.pearson,
        }
    }
}

/// Write a report as pretty-printed JSON
pub fn export_report(report: &ExplorationReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize exploration report to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    Ok(())
}

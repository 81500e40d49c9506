//! Terminal tables for exploration and cleaning results

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{Association, CleanReport, ColumnSummary, FillValue, GroupRate, MissingStat};
use crate::utils::print_indented;

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{:.*}", precision, v))
        .unwrap_or_else(|| "-".to_string())
}

/// Missing count, missing share and fill rate per column
pub fn missing_table(stats: &[MissingStat]) -> Table {
    let mut table = new_table(&["Column", "Missing", "Missing %", "Fill rate"]);

    for stat in stats {
        let color = if stat.missing == 0 {
            Color::Green
        } else if stat.ratio > 0.5 {
            Color::Red
        } else {
            Color::Yellow
        };
        table.add_row(vec![
            Cell::new(&stat.column),
            Cell::new(stat.missing).fg(color),
            Cell::new(format!("{:.1}%", stat.ratio * 100.0)).fg(color),
            Cell::new(format!("{:.3}", stat.fill_rate)),
        ]);
    }

    table
}

/// Numeric column summaries (count, mean, std, quartiles)
pub fn numeric_summary_table(summaries: &[ColumnSummary]) -> Table {
    let mut table = new_table(&[
        "Column", "Count", "Mean", "Std", "Min", "25%", "50%", "75%", "Max",
    ]);

    for summary in summaries {
        if let ColumnSummary::Numeric {
            column,
            count,
            mean,
            std,
            min,
            q25,
            median,
            q75,
            max,
        } = summary
        {
            table.add_row(vec![
                Cell::new(column),
                Cell::new(count),
                Cell::new(fmt_opt(*mean, 3)),
                Cell::new(fmt_opt(*std, 3)),
                Cell::new(fmt_opt(*min, 2)),
                Cell::new(fmt_opt(*q25, 2)),
                Cell::new(fmt_opt(*median, 2)),
                Cell::new(fmt_opt(*q75, 2)),
                Cell::new(fmt_opt(*max, 2)),
            ]);
        }
    }

    table
}

/// Categorical column summaries (count, distinct values, most frequent)
pub fn categorical_summary_table(summaries: &[ColumnSummary]) -> Table {
    let mut table = new_table(&["Column", "Count", "Unique", "Top", "Freq"]);

    for summary in summaries {
        if let ColumnSummary::Categorical {
            column,
            count,
            unique,
            top,
            freq,
        } = summary
        {
            table.add_row(vec![
                Cell::new(column),
                Cell::new(count),
                Cell::new(unique),
                Cell::new(top.as_deref().unwrap_or("-")),
                Cell::new(freq),
            ]);
        }
    }

    table
}

/// Survival rate per group
pub fn rates_table(group_header: &str, rates: &[GroupRate]) -> Table {
    let mut table = new_table(&[group_header, "Passengers", "Survival rate"]);

    for rate in rates {
        let color = if rate.rate >= 0.5 {
            Color::Green
        } else {
            Color::Red
        };
        table.add_row(vec![
            Cell::new(&rate.group),
            Cell::new(rate.count),
            Cell::new(format!("{:.2}%", rate.rate * 100.0)).fg(color),
        ]);
    }

    table
}

/// Correlation ratio of each feature against the target
pub fn associations_table(target: &str, associations: &[Association]) -> Table {
    let header = format!("η vs {}", target);
    let mut table = new_table(&["Feature", header.as_str(), "Strength"]);

    for association in associations {
        let (label, color) = strength(association.eta);
        table.add_row(vec![
            Cell::new(&association.feature),
            Cell::new(format!("{:.4}", association.eta)),
            Cell::new(label).fg(color),
        ]);
    }

    table
}

/// Rule-of-thumb label for an effect size
pub fn strength(eta: f64) -> (&'static str, Color) {
    if eta >= 0.14 {
        ("strong", Color::Green)
    } else if eta >= 0.06 {
        ("average", Color::Yellow)
    } else if eta >= 0.01 {
        ("weak", Color::Cyan)
    } else {
        ("negligible", Color::White)
    }
}

/// Before/after overview of a cleaning pass
#[derive(Debug)]
pub struct CleanSummary {
    pub rows: usize,
    pub initial_columns: usize,
    pub final_columns: usize,
    pub report: CleanReport,
}

impl CleanSummary {
    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("CLEANING SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = new_table(&["Metric", "Value"]);
        table.add_row(vec![Cell::new("📁 Rows"), Cell::new(self.rows)]);
        table.add_row(vec![
            Cell::new("📁 Initial Columns"),
            Cell::new(self.initial_columns),
        ]);
        table.add_row(vec![
            Cell::new("🗑️  Dropped Columns"),
            Cell::new(self.report.dropped.len()).fg(if self.report.dropped.is_empty() {
                Color::White
            } else {
                Color::Red
            }),
        ]);
        table.add_row(vec![
            Cell::new("🩹 Values Imputed"),
            Cell::new(self.report.total_filled()).fg(Color::Yellow),
        ]);
        table.add_row(vec![
            Cell::new("✅ Final Columns"),
            Cell::new(self.final_columns)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        print_indented(&table.to_string());

        if !self.report.filled.is_empty() {
            println!();
            let mut fills = new_table(&["Column", "Filled", "With"]);
            for record in &self.report.filled {
                let with = match &record.fill {
                    FillValue::Mean { value } => format!("mean ({})", fmt_opt(*value, 3)),
                    FillValue::Sentinel { value } => format!("'{}'", value),
                    FillValue::Zero => "0".to_string(),
                };
                fills.add_row(vec![
                    Cell::new(&record.column),
                    Cell::new(record.filled),
                    Cell::new(with),
                ]);
            }
            print_indented(&fills.to_string());
        }

        if !self.report.dropped.is_empty() {
            println!();
            println!(
                "      {} {}:",
                style("Dropped").yellow(),
                style(format!("({})", self.report.dropped.len())).dim()
            );
            for column in &self.report.dropped {
                println!("        {} {}", style("•").dim(), column);
            }
        }
    }
}

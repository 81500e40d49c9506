//! `eta` subcommand: one correlation ratio

use anyhow::Result;
use console::style;

use crate::cli::EtaArgs;
use crate::pipeline::{column_correlation_ratio, load_dataset_with_progress, require_columns};
use crate::report::strength;

/// Print the correlation ratio of `measurement` grouped by `category`
pub fn run_eta(args: &EtaArgs) -> Result<()> {
    let (df, _, _, _) = load_dataset_with_progress(&args.input, args.infer_schema_length)?;
    require_columns(&df, &[args.category.as_str(), args.measurement.as_str()])?;

    let eta = column_correlation_ratio(df.column(&args.category)?, df.column(&args.measurement)?)?;
    let (label, _) = strength(eta);

    println!(
        "η({}, {}) = {} {}",
        args.category,
        args.measurement,
        style(format!("{:.6}", eta)).yellow().bold(),
        style(format!("({})", label)).dim()
    );

    Ok(())
}

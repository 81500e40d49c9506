//! `clean` subcommand: impute missing values and write the cleaned table

use std::time::Instant;

use anyhow::Result;

use crate::cli::{confirm_overwrite, CleanArgs};
use crate::pipeline::{
    analyze_missing_values, clean_with, columns_with_missing, load_dataset_with_progress,
    save_dataset,
};
use crate::report::CleanSummary;
use crate::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_info, print_step_header, print_step_time, print_warning,
};

/// Run the cleaning pass and save the result next to the input
pub fn run_clean(args: &CleanArgs) -> Result<()> {
    let output_path = args.output_path();
    if output_path == args.input {
        anyhow::bail!(
            "Output path {} would overwrite the input file",
            output_path.display()
        );
    }

    if output_path.exists() && !args.no_confirm && !confirm_overwrite(&output_path)? {
        println!("Cancelled by user.");
        return Ok(());
    }

    print_banner(env!("CARGO_PKG_VERSION"));

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Reading dataset...");
    let (df, rows, cols, _memory_mb) =
        load_dataset_with_progress(&args.input, args.infer_schema_length)?;
    finish_with_success(&spinner, &format!("Loaded {} rows × {} columns", rows, cols));
    print_step_time(step_start.elapsed());

    // Step 2: Clean
    print_step_header(2, "Drop & Impute");
    let step_start = Instant::now();
    let config = args.to_config();
    let (mut cleaned, report) = clean_with(&df, &config)?;

    let skipped: Vec<&String> = config
        .drop_columns
        .iter()
        .chain(&config.mean_fill)
        .chain(&config.sentinel_fill)
        .chain(&config.zero_fill)
        .filter(|name| df.get_column_index(name).is_none())
        .collect();
    for name in &skipped {
        print_warning(&format!("Column '{}' not in dataset, skipped", name));
    }

    let remaining = columns_with_missing(&analyze_missing_values(&cleaned)?);
    if remaining.is_empty() {
        print_info("No missing values remain");
    } else {
        print_info(&format!(
            "Columns left with missing values: {}",
            remaining.join(", ")
        ));
    }
    print_step_time(step_start.elapsed());

    // Step 3: Save
    print_step_header(3, "Save Results");
    let step_start = Instant::now();
    let spinner = create_spinner("Writing output file...");
    match save_dataset(&mut cleaned, &output_path) {
        Ok(()) => finish_with_success(&spinner, &format!("Saved to {}", output_path.display())),
        Err(e) => {
            finish_with_warning(&spinner, "Write failed");
            return Err(e);
        }
    }
    print_step_time(step_start.elapsed());

    CleanSummary {
        rows,
        initial_columns: cols,
        final_columns: cleaned.width(),
        report,
    }
    .display();

    print_completion("Cleaning complete!");

    Ok(())
}

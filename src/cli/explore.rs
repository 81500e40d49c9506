//! `explore` subcommand: the exploratory walk through the passenger table

use std::time::Instant;

use anyhow::Result;
use console::style;

use crate::cli::ExploreArgs;
use crate::pipeline::{
    analyze_missing_values, binned_survival_rates, column_correlation_ratio, columns_with_missing,
    describe_columns, label_encode, load_dataset_with_progress, outcome_counts,
    pearson_correlation, rank_associations, require_columns, survival_rates, AGE_BINS, FARE_BINS,
};
use crate::report::{
    associations_table, categorical_summary_table, export_report, missing_table,
    numeric_summary_table, rates_table, PearsonEntry, ReportBuilder,
};
use crate::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_count, print_indented, print_info, print_step_header, print_step_time, print_success,
    print_warning,
};

/// Run the exploration and optionally export the JSON report
pub fn run_explore(args: &ExploreArgs) -> Result<()> {
    if !args.skip_pearson && args.pearson.len() != 2 {
        anyhow::bail!(
            "--pearson expects exactly two columns, got {}",
            args.pearson.len()
        );
    }

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        &args.input,
        &args.target,
        &args.features,
        args.report.as_deref(),
    );

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Reading dataset...");
    let (df, rows, cols, memory_mb) =
        load_dataset_with_progress(&args.input, args.infer_schema_length)?;
    finish_with_success(&spinner, "Dataset loaded");

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);
    print_step_time(step_start.elapsed());

    require_columns(&df, &[args.target.as_str()])?;
    let mut report = ReportBuilder::new(&args.input, &args.target, rows, cols);

    // Step 2: Missing values
    print_step_header(2, "Missing Values");
    let step_start = Instant::now();
    let missing = analyze_missing_values(&df)?;
    let incomplete = columns_with_missing(&missing);
    if incomplete.is_empty() {
        print_info("No missing values");
    } else {
        print_count("column(s) with missing values", incomplete.len(), None);
    }
    print_indented(&missing_table(&missing).to_string());
    report.set_missing(missing);
    print_step_time(step_start.elapsed());

    // Step 3: Column summaries
    print_step_header(3, "Column Summaries");
    let step_start = Instant::now();
    let summaries = describe_columns(&df)?;
    print_indented(&numeric_summary_table(&summaries).to_string());
    println!();
    print_indented(&categorical_summary_table(&summaries).to_string());
    report.set_summaries(summaries);
    print_step_time(step_start.elapsed());

    // Step 4: Survival rates
    print_step_header(4, "Survival Rates");
    let step_start = Instant::now();

    let counts = outcome_counts(&df, &args.target)?;
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    for (value, count) in &counts {
        println!(
            "      {} = {}: {} ({:.2}%)",
            args.target,
            style(value).bold(),
            count,
            100.0 * *count as f64 / total.max(1) as f64
        );
    }
    report.set_outcome_counts(counts);

    for group in &args.group_columns {
        if df.get_column_index(group).is_none() {
            print_warning(&format!("Column '{}' not found, skipping", group));
            continue;
        }
        let rates = survival_rates(&df, &args.target, group)?;
        println!();
        print_indented(&rates_table(group, &rates).to_string());
        report.add_survival(group, rates);
    }

    for (column, edges) in [(&args.age_column, &AGE_BINS), (&args.fare_column, &FARE_BINS)] {
        if df.get_column_index(column).is_none() {
            print_warning(&format!("Column '{}' not found, skipping", column));
            continue;
        }
        let rates = binned_survival_rates(&df, &args.target, column, edges)?;
        println!();
        print_indented(&rates_table(column, &rates).to_string());
        report.add_survival(column, rates);
    }
    print_step_time(step_start.elapsed());

    // Step 5: Correlation ratios
    print_step_header(5, "Correlation Ratios");
    let step_start = Instant::now();
    let features: Vec<String> = args
        .features
        .iter()
        .filter(|f| {
            let present = df.get_column_index(f).is_some();
            if !present {
                print_warning(&format!("Feature '{}' not found, skipping", f));
            }
            present
        })
        .cloned()
        .collect();

    let spinner = create_spinner("Computing correlation ratios...");
    let associations = rank_associations(&df, &args.target, &features)?;
    finish_with_success(&spinner, "Correlation ratios computed");
    print_indented(&associations_table(&args.target, &associations).to_string());

    // Fare is driven by class; report how much
    let fare_and_class = [&args.fare_column, &args.class_column];
    if let Some(absent) = fare_and_class
        .iter()
        .find(|name| df.get_column_index(name).is_none())
    {
        print_warning(&format!(
            "Column '{}' not found, skipping η({}, {})",
            absent, args.fare_column, args.class_column
        ));
    } else {
        let eta = column_correlation_ratio(
            df.column(&args.fare_column)?,
            df.column(&args.class_column)?,
        )?;
        println!(
            "\n      η({}, {}) = {}",
            args.fare_column,
            args.class_column,
            style(format!("{:.4}", eta)).yellow().bold()
        );
    }
    report.set_associations(associations);
    print_step_time(step_start.elapsed());

    // Step 6: Pearson correlation
    if !args.skip_pearson {
        print_step_header(6, "Pearson Correlation");
        let (x_name, y_name) = (&args.pearson[0], &args.pearson[1]);
        require_columns(&df, &[x_name.as_str(), y_name.as_str()])?;

        let x = df.column(x_name)?;
        let label_encoded = !x.dtype().is_primitive_numeric();
        let x = if label_encoded {
            label_encode(x)?
        } else {
            x.clone()
        };
        let r = pearson_correlation(&x, df.column(y_name)?)?;

        match r {
            Some(r) => {
                println!(
                    "      r({}{}, {}) = {}",
                    x_name,
                    if label_encoded { " [encoded]" } else { "" },
                    y_name,
                    style(format!("{:.4}", r)).yellow().bold()
                );
            }
            None => print_info("Correlation undefined (constant column or no complete rows)"),
        }
        report.set_pearson(PearsonEntry {
            x: x_name.clone(),
            y: y_name.clone(),
            label_encoded,
            r,
        });
    }

    if let Some(path) = &args.report {
        export_report(&report.build(), path)?;
        print_success(&format!("Report written to {}", path.display()));
    }

    print_completion("Exploration complete!");

    Ok(())
}

//! titanic-eda: Titanic survival exploration CLI
//!
//! Explore the passenger table, compute correlation ratios, clean missing
//! values and generate synthetic test fixtures.

use anyhow::Result;
use clap::Parser;

use titanic_eda::cli::{clean, eta, explore, fixtures, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Explore(args) => explore::run_explore(args),
        Commands::Clean(args) => clean::run_clean(args),
        Commands::Eta(args) => eta::run_eta(args),
        Commands::Fixtures { kind } => fixtures::run_fixtures(kind),
    }
}

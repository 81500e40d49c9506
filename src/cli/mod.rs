//! CLI module - argument parsing, subcommands and interactive prompts

mod args;
pub mod clean;
pub mod eta;
pub mod explore;
pub mod fixtures;
mod prompts;

pub use args::*;
pub use prompts::*;

//! Report module - terminal tables and JSON export

pub mod exploration_report;
pub mod summary;

pub use exploration_report::*;
pub use summary::*;

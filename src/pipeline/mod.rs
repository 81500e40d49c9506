//! Pipeline module - loading, exploration statistics and cleaning

pub mod clean;
pub mod correlation;
pub mod describe;
pub mod loader;
pub mod missing;
pub mod survival;

pub use clean::*;
pub use correlation::*;
pub use describe::*;
pub use loader::*;
pub use missing::*;
pub use survival::*;

//! Schema module - Configuration and result types for Social Learning runs.

mod config;
mod objective;
mod result;

pub use config::*;
pub use objective::*;
pub use result::*;

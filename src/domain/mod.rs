//! Domain types and DTOs for the configurator flow.

pub mod calculation;
pub mod ledger;
pub mod project;

// Re-export commonly used types
pub use calculation::*;
pub use ledger::*;
pub use project::*;

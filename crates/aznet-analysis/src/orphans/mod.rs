//! Usage/orphan analysis - finds infrastructure no subnet references.

pub mod analyzer;
pub mod types;

pub use analyzer::OrphanAnalyzer;
pub use types::OrphanedResources;

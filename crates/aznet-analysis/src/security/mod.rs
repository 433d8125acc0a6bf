//! Security rule classification - every rule against a fixed risk table.

pub mod classifier;
pub mod rules;
pub mod types;

pub use classifier::SecurityClassifier;
pub use types::{Finding, FindingCategory, Severity};

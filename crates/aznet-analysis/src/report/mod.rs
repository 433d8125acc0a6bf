//! Report assembly - summary, findings, orphans, and recommendations.

pub mod analyzer;
pub mod types;

pub use analyzer::TopologyAnalyzer;
pub use types::{AnalysisReport, TopologySummary};

//! aznet-analysis: analysis engine over a topology snapshot
//!
//! This crate provides the derived views for aznet:
//! - Orphans: unattached and unused infrastructure detection
//! - Security: rule classification against a fixed risk table
//! - Report: summary, findings, and recommendation assembly
//! - Diagram: deduplicated, renderable graph description

pub mod diagram;
pub mod orphans;
pub mod report;
pub mod security;

// Re-exports for convenience
pub use diagram::{
    Diagram, DiagramCluster, DiagramEdge, DiagramEmitter, DiagramNode, DiagramOptions,
    EdgeStyle, NodeLabel, NodeShape, SizeEstimate, TableLabel,
};
pub use orphans::{OrphanAnalyzer, OrphanedResources};
pub use report::{AnalysisReport, TopologyAnalyzer, TopologySummary};
pub use security::{Finding, FindingCategory, SecurityClassifier, Severity};

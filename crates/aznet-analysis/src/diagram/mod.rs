//! Diagram emission - a deduplicated, renderable description of the topology.
//!
//! The emitter consumes the canonical graph (identity and dedup come from the
//! resolver, never recomputed here) plus snapshot labels, and produces a
//! typed description: clusters, nodes, edges, table labels. `Diagram::to_dot`
//! serializes it to DOT; image rendering belongs to external backends.

pub mod emitter;
pub mod size;
pub mod types;

mod dot;

pub use emitter::DiagramEmitter;
pub use size::SizeEstimate;
pub use types::{
    Diagram, DiagramCluster, DiagramEdge, DiagramNode, DiagramOptions, EdgeStyle, NodeLabel,
    NodeShape, TableLabel, TableRow,
};

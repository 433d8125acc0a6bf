//! Canonical graph storage and accessors.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rustc_hash::FxHashMap;

use crate::model::{ResourceId, Topology};

use super::builder::GraphBuilder;
use super::types::{CanonicalNode, NodeKind, Relation};

/// An association edge between two canonical nodes.
#[derive(Debug, Clone, Copy)]
pub struct Edge<'a> {
    pub source: &'a CanonicalNode,
    pub target: &'a CanonicalNode,
    pub relation: Relation,
}

/// Identifier-keyed graph of canonical nodes and deduplicated association
/// edges. One node per unique identifier; one edge per
/// (source, target, relation) triple.
#[derive(Debug, Default)]
pub struct CanonicalGraph {
    pub(super) graph: DiGraph<CanonicalNode, Relation>,
    pub(super) index: FxHashMap<ResourceId, NodeIndex>,
}

impl CanonicalGraph {
    /// Resolve a snapshot into its canonical graph.
    ///
    /// Resolving the same snapshot twice yields identical node and edge
    /// cardinalities.
    pub fn from_topology(topology: &Topology) -> Self {
        GraphBuilder::default().build(topology)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, id: &ResourceId) -> bool {
        self.index.contains_key(id)
    }

    pub fn node(&self, id: &ResourceId) -> Option<&CanonicalNode> {
        self.index.get(id).map(|ix| &self.graph[*ix])
    }

    /// All canonical nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &CanonicalNode> {
        self.graph.node_indices().map(|ix| &self.graph[ix])
    }

    /// Nodes of one kind, in insertion order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &CanonicalNode> {
        self.nodes().filter(move |node| node.kind == kind)
    }

    /// All association edges.
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> {
        self.graph.edge_references().map(|edge| Edge {
            source: &self.graph[edge.source()],
            target: &self.graph[edge.target()],
            relation: *edge.weight(),
        })
    }

    /// Edges of one relation kind.
    pub fn edges_of(&self, relation: Relation) -> impl Iterator<Item = Edge<'_>> {
        self.edges().filter(move |edge| edge.relation == relation)
    }

    /// Incoming edges of the node with the given identifier.
    pub fn edges_to(&self, id: &ResourceId) -> impl Iterator<Item = Edge<'_>> {
        self.index.get(id).into_iter().flat_map(|ix| {
            self.graph
                .edges_directed(*ix, Direction::Incoming)
                .map(|edge| Edge {
                    source: &self.graph[edge.source()],
                    target: &self.graph[edge.target()],
                    relation: *edge.weight(),
                })
        })
    }
}

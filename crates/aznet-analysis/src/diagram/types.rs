//! Diagram description types.

use serde::{Deserialize, Serialize};

/// Exclusion flags for the emitter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramOptions {
    /// Emit the private-endpoint inventory table.
    pub include_endpoints: bool,
    /// Emit the legend cluster.
    pub include_legend: bool,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            include_endpoints: true,
            include_legend: true,
        }
    }
}

/// A renderable directed graph with clusters and table-shaped labels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    pub title: String,
    pub clusters: Vec<DiagramCluster>,
    /// Nodes outside any cluster.
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
}

/// A subgraph cluster (one per VNet, plus the legend).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramCluster {
    pub id: String,
    pub label: String,
    pub fill: String,
    pub nodes: Vec<DiagramNode>,
}

/// A single node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramNode {
    pub id: String,
    pub label: NodeLabel,
    pub shape: NodeShape,
    #[serde(default)]
    pub fill: String,
    /// Rendered with a dashed outline (external/unresolved resources).
    #[serde(default)]
    pub dashed: bool,
    /// Pinned to the sink rank (inventory tables).
    #[serde(default)]
    pub rank_sink: bool,
}

impl DiagramNode {
    pub fn text(
        id: impl Into<String>,
        label: impl Into<String>,
        shape: NodeShape,
        fill: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: NodeLabel::Text(label.into()),
            shape,
            fill: fill.into(),
            dashed: false,
            rank_sink: false,
        }
    }
}

/// Text or table content of a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeLabel {
    Text(String),
    Table(TableLabel),
}

/// A table-shaped label (endpoint inventories, legend).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableLabel {
    pub title: String,
    #[serde(default)]
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// One table row, optionally filled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub cells: Vec<String>,
    #[serde(default)]
    pub fill: Option<String>,
}

/// Node shapes a conforming renderer must support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    Box,
    Octagon,
    Parallelogram,
    Diamond,
    Ellipse,
    Point,
    Plaintext,
}

impl NodeShape {
    pub fn as_dot(&self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Octagon => "octagon",
            Self::Parallelogram => "parallelogram",
            Self::Diamond => "diamond",
            Self::Ellipse => "ellipse",
            Self::Point => "point",
            Self::Plaintext => "plaintext",
        }
    }
}

/// Edge line styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    Solid,
    Dashed,
    Dotted,
    Bold,
}

impl EdgeStyle {
    pub fn as_dot(&self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Bold => "bold",
        }
    }
}

/// A directed edge; `bidirectional` renders with arrowheads on both ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramEdge {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub label: String,
    pub style: EdgeStyle,
    pub color: String,
    #[serde(default)]
    pub bidirectional: bool,
}

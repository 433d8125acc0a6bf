//! DOT serialization of a diagram description.

use std::fmt::Write;

use super::types::{Diagram, DiagramEdge, DiagramNode, NodeLabel, TableLabel};

impl Diagram {
    /// Render the description as a Graphviz DOT document.
    pub fn to_dot(&self) -> String {
        let mut dot = String::new();

        dot.push_str("digraph NetworkTopology {\n");
        dot.push_str("  rankdir=TB;\n");
        dot.push_str("  node [shape=box, style=filled];\n");
        dot.push_str("  edge [fontsize=10];\n");
        dot.push_str("  graph [fontname=\"Helvetica\", fontsize=12];\n");
        dot.push_str("  node [fontname=\"Helvetica\", fontsize=10];\n");
        dot.push_str("  edge [fontname=\"Helvetica\"];\n\n");
        dot.push_str("  labelloc=\"t\";\n");
        let _ = writeln!(dot, "  label=\"{}\";\n", escape(&self.title));

        for cluster in &self.clusters {
            let _ = writeln!(dot, "  subgraph {} {{", cluster.id);
            let _ = writeln!(dot, "    label=\"{}\";", escape(&cluster.label));
            dot.push_str("    style=filled;\n    color=lightblue;\n");
            let _ = writeln!(dot, "    fillcolor=\"{}\";\n", cluster.fill);
            for node in &cluster.nodes {
                write_node(&mut dot, node, "    ");
            }
            dot.push_str("  }\n\n");
        }

        let (sink, free): (Vec<_>, Vec<_>) = self.nodes.iter().partition(|n| n.rank_sink);
        for node in free {
            write_node(&mut dot, node, "  ");
        }
        if !sink.is_empty() {
            dot.push_str("  { rank=sink;\n");
            for node in sink {
                write_node(&mut dot, node, "    ");
            }
            dot.push_str("  }\n");
        }
        dot.push('\n');

        for edge in &self.edges {
            write_edge(&mut dot, edge);
        }

        dot.push_str("}\n");
        dot
    }
}

fn write_node(dot: &mut String, node: &DiagramNode, indent: &str) {
    match &node.label {
        NodeLabel::Text(text) => {
            let _ = write!(dot, "{indent}{} [label=\"{}\"", node.id, escape(text));
            if !node.fill.is_empty() {
                let _ = write!(dot, ", fillcolor=\"{}\"", node.fill);
            }
            let _ = write!(dot, ", shape={}", node.shape.as_dot());
            if node.dashed {
                dot.push_str(", style=\"filled,dashed\"");
            }
            dot.push_str("];\n");
        }
        NodeLabel::Table(table) => {
            let _ = write!(dot, "{indent}{} [shape=plaintext, label=<\n", node.id);
            write_table(dot, table, indent);
            let _ = writeln!(dot, "{indent}>];");
        }
    }
}

fn write_table(dot: &mut String, table: &TableLabel, indent: &str) {
    let _ = writeln!(
        dot,
        "{indent}  <TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\">"
    );
    let width = table.columns.len().max(1);
    if !table.title.is_empty() {
        let _ = writeln!(
            dot,
            "{indent}    <TR><TD COLSPAN=\"{width}\" BGCOLOR=\"#cccccc\"><B>{}</B></TD></TR>",
            escape_html(&table.title)
        );
    }
    if !table.columns.is_empty() {
        let _ = write!(dot, "{indent}    <TR>");
        for column in &table.columns {
            let _ = write!(dot, "<TD><B>{}</B></TD>", escape_html(column));
        }
        dot.push_str("</TR>\n");
    }
    for row in &table.rows {
        let _ = write!(dot, "{indent}    <TR>");
        for cell in &row.cells {
            match &row.fill {
                Some(fill) => {
                    let _ = write!(dot, "<TD BGCOLOR=\"{fill}\">{}</TD>", escape_html(cell));
                }
                None => {
                    let _ = write!(dot, "<TD>{}</TD>", escape_html(cell));
                }
            }
        }
        dot.push_str("</TR>\n");
    }
    let _ = writeln!(dot, "{indent}  </TABLE>");
}

fn write_edge(dot: &mut String, edge: &DiagramEdge) {
    let _ = write!(
        dot,
        "  {} -> {} [style={}, color={}, label=\"{}\"",
        edge.from,
        edge.to,
        edge.style.as_dot(),
        edge.color,
        escape(&edge.label)
    );
    if edge.bidirectional {
        dot.push_str(", dir=both");
    }
    dot.push_str("];\n");
}

/// Escape a quoted DOT string; newlines become DOT line breaks.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::super::types::{DiagramNode, EdgeStyle, NodeShape};
    use super::*;

    #[test]
    fn escapes_quotes_and_newlines() {
        assert_eq!(escape("a\"b\nc"), "a\\\"b\\nc");
        assert_eq!(escape_html("a<b>&c"), "a&lt;b&gt;&amp;c");
    }

    #[test]
    fn renders_nodes_edges_and_clusters() {
        let mut diagram = Diagram {
            title: "t".into(),
            ..Default::default()
        };
        diagram.nodes.push(DiagramNode::text(
            "nat_shared",
            "NAT Gateway\nshared",
            NodeShape::Diamond,
            "#98FB98",
        ));
        diagram.edges.push(DiagramEdge {
            from: "subnet_0_0".into(),
            to: "nat_shared".into(),
            label: "egress".into(),
            style: EdgeStyle::Solid,
            color: "green".into(),
            bidirectional: false,
        });

        let dot = diagram.to_dot();
        assert!(dot.contains("digraph NetworkTopology {"));
        assert!(dot.contains("nat_shared [label=\"NAT Gateway\\nshared\", fillcolor=\"#98FB98\", shape=diamond];"));
        assert!(dot.contains("subnet_0_0 -> nat_shared [style=solid, color=green, label=\"egress\"];"));
    }
}

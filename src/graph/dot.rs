use std::path::Path;

use crate::error::Result;
use crate::graph::commit_graph::{CommitGraph, EdgeKind};

/// Renders the graph as a Graphviz `digraph`.
pub fn render_dot(graph: &CommitGraph) -> String {
    let mut output = String::new();

    output.push_str("digraph commits {\n");
    output.push_str("    rankdir=TB;\n");
    output.push_str("    node [shape=ellipse, fontsize=10, margin=\"0.20,0.12\"];\n");
    output.push_str("    edge [arrowsize=0.8];\n");

    for node in graph.nodes() {
        let label = node
            .label
            .lines()
            .iter()
            .map(|line| escape(line))
            .collect::<Vec<_>>()
            .join("\\n");
        output.push_str(&format!(
            "    \"{}\" [label=\"{}\"];\n",
            escape(&node.sha),
            label
        ));
    }

    for edge in graph.edges() {
        let attrs = match edge.kind {
            EdgeKind::Parent => "",
            EdgeKind::Squash => " [style=dashed]",
        };
        output.push_str(&format!(
            "    \"{}\" -> \"{}\"{};\n",
            escape(&edge.from),
            escape(&edge.to),
            attrs
        ));
    }

    output.push_str("}\n");
    output
}

pub fn write_dot(graph: &CommitGraph, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render_dot(graph))?;

    tracing::info!(
        "Wrote commit graph to {} (nodes={}, edges={})",
        path.display(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(())
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' | '\r' => escaped.push(' '),
            c => escaped.push(c),
        }
    }
    escaped
}

use anyhow::Result;
use petgraph::dot::Dot;
use std::fs;
use std::path::Path;

use crate::core::{DependencyGraph, EdgeType, NodeType};

/// Graphviz rendering of the dependency graph.
pub struct DotFormatter;

impl DotFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format(&self, graph: &DependencyGraph) -> String {
        let dot = Dot::with_attr_getters(
            graph,
            &[],
            &|_, edge| match edge.weight().edge_type {
                EdgeType::Imports => "color=blue".to_string(),
                EdgeType::Contains => "style=dashed".to_string(),
            },
            &|_, (_, node)| node_style(node.node_type).to_string(),
        );
        format!("{dot}")
    }

    pub fn format_to_file(&self, graph: &DependencyGraph, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format(graph))?;
        Ok(())
    }
}

impl Default for DotFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn node_style(node_type: NodeType) -> &'static str {
    match node_type {
        NodeType::File => "shape=ellipse, color=lightblue",
        NodeType::Class => "shape=diamond, color=orange",
        NodeType::Method | NodeType::Function => "shape=triangle, color=green",
    }
}

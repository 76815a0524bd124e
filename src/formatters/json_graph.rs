use anyhow::Result;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::{DependencyGraph, GraphStats};

/// Node/edge JSON document for renderers that want the graph rather than
/// the per-file map.
pub struct GraphJsonFormatter;

impl GraphJsonFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_to_file(&self, graph: &DependencyGraph, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format_graph(graph)?)?;
        Ok(())
    }

    pub fn format_graph(&self, graph: &DependencyGraph) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_value(graph))?)
    }

    pub fn to_value(&self, graph: &DependencyGraph) -> Value {
        let mut ids: HashMap<NodeIndex, &str> = HashMap::with_capacity(graph.node_count());
        let mut nodes = Vec::with_capacity(graph.node_count());

        for idx in graph.node_indices() {
            let node = &graph[idx];
            ids.insert(idx, node.id.as_str());

            let mut node_json = json!({
                "id": node.id,
                "label": node.name,
                "type": node.node_type.as_str(),
                "file": node.file_path,
            });
            if let Some(line) = node.line_number {
                node_json["line"] = json!(line);
            }
            if !node.args.is_empty() {
                node_json["args"] = json!(node.args);
            }
            nodes.push(node_json);
        }

        let edges: Vec<Value> = graph
            .edge_references()
            .map(|edge_ref| {
                let edge = edge_ref.weight();
                let mut edge_json = json!({
                    "source": ids[&edge_ref.source()],
                    "target": ids[&edge_ref.target()],
                    "type": edge.edge_type.as_str(),
                });
                if let Some(symbol) = &edge.symbol {
                    edge_json["symbol"] = json!(symbol);
                }
                edge_json
            })
            .collect();

        json!({
            "meta": GraphStats::from_graph(graph),
            "nodes": nodes,
            "edges": edges,
        })
    }
}

impl Default for GraphJsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

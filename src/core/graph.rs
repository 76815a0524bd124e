use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::{Directed, Graph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, trace};

use super::model::{DependencyMap, FileDependencies};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Copy)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    File,
    Class,
    Method,
    Function,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Copy)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    Imports,
    Contains,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::File => "file",
            NodeType::Class => "class",
            NodeType::Method => "method",
            NodeType::Function => "function",
        }
    }
}

impl EdgeType {
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeType::Imports => "imports",
            EdgeType::Contains => "contains",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Node {
    /// `path`, `path::Class`, `path::Class::method` or `path::function`
    pub id: String,
    pub name: String,
    pub node_type: NodeType,
    pub file_path: String,
    pub line_number: Option<usize>,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edge {
    pub edge_type: EdgeType,
    /// Imported symbol for symbol-level import edges
    pub symbol: Option<String>,
}

pub type DependencyGraph = Graph<Node, Edge, Directed>;

impl Node {
    pub fn new(id: String, name: String, node_type: NodeType, file_path: String) -> Self {
        Self {
            id,
            name,
            node_type,
            file_path,
            line_number: None,
            args: Vec::new(),
        }
    }

    pub fn with_line(mut self, line_number: usize) -> Self {
        self.line_number = Some(line_number);
        self
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }
}

impl Edge {
    pub fn new(edge_type: EdgeType) -> Self {
        Self {
            edge_type,
            symbol: None,
        }
    }

    pub fn with_symbol(mut self, symbol: String) -> Self {
        self.symbol = Some(symbol);
        self
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.symbol {
            Some(symbol) => write!(f, "imports {symbol}"),
            None => f.write_str(self.edge_type.as_str()),
        }
    }
}

/// Low-level graph assembly keyed by node id.
pub struct GraphBuilder {
    graph: DependencyGraph,
    node_map: HashMap<String, NodeIndex>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Insert `node` unless a node with the same id exists. Returns the
    /// index and whether the node was newly added.
    pub fn add_node(&mut self, node: Node) -> (NodeIndex, bool) {
        if let Some(&index) = self.node_map.get(&node.id) {
            return (index, false);
        }
        let id = node.id.clone();
        let index = self.graph.add_node(node);
        self.node_map.insert(id, index);
        (index, true)
    }

    pub fn add_edge(&mut self, source_id: &str, target_id: &str, edge: Edge) -> Option<EdgeIndex> {
        let source_idx = self.node_map.get(source_id)?;
        let target_idx = self.node_map.get(target_id)?;
        Some(self.graph.add_edge(*source_idx, *target_idx, edge))
    }

    pub fn get_node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    pub fn build(self) -> DependencyGraph {
        self.graph
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns a [`DependencyMap`] into a [`DependencyGraph`].
///
/// Import targets come from the resolver's canonical path when that file was
/// analyzed, otherwise from the first analyzed file (in map order) named
/// `{module}.py`. Imports that match neither are dropped without error.
pub struct DependencyGraphBuilder<'a> {
    dependencies: &'a DependencyMap,
    by_file_name: HashMap<String, &'a str>,
    builder: GraphBuilder,
}

impl<'a> DependencyGraphBuilder<'a> {
    pub fn new(dependencies: &'a DependencyMap) -> Self {
        let mut by_file_name = HashMap::new();
        for path in dependencies.keys() {
            if let Some(name) = Path::new(path).file_name() {
                by_file_name
                    .entry(name.to_string_lossy().into_owned())
                    .or_insert(path.as_str());
            }
        }

        Self {
            dependencies,
            by_file_name,
            builder: GraphBuilder::new(),
        }
    }

    pub fn build(mut self) -> DependencyGraph {
        let dependencies = self.dependencies;
        for path in dependencies.keys() {
            let name = file_label(path);
            self.builder
                .add_node(Node::new(path.clone(), name, NodeType::File, path.clone()));
        }

        for (path, deps) in dependencies {
            self.add_import_edges(path, deps);
            self.add_declarations(path, deps);
        }

        let graph = self.builder.build();
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "dependency graph built"
        );
        graph
    }

    /// Analyzed file that `module`, imported by `deps`, refers to.
    pub fn resolve_target(&self, deps: &FileDependencies, module: &str) -> Option<&'a str> {
        let dependencies: &'a DependencyMap = self.dependencies;
        if let Some(target) = deps.resolved_path(module) {
            if let Some((path, _)) = dependencies.get_key_value(target) {
                return Some(path.as_str());
            }
        }
        self.by_file_name.get(&format!("{module}.py")).copied()
    }

    fn add_import_edges(&mut self, path: &str, deps: &FileDependencies) {
        for module in &deps.imports {
            match self.resolve_target(deps, module) {
                Some(target) => {
                    self.builder.add_edge(path, target, Edge::new(EdgeType::Imports));
                }
                None => trace!(file = path, module = %module, "no analyzed file for import"),
            }
        }

        for name in &deps.imported_names {
            let Some((module, symbol)) = name.split_once('.') else {
                continue;
            };
            if let Some(target) = self.resolve_target(deps, module) {
                let edge = Edge::new(EdgeType::Imports).with_symbol(symbol.to_string());
                self.builder.add_edge(path, target, edge);
            }
        }
    }

    fn add_declarations(&mut self, path: &str, deps: &FileDependencies) {
        for class in &deps.classes {
            let class_id = format!("{path}::{}", class.name);
            let node = Node::new(
                class_id.clone(),
                class.name.clone(),
                NodeType::Class,
                path.to_string(),
            );
            if self.builder.add_node(node).1 {
                self.builder
                    .add_edge(path, &class_id, Edge::new(EdgeType::Contains));
            }

            for method in &class.methods {
                let method_id = format!("{class_id}::{}", method.name);
                let node = Node::new(
                    method_id.clone(),
                    method.name.clone(),
                    NodeType::Method,
                    path.to_string(),
                )
                .with_args(method.args.clone());
                if self.builder.add_node(node).1 {
                    self.builder
                        .add_edge(&class_id, &method_id, Edge::new(EdgeType::Contains));
                }
            }
        }

        for function in &deps.functions {
            let function_id = format!("{path}::{}", function.name);
            let node = Node::new(
                function_id.clone(),
                function.name.clone(),
                NodeType::Function,
                path.to_string(),
            )
            .with_line(function.lineno)
            .with_args(function.args.clone());
            if self.builder.add_node(node).1 {
                self.builder
                    .add_edge(path, &function_id, Edge::new(EdgeType::Contains));
            }
        }
    }
}

/// Counts of nodes and edges by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub files: usize,
    pub classes: usize,
    pub methods: usize,
    pub functions: usize,
    pub import_edges: usize,
    pub contains_edges: usize,
}

impl GraphStats {
    pub fn from_graph(graph: &DependencyGraph) -> Self {
        let mut stats = Self::default();
        for node in graph.node_weights() {
            match node.node_type {
                NodeType::File => stats.files += 1,
                NodeType::Class => stats.classes += 1,
                NodeType::Method => stats.methods += 1,
                NodeType::Function => stats.functions += 1,
            }
        }
        for edge in graph.raw_edges() {
            match edge.weight.edge_type {
                EdgeType::Imports => stats.import_edges += 1,
                EdgeType::Contains => stats.contains_edges += 1,
            }
        }
        stats
    }
}

/// Base name of a file path, used as its display label.
fn file_label(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

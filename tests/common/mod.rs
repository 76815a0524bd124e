//! Shared helpers for building throwaway project trees.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use codemap::{AnalyzerConfig, DependencyGraph, DependencyMap, ProjectAnalyzer};
use tempfile::TempDir;

/// Create a temp project from `(relative path, contents)` pairs.
pub fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (path, contents) in files {
        write(dir.path(), path, contents);
    }
    dir
}

pub fn write(root: &Path, path: &str, contents: &str) {
    let full = root.join(path);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(full, contents).unwrap();
}

pub fn config(root: &Path, include_external: bool) -> AnalyzerConfig {
    AnalyzerConfig::new(root)
        .with_extensions([".py"])
        .with_include_external(include_external)
}

pub fn analyze(root: &Path, include_external: bool) -> DependencyMap {
    ProjectAnalyzer::new(config(root, include_external))
        .analyze()
        .unwrap()
}

pub fn analyze_graph(root: &Path, include_external: bool) -> (DependencyMap, DependencyGraph) {
    ProjectAnalyzer::new(config(root, include_external))
        .analyze_graph()
        .unwrap()
}

/// `(source id, target id, symbol)` for every import edge.
pub fn import_edges(graph: &DependencyGraph) -> Vec<(String, String, Option<String>)> {
    use codemap::core::EdgeType;
    use petgraph::visit::EdgeRef;

    graph
        .edge_references()
        .filter(|e| e.weight().edge_type == EdgeType::Imports)
        .map(|e| {
            (
                graph[e.source()].id.clone(),
                graph[e.target()].id.clone(),
                e.weight().symbol.clone(),
            )
        })
        .collect()
}

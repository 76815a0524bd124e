//! # codemap
//!
//! Static dependency graph extraction for Python source trees.
//!
//! For every source file under a project root, codemap records which other
//! project files it imports (module and symbol level) and the classes,
//! methods and functions it declares. The result is a per-file
//! [`DependencyMap`] and a [`DependencyGraph`] of file and declaration nodes
//! joined by `imports` and `contains` edges, ready for a renderer.
//!
//! ```no_run
//! use codemap::{AnalyzerConfig, ProjectAnalyzer};
//!
//! let config = AnalyzerConfig::new("path/to/project").with_extensions([".py"]);
//! let (dependencies, graph) = ProjectAnalyzer::new(config).analyze_graph()?;
//! println!("{} files, {} nodes", dependencies.len(), graph.node_count());
//! # Ok::<(), codemap::Error>(())
//! ```
//!
//! ## Output Formats
//!
//! - **Dependencies**: the per-file JSON map
//! - **Graph**: node/edge JSON
//! - **DOT**: Graphviz source

pub mod core;
pub mod error;
pub mod formatters;
pub mod parsers;

pub use crate::core::{
    AnalyzerConfig, DependencyGraph, DependencyGraphBuilder, DependencyMap, FileDependencies,
    ProjectAnalyzer,
};
pub use crate::error::{Error, Result};

pub mod analyzer;
pub mod config;
pub mod graph;
pub mod model;
pub mod resolver;
pub mod scanner;

pub use analyzer::ProjectAnalyzer;
pub use config::AnalyzerConfig;
pub use graph::{
    DependencyGraph, DependencyGraphBuilder, Edge, EdgeType, GraphStats, Node, NodeType,
};
pub use model::{ClassInfo, DependencyMap, FileDependencies, FunctionInfo, MethodInfo, RawImports};
pub use resolver::{ImportResolver, ModuleOrigin};
pub use scanner::{FileScanner, ScannedFile};

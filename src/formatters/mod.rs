pub mod dependencies;
pub mod dot;
pub mod json_graph;

pub use dependencies::DependenciesFormatter;
pub use dot::DotFormatter;
pub use json_graph::GraphJsonFormatter;

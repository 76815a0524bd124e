mod common;

use codemap::core::graph::{Edge, EdgeType, GraphBuilder, GraphStats, Node, NodeType};
use codemap::core::model::{ClassInfo, FileDependencies, FunctionInfo, MethodInfo};
use codemap::{DependencyGraphBuilder, DependencyMap};
use common::{analyze_graph, import_edges, project};
use pretty_assertions::assert_eq;

fn file_node(path: &str) -> Node {
    Node::new(path.to_string(), path.to_string(), NodeType::File, path.to_string())
}

fn edge(source: &str, target: &str, symbol: Option<&str>) -> (String, String, Option<String>) {
    (
        source.to_string(),
        target.to_string(),
        symbol.map(str::to_string),
    )
}

#[test]
fn graph_builder_adds_nodes_and_edges() {
    let mut gb = GraphBuilder::new();

    let (_, added_a) = gb.add_node(file_node("a.py"));
    let (_, added_b) = gb.add_node(file_node("b.py"));
    assert!(added_a && added_b);

    assert!(gb
        .add_edge("a.py", "b.py", Edge::new(EdgeType::Imports))
        .is_some());

    let graph = gb.build();
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn add_node_is_idempotent_per_id() {
    let mut gb = GraphBuilder::new();
    let (first, _) = gb.add_node(file_node("a.py"));
    let (second, added) = gb.add_node(file_node("a.py"));

    assert_eq!(first, second);
    assert!(!added);
    assert_eq!(gb.get_node_index("a.py"), Some(first));
}

#[test]
fn add_edge_returns_none_when_missing_nodes() {
    let mut gb = GraphBuilder::new();
    gb.add_node(file_node("a.py"));

    assert!(gb
        .add_edge("a.py", "missing.py", Edge::new(EdgeType::Imports))
        .is_none());
}

#[test]
fn two_file_project_has_one_import_edge() {
    let dir = project(&[("a.py", "import b\n"), ("b.py", "")]);
    let (deps, graph) = analyze_graph(dir.path(), false);

    assert_eq!(deps["a.py"].imports, vec!["b"]);
    assert!(deps["b.py"].imports.is_empty());
    assert_eq!(import_edges(&graph), vec![edge("a.py", "b.py", None)]);
}

#[test]
fn class_methods_and_function_produce_four_contains_edges() {
    let code = r#"
class Service:
    def __init__(self, repo):
        self.repo = repo

    def run(self):
        return helper()

def helper():
    return 1
"#;
    let dir = project(&[("service.py", code)]);
    let (_, graph) = analyze_graph(dir.path(), false);

    assert_eq!(
        GraphStats::from_graph(&graph),
        GraphStats {
            files: 1,
            classes: 1,
            methods: 2,
            functions: 1,
            import_edges: 0,
            contains_edges: 4,
        }
    );

    let ids: Vec<_> = graph.node_weights().map(|n| n.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "service.py",
            "service.py::Service",
            "service.py::Service::__init__",
            "service.py::Service::run",
            "service.py::helper",
        ]
    );
}

#[test]
fn symbol_imports_add_tagged_edges_alongside_module_edge() {
    let dir = project(&[
        ("app.py", "import models\nfrom models import User, Group\n"),
        ("models.py", "class User:\n    pass\n\nclass Group:\n    pass\n"),
    ]);
    let (_, graph) = analyze_graph(dir.path(), false);

    assert_eq!(
        import_edges(&graph),
        vec![
            edge("app.py", "models.py", None),
            edge("app.py", "models.py", Some("Group")),
            edge("app.py", "models.py", Some("User")),
        ]
    );
}

#[test]
fn package_import_targets_init_file() {
    let dir = project(&[
        ("app.py", "from models import User\n"),
        ("models/__init__.py", "class User:\n    pass\n"),
    ]);
    let (_, graph) = analyze_graph(dir.path(), false);

    assert_eq!(
        import_edges(&graph),
        vec![
            edge("app.py", "models/__init__.py", None),
            edge("app.py", "models/__init__.py", Some("User")),
        ]
    );
}

#[test]
fn canonical_target_beats_file_name_order() {
    let dir = project(&[
        ("main.py", "import util\n"),
        ("pkg/util.py", ""),
        ("pkg/mod.py", "import helpers\n"),
        ("pkg/helpers.py", ""),
        ("util.py", ""),
    ]);
    let (_, graph) = analyze_graph(dir.path(), false);

    assert_eq!(
        import_edges(&graph),
        vec![
            edge("main.py", "util.py", None),
            edge("pkg/mod.py", "pkg/helpers.py", None),
        ]
    );
}

#[test]
fn unresolved_external_import_adds_no_edge() {
    let dir = project(&[("a.py", "import os\nfrom typing import List\n")]);
    let (deps, graph) = analyze_graph(dir.path(), true);

    assert_eq!(deps["a.py"].imports, vec!["os", "typing"]);
    assert!(import_edges(&graph).is_empty());
    assert_eq!(graph.node_count(), 1);
}

#[test]
fn file_name_fallback_without_resolver_targets() {
    let mut deps = DependencyMap::new();
    deps.insert(
        "app.py".to_string(),
        FileDependencies {
            imports: vec!["helpers".to_string()],
            imported_names: vec!["helpers.slugify".to_string()],
            ..FileDependencies::default()
        },
    );
    deps.insert("lib/helpers.py".to_string(), FileDependencies::default());
    deps.insert("other/helpers.py".to_string(), FileDependencies::default());

    let graph = DependencyGraphBuilder::new(&deps).build();

    assert_eq!(
        import_edges(&graph),
        vec![
            edge("app.py", "lib/helpers.py", None),
            edge("app.py", "lib/helpers.py", Some("slugify")),
        ]
    );
}

#[test]
fn same_named_declarations_share_one_node() {
    let mut deps = DependencyMap::new();
    deps.insert(
        "dup.py".to_string(),
        FileDependencies {
            functions: vec![
                FunctionInfo {
                    name: "f".to_string(),
                    lineno: 1,
                    args: vec![],
                },
                FunctionInfo {
                    name: "f".to_string(),
                    lineno: 4,
                    args: vec!["x".to_string()],
                },
            ],
            classes: vec![ClassInfo {
                name: "C".to_string(),
                methods: vec![MethodInfo {
                    name: "m".to_string(),
                    args: vec!["self".to_string()],
                }],
            }],
            ..FileDependencies::default()
        },
    );

    let graph = DependencyGraphBuilder::new(&deps).build();
    let stats = GraphStats::from_graph(&graph);

    assert_eq!(stats.functions, 1);
    assert_eq!(stats.contains_edges, 3);

    let function = graph
        .node_weights()
        .find(|n| n.node_type == NodeType::Function)
        .unwrap();
    assert_eq!(function.line_number, Some(1));
}

#[test]
fn declarations_never_point_back_at_files() {
    let dir = project(&[("m.py", "class A:\n    def f(self):\n        pass\n")]);
    let (_, graph) = analyze_graph(dir.path(), false);

    for edge in graph.raw_edges() {
        let source = &graph[edge.source()];
        let target = &graph[edge.target()];
        if edge.weight.edge_type == EdgeType::Contains {
            assert_ne!(target.node_type, NodeType::File);
            assert_ne!(source.node_type, NodeType::Method);
        }
    }
}

mod common;

use codemap::formatters::{DotFormatter, GraphJsonFormatter};
use common::{analyze_graph, project};
use serde_json::Value;

fn sample() -> tempfile::TempDir {
    project(&[
        ("a.py", "from b import Widget\n\ndef main(argv):\n    return Widget()\n"),
        ("b.py", "class Widget:\n    def draw(self, canvas):\n        pass\n"),
    ])
}

#[test]
fn graph_json_formatter_outputs_valid_json() {
    let dir = sample();
    let (_, graph) = analyze_graph(dir.path(), false);

    let out = dir.path().join("graph.json");
    GraphJsonFormatter::new()
        .format_to_file(&graph, &out)
        .unwrap();

    let data = std::fs::read_to_string(&out).unwrap();
    assert!(data.starts_with("{\n  \""), "graph JSON is indented");
    let v: Value = serde_json::from_str(&data).unwrap();

    assert_eq!(v["meta"]["files"], 2);
    assert_eq!(v["meta"]["import_edges"], 2);
    assert_eq!(v["meta"]["contains_edges"], 3);
    assert_eq!(v["nodes"].as_array().unwrap().len(), 5);

    let symbol_edge = v["edges"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["symbol"] == "Widget")
        .unwrap();
    assert_eq!(symbol_edge["source"], "a.py");
    assert_eq!(symbol_edge["target"], "b.py");
    assert_eq!(symbol_edge["type"], "imports");

    let main = v["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["id"] == "a.py::main")
        .unwrap();
    assert_eq!(main["type"], "function");
    assert_eq!(main["line"], 3);
    assert_eq!(main["args"][0], "argv");
}

#[test]
fn dot_formatter_lists_every_node() {
    let dir = sample();
    let (_, graph) = analyze_graph(dir.path(), false);

    let dot = DotFormatter::new().format(&graph);
    assert!(dot.starts_with("digraph"));
    for label in ["a.py", "b.py", "Widget", "draw", "main"] {
        assert!(dot.contains(label), "missing {label} in {dot}");
    }
    assert!(dot.contains("imports Widget"));
}

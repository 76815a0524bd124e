use std::collections::HashSet;
use std::path::Path;
use tree_sitter::Node as TSNode;

use super::common::{children_by_field, extract_text, named_children, preorder, TreeSitterParser};
use super::{LanguageParser, ParseResult};
use crate::core::model::{ClassInfo, FunctionInfo, MethodInfo, RawImports};
use crate::error::{Error, Result};

/// Syntax nodes the extractor cares about. Everything else is `Other` and
/// is only descended into.
#[derive(Debug, Clone, Copy)]
enum PySyntax<'tree> {
    Import(TSNode<'tree>),
    ImportFrom(TSNode<'tree>),
    FutureImport(TSNode<'tree>),
    Function(TSNode<'tree>),
    Class(TSNode<'tree>),
    Decorated(TSNode<'tree>),
    Other,
}

impl<'tree> PySyntax<'tree> {
    fn classify(node: TSNode<'tree>) -> Self {
        match node.kind() {
            "import_statement" => PySyntax::Import(node),
            "import_from_statement" => PySyntax::ImportFrom(node),
            "future_import_statement" => PySyntax::FutureImport(node),
            "function_definition" => PySyntax::Function(node),
            "class_definition" => PySyntax::Class(node),
            "decorated_definition" => PySyntax::Decorated(node),
            _ => PySyntax::Other,
        }
    }
}

pub struct PythonParser;

impl PythonParser {
    pub fn new() -> Self {
        Self
    }

    fn extract(&self, root: &TSNode, source: &[u8]) -> ParseResult {
        let mut result = ParseResult::default();
        // ids of function nodes already reported as class methods
        let mut methods: HashSet<usize> = HashSet::new();

        for node in preorder(root) {
            match PySyntax::classify(node) {
                PySyntax::Import(stmt) => self.process_import(&stmt, source, &mut result.imports),
                PySyntax::ImportFrom(stmt) => {
                    self.process_import_from(&stmt, source, &mut result.imports)
                }
                PySyntax::FutureImport(stmt) => {
                    for name in children_by_field(&stmt, "name") {
                        if let Some(symbol) = imported_path(&name, source) {
                            result.imports.add_symbol("__future__", &symbol);
                        }
                    }
                }
                PySyntax::Class(class) => {
                    if let Some(info) = self.process_class(&class, source, &mut methods) {
                        result.classes.push(info);
                    }
                }
                PySyntax::Function(func) => {
                    if methods.contains(&func.id()) {
                        continue;
                    }
                    if let Some(info) = self.process_function(&func, source) {
                        result.functions.push(info);
                    }
                }
                // The wrapped definition is visited on its own
                PySyntax::Decorated(_) | PySyntax::Other => {}
            }
        }

        result
    }

    /// `import a.b, c as d`
    fn process_import(&self, stmt: &TSNode, source: &[u8], imports: &mut RawImports) {
        for name in children_by_field(stmt, "name") {
            if let Some(path) = imported_path(&name, source) {
                imports.add_module(&path);
            }
        }
    }

    /// `from a.b import c, d as e` and `from a import *`
    fn process_import_from(&self, stmt: &TSNode, source: &[u8], imports: &mut RawImports) {
        let Some(module_node) = stmt.child_by_field_name("module_name") else {
            return;
        };
        // `from . import x` names no module and is skipped
        let module = match module_node.kind() {
            "relative_import" => named_children(&module_node)
                .into_iter()
                .find(|child| child.kind() == "dotted_name")
                .map(|dotted| compact_text(&dotted, source)),
            _ => Some(compact_text(&module_node, source)),
        };
        let Some(module) = module.filter(|m| !m.is_empty()) else {
            return;
        };

        let names = children_by_field(stmt, "name");
        for name in &names {
            if let Some(symbol) = imported_path(name, source) {
                imports.add_symbol(&module, &symbol);
            }
        }

        let wildcard = named_children(stmt)
            .iter()
            .any(|child| child.kind() == "wildcard_import");
        if wildcard {
            imports.add_symbol(&module, "*");
        } else if names.is_empty() {
            imports.add_module(&module);
        }
    }

    fn process_class(
        &self,
        class_node: &TSNode,
        source: &[u8],
        methods: &mut HashSet<usize>,
    ) -> Option<ClassInfo> {
        let name = class_node.child_by_field_name("name")?;
        let mut info = ClassInfo {
            name: extract_text(&name, source).to_string(),
            methods: Vec::new(),
        };

        if let Some(body) = class_node.child_by_field_name("body") {
            for child in named_children(&body) {
                let Some(func) = unwrap_function(child) else {
                    continue;
                };
                methods.insert(func.id());
                if let Some(method) = self.process_function(&func, source) {
                    info.methods.push(MethodInfo {
                        name: method.name,
                        args: method.args,
                    });
                }
            }
        }

        Some(info)
    }

    fn process_function(&self, func_node: &TSNode, source: &[u8]) -> Option<FunctionInfo> {
        let name = func_node.child_by_field_name("name")?;
        let args = func_node
            .child_by_field_name("parameters")
            .map(|params| positional_parameters(&params, source))
            .unwrap_or_default();

        Some(FunctionInfo {
            name: extract_text(&name, source).to_string(),
            lineno: func_node.start_position().row + 1,
            args,
        })
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for PythonParser {
    fn parse_source(&self, source: &str, file_path: &Path) -> Result<ParseResult> {
        let mut parser = TreeSitterParser::new(tree_sitter_python::language(), file_path)?;
        let tree = parser.parse_source(source, file_path)?;
        let root = tree.root_node();

        if let Some((node, construct)) = legacy_construct(&root) {
            let pos = node.start_position();
            return Err(Error::Parse {
                path: file_path.to_path_buf(),
                reason: format!(
                    "Python 2 {construct} at line {}, column {}",
                    pos.row + 1,
                    pos.column + 1
                ),
            });
        }

        Ok(self.extract(&root, source.as_bytes()))
    }

    fn language_name(&self) -> &str {
        "python"
    }
}

/// First Python 2 only statement in the tree. The grammar still accepts
/// these forms, but they are syntax errors for Python 3.
fn legacy_construct<'tree>(root: &TSNode<'tree>) -> Option<(TSNode<'tree>, &'static str)> {
    preorder(root).into_iter().find_map(|node| match node.kind() {
        "print_statement" => Some((node, "print statement")),
        "exec_statement" => Some((node, "exec statement")),
        // `except E, e:`
        "except_clause" if has_token(&node, ",") => Some((node, "except clause")),
        _ => None,
    })
}

fn has_token(node: &TSNode, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}

/// The function behind a class-body statement, looking through decorators.
fn unwrap_function(node: TSNode) -> Option<TSNode> {
    match PySyntax::classify(node) {
        PySyntax::Function(func) => Some(func),
        PySyntax::Decorated(decorated) => decorated
            .child_by_field_name("definition")
            .filter(|def| def.kind() == "function_definition"),
        PySyntax::Import(_)
        | PySyntax::ImportFrom(_)
        | PySyntax::FutureImport(_)
        | PySyntax::Class(_)
        | PySyntax::Other => None,
    }
}

/// Dotted path of an import target, ignoring any `as` alias.
fn imported_path(node: &TSNode, source: &[u8]) -> Option<String> {
    let target = match node.kind() {
        "aliased_import" => node.child_by_field_name("name")?,
        _ => *node,
    };
    let text = compact_text(&target, source);
    (!text.is_empty()).then_some(text)
}

/// Node text with whitespace removed (`a . b` is a valid dotted name).
fn compact_text(node: &TSNode, source: &[u8]) -> String {
    extract_text(node, source)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Names of positional-or-keyword parameters, in order. Anything before a
/// `/` is positional-only and dropped; collection stops at `*`, `*args` or
/// `**kwargs`.
fn positional_parameters(params: &TSNode, source: &[u8]) -> Vec<String> {
    let mut names = Vec::new();

    for param in named_children(params) {
        match param.kind() {
            "identifier" => names.push(extract_text(&param, source).to_string()),
            "default_parameter" | "typed_default_parameter" => {
                if let Some(name) = param
                    .child_by_field_name("name")
                    .filter(|name| name.kind() == "identifier")
                {
                    names.push(extract_text(&name, source).to_string());
                }
            }
            "typed_parameter" => match named_children(&param).first() {
                Some(name) if name.kind() == "identifier" => {
                    names.push(extract_text(name, source).to_string())
                }
                _ => break,
            },
            "positional_separator" => names.clear(),
            "list_splat_pattern" | "dictionary_splat_pattern" | "keyword_separator" => break,
            _ => {}
        }
    }

    names
}

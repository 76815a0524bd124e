use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tree_sitter::{Language, Node as TSNode, Parser, Tree};

use crate::error::{Error, Result};

pub struct TreeSitterParser {
    parser: Parser,
}

impl TreeSitterParser {
    pub fn new(language: Language, file_path: &Path) -> Result<Self> {
        let mut parser = Parser::new();
        parser.set_language(language).map_err(|err| Error::Parse {
            path: file_path.to_path_buf(),
            reason: format!("grammar unavailable: {err}"),
        })?;
        Ok(Self { parser })
    }

    /// Parse `source`, rejecting trees that contain syntax errors.
    pub fn parse_source(&mut self, source: &str, file_path: &Path) -> Result<Tree> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| Error::Parse {
                path: file_path.to_path_buf(),
                reason: "parser produced no tree".to_string(),
            })?;

        let root = tree.root_node();
        if root.has_error() {
            let reason = match first_error(&root) {
                Some(node) => {
                    let pos = node.start_position();
                    format!("syntax error at line {}, column {}", pos.row + 1, pos.column + 1)
                }
                None => "syntax error".to_string(),
            };
            return Err(Error::Parse {
                path: file_path.to_path_buf(),
                reason,
            });
        }

        Ok(tree)
    }
}

/// Read a whole source file. The handle is closed before this returns.
pub fn read_source(file_path: &Path) -> Result<String> {
    let read = || -> std::io::Result<String> {
        let file = File::open(file_path)?;
        let file_size = file.metadata()?.len() as usize;

        let mut reader = BufReader::with_capacity(file_size.clamp(1, 8192), file);
        let mut content = String::with_capacity(file_size);
        reader.read_to_string(&mut content)?;
        Ok(content)
    };

    read().map_err(|source| Error::FileRead {
        path: file_path.to_path_buf(),
        source,
    })
}

pub fn extract_text<'a>(node: &TSNode, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// Depth-first search for the first `ERROR` or missing node.
fn first_error<'tree>(root: &TSNode<'tree>) -> Option<TSNode<'tree>> {
    let mut stack = vec![*root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !node.has_error() {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    None
}

/// All nodes of the tree in source order (pre-order).
pub fn preorder<'tree>(root: &TSNode<'tree>) -> Vec<TSNode<'tree>> {
    let mut nodes = Vec::new();
    let mut stack = vec![*root];
    while let Some(node) = stack.pop() {
        nodes.push(node);
        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    nodes
}

pub fn named_children<'tree>(node: &TSNode<'tree>) -> Vec<TSNode<'tree>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

pub fn children_by_field<'tree>(node: &TSNode<'tree>, field: &str) -> Vec<TSNode<'tree>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor).collect()
}

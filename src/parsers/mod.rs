pub mod common;
pub mod python;

use std::path::Path;

use crate::core::model::{ClassInfo, FunctionInfo, RawImports};
use crate::error::Result;

/// Imports and declarations found in one file, before import resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    pub imports: RawImports,
    pub functions: Vec<FunctionInfo>,
    pub classes: Vec<ClassInfo>,
}

pub trait LanguageParser {
    fn parse_source(&self, source: &str, file_path: &Path) -> Result<ParseResult>;

    fn language_name(&self) -> &str;

    fn parse_file(&self, file_path: &Path) -> Result<ParseResult> {
        let source = common::read_source(file_path)?;
        self.parse_source(&source, file_path)
    }
}

pub struct ParserFactory;

impl ParserFactory {
    pub fn new() -> Self {
        Self
    }

    /// Parser for the grammar matching the file's extension. Extensions
    /// without a grammar yield `None`.
    pub fn parser_for(&self, file_path: &Path) -> Option<Box<dyn LanguageParser + Send + Sync>> {
        match file_path.extension().and_then(|ext| ext.to_str()) {
            Some("py" | "pyi" | "pyw") => Some(Box::new(python::PythonParser::new())),
            _ => None,
        }
    }
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

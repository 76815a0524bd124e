use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Per-file analysis results keyed by path relative to the project root.
///
/// Ordered by path, which also fixes the tie-break order used when the graph
/// builder falls back to matching imports by file name.
pub type DependencyMap = BTreeMap<String, FileDependencies>;

/// Import names exactly as they appear in one file, before any filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawImports {
    /// First dotted segment of every imported module
    pub modules: BTreeSet<String>,
    /// `module.symbol` entries; the module part is always in `modules`
    pub symbols: BTreeSet<String>,
}

impl RawImports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a module-level import of `path` (`import a.b.c`).
    pub fn add_module(&mut self, path: &str) {
        let Some(module) = module_prefix(path) else {
            return;
        };
        self.modules.insert(module.to_string());
        if path.len() > module.len() {
            self.symbols.insert(path.to_string());
        }
    }

    /// Record `from <path> import <symbol>`.
    pub fn add_symbol(&mut self, path: &str, symbol: &str) {
        let Some(module) = module_prefix(path) else {
            return;
        };
        self.modules.insert(module.to_string());
        self.symbols.insert(format!("{module}.{symbol}"));
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.symbols.is_empty()
    }
}

/// First dotted segment of an import path, `None` for an empty path.
pub fn module_prefix(path: &str) -> Option<&str> {
    path.split('.').next().filter(|segment| !segment.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub name: String,
    pub lineno: usize,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodInfo {
    pub name: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub name: String,
    pub methods: Vec<MethodInfo>,
}

/// Everything the analysis knows about one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDependencies {
    pub imports: Vec<String>,
    pub imported_names: Vec<String>,
    pub functions: Vec<FunctionInfo>,
    pub classes: Vec<ClassInfo>,
    /// Module name to the project file it resolved to. Not part of the
    /// interchange document.
    #[serde(skip)]
    pub resolved_modules: BTreeMap<String, String>,
}

impl FileDependencies {
    /// Path of the file `module` resolved to, if the resolver found one.
    pub fn resolved_path(&self, module: &str) -> Option<&str> {
        self.resolved_modules.get(module).map(String::as_str)
    }

    /// Symbol entries whose module has no module-level entry. Empty for
    /// every file the analyzer produces.
    pub fn orphaned_symbols(&self) -> Vec<&str> {
        self.imported_names
            .iter()
            .filter(|name| {
                module_prefix(name).map_or(true, |module| !self.imports.iter().any(|m| m == module))
            })
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_import_is_module_level_only() {
        let mut imports = RawImports::new();
        imports.add_module("os");
        assert_eq!(imports.modules.iter().collect::<Vec<_>>(), vec!["os"]);
        assert!(imports.symbols.is_empty());
    }

    #[test]
    fn dotted_import_keeps_full_path_as_symbol() {
        let mut imports = RawImports::new();
        imports.add_module("os.path");
        assert!(imports.modules.contains("os"));
        assert!(imports.symbols.contains("os.path"));
    }

    #[test]
    fn from_import_uses_first_segment() {
        let mut imports = RawImports::new();
        imports.add_symbol("pkg.sub", "thing");
        assert!(imports.modules.contains("pkg"));
        assert!(imports.symbols.contains("pkg.thing"));
    }

    #[test]
    fn empty_path_is_ignored() {
        let mut imports = RawImports::new();
        imports.add_symbol("", "x");
        imports.add_module("");
        assert!(imports.is_empty());
    }
}

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::trace;

use super::model::{module_prefix, RawImports};
use super::scanner::normalize_relative;

/// Where an imported module lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleOrigin {
    /// Resolved to a project file, path relative to the project root
    Local(String),
    External,
}

/// A file's imports after local/external classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedImports {
    pub imports: BTreeSet<String>,
    pub imported_names: BTreeSet<String>,
    /// Module name to the first existing candidate file
    pub targets: BTreeMap<String, String>,
}

/// Classifies imported module names as project-local or external by
/// probing the filesystem.
#[derive(Debug, Clone)]
pub struct ImportResolver {
    project_root: PathBuf,
    include_external: bool,
}

impl ImportResolver {
    pub fn new(project_root: impl Into<PathBuf>, include_external: bool) -> Self {
        Self {
            project_root: project_root.into(),
            include_external,
        }
    }

    /// Candidate files for `module` imported from a file in `file_dir`, in
    /// lookup order: top-level module, top-level package, sibling module.
    pub fn candidate_paths(&self, module: &str, file_dir: &Path) -> [PathBuf; 3] {
        [
            self.project_root.join(format!("{module}.py")),
            self.project_root.join(module).join("__init__.py"),
            file_dir.join(format!("{module}.py")),
        ]
    }

    /// Classify `module` as imported from the file at `file_path`. The first
    /// candidate that exists wins.
    pub fn classify(&self, module: &str, file_path: &Path) -> ModuleOrigin {
        let file_dir = file_path.parent().unwrap_or(&self.project_root);

        self.candidate_paths(module, file_dir)
            .into_iter()
            .find(|candidate| candidate.is_file())
            .map(|candidate| {
                let relative = candidate
                    .strip_prefix(&self.project_root)
                    .map(normalize_relative)
                    .unwrap_or_else(|_| normalize_relative(&candidate));
                ModuleOrigin::Local(relative)
            })
            .unwrap_or(ModuleOrigin::External)
    }

    /// Filter `raw` down to local modules unless external imports are
    /// included. Symbol entries are kept or dropped together with their
    /// module.
    pub fn resolve(&self, raw: RawImports, file_path: &Path) -> ResolvedImports {
        let mut resolved = ResolvedImports::default();

        for module in raw.modules {
            match self.classify(&module, file_path) {
                ModuleOrigin::Local(target) => {
                    resolved.targets.insert(module.clone(), target);
                    resolved.imports.insert(module);
                }
                ModuleOrigin::External if self.include_external => {
                    resolved.imports.insert(module);
                }
                ModuleOrigin::External => {
                    trace!(
                        module = %module,
                        file = %file_path.display(),
                        "dropping external import"
                    );
                }
            }
        }

        resolved.imported_names = raw
            .symbols
            .into_iter()
            .filter(|name| {
                module_prefix(name).is_some_and(|module| resolved.imports.contains(module))
            })
            .collect();

        resolved
    }
}

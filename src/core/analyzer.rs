use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::config::AnalyzerConfig;
use super::graph::{DependencyGraph, DependencyGraphBuilder};
use super::model::{DependencyMap, FileDependencies};
use super::resolver::ImportResolver;
use super::scanner::{FileScanner, ScannedFile};
use crate::error::Result;
use crate::parsers::ParserFactory;

/// Runs scan, parse, resolve and graph assembly for one project.
pub struct ProjectAnalyzer {
    config: AnalyzerConfig,
    file_scanner: FileScanner,
    parser_factory: ParserFactory,
    import_resolver: ImportResolver,
}

impl ProjectAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            file_scanner: FileScanner::new(config.file_extensions.iter().cloned()),
            parser_factory: ParserFactory::new(),
            import_resolver: ImportResolver::new(
                config.project_path.clone(),
                config.include_external,
            ),
            config,
        }
    }

    /// Analyze every matching file under the project root.
    ///
    /// Files that cannot be read or parsed are logged and left out. Only a
    /// missing or unreadable root is returned as an error.
    pub fn analyze(&self) -> Result<DependencyMap> {
        let root = &self.config.project_path;
        info!(root = %root.display(), "scanning project");

        let files: Vec<ScannedFile> = self.file_scanner.scan_directory(root)?.collect();
        info!(files = files.len(), "found candidate files");

        // Per-file work is independent; the fold below keeps scan order.
        let results: Vec<Option<(String, FileDependencies)>> = files
            .par_iter()
            .map(|file| self.analyze_file(file))
            .collect();

        let dependencies = results
            .into_iter()
            .flatten()
            .fold(DependencyMap::new(), |mut map, (path, deps)| {
                map.insert(path, deps);
                map
            });

        info!(analyzed = dependencies.len(), "analysis complete");
        Ok(dependencies)
    }

    /// Analyze the project and build its dependency graph.
    pub fn analyze_graph(&self) -> Result<(DependencyMap, DependencyGraph)> {
        let dependencies = self.analyze()?;
        let graph = DependencyGraphBuilder::new(&dependencies).build();
        Ok((dependencies, graph))
    }

    fn analyze_file(&self, file: &ScannedFile) -> Option<(String, FileDependencies)> {
        let Some(parser) = self.parser_factory.parser_for(&file.path) else {
            debug!(file = %file.relative_path, "no grammar for file, skipping");
            return None;
        };

        let parsed = match parser.parse_file(&file.path) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("{err}, skipping");
                return None;
            }
        };

        let resolved = self.import_resolver.resolve(parsed.imports, &file.path);
        debug!(
            file = %file.relative_path,
            language = parser.language_name(),
            imports = resolved.imports.len(),
            functions = parsed.functions.len(),
            classes = parsed.classes.len(),
            "analyzed file"
        );

        let deps = FileDependencies {
            imports: resolved.imports.into_iter().collect(),
            imported_names: resolved.imported_names.into_iter().collect(),
            functions: parsed.functions,
            classes: parsed.classes,
            resolved_modules: resolved.targets,
        };
        Some((file.relative_path.clone(), deps))
    }
}

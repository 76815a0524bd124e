use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Extensions scanned when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".py", ".js", ".html", ".css"];

/// Inputs of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Root of the project, must be an existing directory
    pub project_path: PathBuf,
    /// File name suffixes to include, matched with `ends_with`
    pub file_extensions: Vec<String>,
    /// Keep imports that do not resolve to a project file
    pub include_external: bool,
}

impl AnalyzerConfig {
    pub fn new(project_path: impl AsRef<Path>) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_extensions = extensions
            .into_iter()
            .map(Into::into)
            .map(|ext: String| ext.trim().to_string())
            .filter(|ext| !ext.is_empty())
            .collect();
        self
    }

    pub fn with_include_external(mut self, include_external: bool) -> Self {
        self.include_external = include_external;
        self
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            project_path: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            file_extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            include_external: false,
        }
    }
}

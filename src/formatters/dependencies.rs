use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::DependencyMap;

/// Writes the per-file dependency map as JSON, the interchange document
/// consumed by renderers.
pub struct DependenciesFormatter;

impl DependenciesFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format(&self, dependencies: &DependencyMap) -> Result<String> {
        Ok(serde_json::to_string_pretty(dependencies)?)
    }

    pub fn format_to_file(&self, dependencies: &DependencyMap, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format(dependencies)?)
            .with_context(|| format!("writing {}", output_path.display()))
    }

    /// Load a map written by [`format_to_file`](Self::format_to_file).
    pub fn read_from_file(&self, input_path: &Path) -> Result<DependencyMap> {
        let text = fs::read_to_string(input_path)
            .with_context(|| format!("reading {}", input_path.display()))?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl Default for DependenciesFormatter {
    fn default() -> Self {
        Self::new()
    }
}

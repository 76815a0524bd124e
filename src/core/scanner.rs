use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub path: PathBuf,
    /// Path relative to the scan root, always `/`-separated
    pub relative_path: String,
}

pub struct FileScanner {
    extensions: Vec<String>,
}

impl FileScanner {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    /// Lazily walk `root_path`, yielding every file whose name ends with one
    /// of the configured extensions.
    ///
    /// Entries are visited in file-name order. Directories that cannot be
    /// read are logged and skipped; only a bad root is an error.
    pub fn scan_directory<'a>(
        &'a self,
        root_path: &Path,
    ) -> Result<impl Iterator<Item = ScannedFile> + 'a> {
        check_root(root_path)?;
        let root = root_path.to_path_buf();

        let walker = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        Ok(walker.filter_map(move |entry| match entry {
            Ok(entry) => self.accept(&root, &entry),
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.clone());
                let error = Error::DirectoryRead { path, source: err };
                warn!("{error}, skipping");
                None
            }
        }))
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
    }

    fn accept(&self, root: &Path, entry: &DirEntry) -> Option<ScannedFile> {
        // Links to files count as files; links to directories are not followed
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            return None;
        }
        if !self.matches(&entry.file_name().to_string_lossy()) {
            return None;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        Some(ScannedFile {
            path: path.to_path_buf(),
            relative_path: normalize_relative(relative),
        })
    }
}

fn check_root(root: &Path) -> Result<()> {
    let scan_error = |reason: String| Error::Scan {
        path: root.to_path_buf(),
        reason,
    };

    let metadata = fs::metadata(root).map_err(|err| scan_error(err.to_string()))?;
    if !metadata.is_dir() {
        return Err(scan_error("not a directory".to_string()));
    }
    fs::read_dir(root).map_err(|err| scan_error(err.to_string()))?;
    Ok(())
}

/// Render a relative path with `/` separators regardless of platform.
pub fn normalize_relative(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

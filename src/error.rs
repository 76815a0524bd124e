//! Error taxonomy for the analysis pipeline.
//!
//! Only [`Error::Scan`] is ever returned to the caller of
//! [`ProjectAnalyzer::analyze`](crate::core::ProjectAnalyzer::analyze).
//! The other variants are scoped to one directory or file: they are logged
//! and the offending entry is left out of the result.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Project root is missing, not a directory, or cannot be listed
    #[error("cannot scan project root {}: {reason}", .path.display())]
    Scan { path: PathBuf, reason: String },

    /// A directory below the root could not be enumerated
    #[error("cannot read directory {}: {source}", .path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A source file could not be opened or is not valid UTF-8
    #[error("cannot read file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The syntax tree for a file could not be built
    #[error("failed to parse {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the run can continue past this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::Scan { .. })
    }
}

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error produced when a rule source cannot be read.
///
/// Parsing itself never fails; unrecognised lines are skipped. These variants
/// cover the I/O underneath.
#[derive(Debug, Error)]
pub enum RuleSourceError {
    /// A rule file could not be opened or read.
    #[error("failed to read rules from '{}': {source}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },
    /// A fragment directory could not be listed.
    #[error("failed to list rule fragments in '{}': {source}", path.display())]
    ReadDir {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },
    /// An unnamed stream such as stdin failed mid-read.
    #[error("failed to read rules from stream: {source}")]
    Stream {
        /// Underlying error emitted by the reader.
        #[source]
        source: io::Error,
    },
}

impl RuleSourceError {
    /// Returns the filesystem path tied to the failure, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::ReadDir { path, .. } => Some(path),
            Self::Stream { .. } => None,
        }
    }
}

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Reason an exclusion walk stopped.
///
/// Any of these aborts the whole walk; no partial list is returned.
#[derive(Debug, Error)]
pub enum WalkError {
    /// The root is missing, unreadable or not a directory.
    #[error("cannot walk '{}': {source}", path.display())]
    InvalidRoot {
        /// Root as supplied to the builder.
        path: PathBuf,
        /// Why the root was rejected.
        #[source]
        source: io::Error,
    },
    /// A directory below the root could not be listed.
    #[error("cannot list directory '{}': {source}", path.display())]
    Listing {
        /// Directory being listed.
        path: PathBuf,
        /// Error from opening or iterating the directory.
        #[source]
        source: io::Error,
    },
    /// A listed entry could not be classified, typically because it vanished.
    #[error("cannot classify '{}': {source}", path.display())]
    Classify {
        /// Entry whose type could not be read.
        path: PathBuf,
        /// Error from `symlink_metadata`.
        #[source]
        source: io::Error,
    },
}

impl WalkError {
    pub(crate) fn root_not_directory(path: PathBuf) -> Self {
        Self::InvalidRoot {
            path,
            source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
        }
    }

    /// Path the failure refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::InvalidRoot { path, .. }
            | Self::Listing { path, .. }
            | Self::Classify { path, .. } => path,
        }
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::WalkError;

/// How an immediate child of a directory takes part in pruning.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    /// A real directory; the walk descends into it.
    Directory,
    /// A regular file.
    File,
    /// A symbolic link of any target type. Never followed.
    Symlink,
    /// A FIFO, socket or device node. Ignored by the walk.
    Special,
}

impl EntryKind {
    /// Returns `true` for entries tested against the rules as leaves.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::File | Self::Symlink)
    }
}

/// A child of a directory under traversal together with its classification.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DirectoryEntry {
    path: PathBuf,
    kind: EntryKind,
}

impl DirectoryEntry {
    /// Classifies `path` without following a final symbolic link.
    ///
    /// A symlink pointing at a directory is reported as
    /// [`EntryKind::Symlink`], so the walk never leaves the tree through it.
    pub fn classify(path: PathBuf) -> Result<Self, WalkError> {
        let metadata = match fs::symlink_metadata(&path) {
            Ok(metadata) => metadata,
            Err(source) => return Err(WalkError::Classify { path, source }),
        };
        let file_type = metadata.file_type();
        let kind = if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Special
        };
        Ok(Self { path, kind })
    }

    /// Full path of the entry (traversal root joined with the child names).
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Classification captured when the entry was listed.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Consumes the entry, returning its path.
    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

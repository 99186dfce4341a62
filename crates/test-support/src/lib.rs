#![deny(unsafe_code)]

//! Temporary directory trees for tests.
//!
//! [`TreeFixture`] owns a temporary directory holding a `root/` subtree that
//! tests populate with [`dir`](TreeFixture::dir), [`file`](TreeFixture::file)
//! and friends, plus a sibling `aux/` directory for rule files and link
//! targets that must live outside the walked tree. Helpers panic on failure;
//! they only run inside tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary `root/` tree removed on drop.
#[derive(Debug)]
pub struct TreeFixture {
    _temp: TempDir,
    root: PathBuf,
    aux: PathBuf,
}

impl Default for TreeFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeFixture {
    /// Creates an empty `root/` and `aux/` inside a fresh temporary directory.
    #[must_use]
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("create tempdir");
        let root = temp.path().join("root");
        let aux = temp.path().join("aux");
        fs::create_dir(&root).expect("create root");
        fs::create_dir(&aux).expect("create aux");
        Self {
            _temp: temp,
            root,
            aux,
        }
    }

    /// The traversal root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory outside the root for rule files and symlink targets.
    #[must_use]
    pub fn aux(&self) -> &Path {
        &self.aux
    }

    /// Joins `relative` onto the root.
    #[must_use]
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Creates a directory (and its parents) below the root.
    pub fn dir(&self, relative: &str) -> &Self {
        fs::create_dir_all(self.path(relative)).expect("create dir");
        self
    }

    /// Creates a file (and its parent directories) below the root.
    pub fn file(&self, relative: &str) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&path, relative.as_bytes()).expect("write file");
        self
    }

    /// Creates every file in `relatives`.
    pub fn files(&self, relatives: &[&str]) -> &Self {
        for relative in relatives {
            self.file(relative);
        }
        self
    }

    /// Creates a symbolic link at `relative` pointing to `target`.
    #[cfg(unix)]
    pub fn symlink(&self, target: &Path, relative: &str) -> &Self {
        let link = self.path(relative);
        if let Some(parent) = link.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        std::os::unix::fs::symlink(target, link).expect("create symlink");
        self
    }

    /// Creates a Unix domain socket node at `relative`.
    ///
    /// The node outlives the listener, leaving a non-regular, non-directory
    /// entry in the tree.
    #[cfg(unix)]
    pub fn socket(&self, relative: &str) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        drop(std::os::unix::net::UnixListener::bind(&path).expect("bind socket"));
        self
    }

    /// Writes `contents` to `aux/name` and returns its path.
    pub fn aux_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.aux.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&path, contents).expect("write aux file");
        path
    }

    /// Creates a directory below `aux/` and returns its path.
    pub fn aux_dir(&self, name: &str) -> PathBuf {
        let path = self.aux.join(name);
        fs::create_dir_all(&path).expect("create aux dir");
        path
    }
}

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` computes the minimal list of paths to exclude below a root
//! directory. It walks the tree bottom-up and, for every directory, either
//! emits the directory once (when nothing inside it is retained and the
//! directory itself is excluded) or keeps it and reports the finer-grained
//! entries found inside.
//!
//! # Design
//!
//! - [`WalkBuilder`] validates the root and selects sequential or parallel
//!   traversal.
//! - [`ExclusionWalker::walk`] performs the post-order pruning walk, asking an
//!   [`ExclusionRules`] implementation about each candidate path.
//! - [`DirectoryEntry`] classifies children with `symlink_metadata`, so
//!   symbolic links are leaves and are never followed.
//! - [`drop_covered`] is an opt-in post-pass removing entries already covered
//!   by an emitted ancestor.
//!
//! # Invariants
//!
//! - Children are visited in file-name order, subdirectories before leaves,
//!   so output is deterministic and identical between sequential and
//!   parallel walks.
//! - The root is never tested against the rules and never emitted.
//! - A directory is retained if any child is retained; an excluded directory
//!   is emitted only when nothing below it is retained.
//! - FIFOs, sockets and device nodes are ignored: they are never emitted and
//!   never retain their parent.
//!
//! # Errors
//!
//! Every failure to list or classify an entry aborts the walk with a
//! [`WalkError`] naming the offending path. No partial list is returned.
//!
//! # Examples
//!
//! ```
//! use std::fs;
//! use std::path::Path;
//! use walk::WalkBuilder;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let root = temp.path().join("root");
//! fs::create_dir_all(root.join("doc/foo"))?;
//! fs::write(root.join("doc/foo/readme.txt"), b"text")?;
//! fs::create_dir_all(root.join("bin"))?;
//! fs::write(root.join("bin/tool"), b"elf")?;
//!
//! let doc = root.join("doc");
//! let rules = move |path: &Path| path.starts_with(&doc);
//! let walker = WalkBuilder::new(&root).build()?;
//!
//! assert_eq!(
//!     walker.walk(&rules)?,
//!     vec![root.join("doc/foo/readme.txt"), root.join("doc/foo"), root.join("doc")],
//! );
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```
//!
//! # See also
//!
//! - `filters::RuleEngine` supplies dpkg `path-exclude`/`path-include`
//!   decisions through a closure adapter.

mod builder;
mod entry;
mod error;
mod overlap;
mod walker;

pub use crate::builder::WalkBuilder;
pub use crate::entry::{DirectoryEntry, EntryKind};
pub use crate::error::WalkError;
pub use crate::overlap::drop_covered;
pub use crate::walker::{ExclusionRules, ExclusionWalker};

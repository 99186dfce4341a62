use std::fs;
use std::path::{Path, PathBuf};

use logging::trace_walk;

use crate::entry::{DirectoryEntry, EntryKind};
use crate::error::WalkError;

/// Stack reserved for each pool worker; recursion depth follows tree depth.
#[cfg(feature = "parallel")]
const WORKER_STACK_SIZE: usize = 32 * 1024 * 1024;

/// Decides whether a single path is excluded.
///
/// Implemented for every `Fn(&Path) -> bool`, which is how callers adapt a
/// rule engine:
///
/// ```
/// use std::path::Path;
/// use walk::ExclusionRules;
///
/// let rules = |path: &Path| path.extension().is_some_and(|ext| ext == "gz");
/// assert!(rules.is_excluded(Path::new("/p/changelog.gz")));
/// assert!(!rules.is_excluded(Path::new("/p/README")));
/// ```
pub trait ExclusionRules {
    /// Returns `true` when `path` should be excluded.
    fn is_excluded(&self, path: &Path) -> bool;
}

impl<F> ExclusionRules for F
where
    F: Fn(&Path) -> bool + ?Sized,
{
    fn is_excluded(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Post-order pruning walk over a validated root directory.
///
/// Created through [`crate::WalkBuilder`]. The walk itself is stateless, so
/// one walker may be run any number of times against different rules.
#[derive(Clone, Debug)]
pub struct ExclusionWalker {
    root: PathBuf,
    parallel: bool,
}

impl ExclusionWalker {
    pub(crate) fn new(root: PathBuf, parallel: bool) -> Result<Self, WalkError> {
        let metadata = match fs::metadata(&root) {
            Ok(metadata) => metadata,
            Err(source) => return Err(WalkError::InvalidRoot { path: root, source }),
        };
        if !metadata.is_dir() {
            return Err(WalkError::root_not_directory(root));
        }
        Ok(Self { root, parallel })
    }

    /// The traversal root exactly as supplied to the builder.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns `true` when sibling subdirectories are walked concurrently.
    #[must_use]
    pub fn is_parallel(&self) -> bool {
        self.parallel && cfg!(feature = "parallel")
    }

    /// Computes the exclusion list for the tree below the root.
    ///
    /// Each directory's children are visited in file-name order,
    /// subdirectories first. A subdirectory that contains nothing retained
    /// and is itself excluded is emitted once in place of its contents; the
    /// finer-grained entries already emitted while walking it stay in the
    /// list. Excluded files and symlinks are emitted individually. The root
    /// itself is never tested or emitted.
    ///
    /// The first filesystem failure aborts the walk and no list is returned.
    pub fn walk<R>(&self, rules: &R) -> Result<Vec<PathBuf>, WalkError>
    where
        R: ExclusionRules + Sync + ?Sized,
    {
        let mut excluded = Vec::new();
        let retained = self.prune_root(rules, &mut excluded)?;
        trace_walk!(
            "walk of {} finished: {} paths, root retained: {}",
            self.root.display(),
            excluded.len(),
            retained
        );
        Ok(excluded)
    }

    fn prune_root<R>(&self, rules: &R, excluded: &mut Vec<PathBuf>) -> Result<bool, WalkError>
    where
        R: ExclusionRules + Sync + ?Sized,
    {
        #[cfg(feature = "parallel")]
        {
            if self.parallel {
                match rayon::ThreadPoolBuilder::new()
                    .stack_size(WORKER_STACK_SIZE)
                    .build()
                {
                    Ok(pool) => {
                        return pool.install(|| self.prune_directory(&self.root, rules, excluded));
                    }
                    Err(error) => {
                        trace_walk!("walking sequentially, worker pool unavailable: {}", error);
                        let sequential = Self {
                            root: self.root.clone(),
                            parallel: false,
                        };
                        return sequential.prune_directory(&self.root, rules, excluded);
                    }
                }
            }
        }

        self.prune_directory(&self.root, rules, excluded)
    }

    fn prune_directory<R>(
        &self,
        dir: &Path,
        rules: &R,
        excluded: &mut Vec<PathBuf>,
    ) -> Result<bool, WalkError>
    where
        R: ExclusionRules + Sync + ?Sized,
    {
        trace_walk!("entering directory: {}", dir.display());
        let listing = Listing::read(dir)?;
        let mut retained = self.prune_subdirectories(listing.subdirs, rules, excluded)?;
        retained |= settle_leaves(listing.leaves, rules, excluded);
        Ok(retained)
    }

    fn prune_subdirectories<R>(
        &self,
        subdirs: Vec<PathBuf>,
        rules: &R,
        excluded: &mut Vec<PathBuf>,
    ) -> Result<bool, WalkError>
    where
        R: ExclusionRules + Sync + ?Sized,
    {
        #[cfg(feature = "parallel")]
        {
            if self.parallel && subdirs.len() > 1 {
                return self.prune_subdirectories_parallel(subdirs, rules, excluded);
            }
        }

        let mut retained = false;
        for subdir in subdirs {
            let subdir_retained = self.prune_directory(&subdir, rules, excluded)?;
            retained |= settle_subdirectory(subdir, subdir_retained, rules, excluded);
        }
        Ok(retained)
    }

    #[cfg(feature = "parallel")]
    fn prune_subdirectories_parallel<R>(
        &self,
        subdirs: Vec<PathBuf>,
        rules: &R,
        excluded: &mut Vec<PathBuf>,
    ) -> Result<bool, WalkError>
    where
        R: ExclusionRules + Sync + ?Sized,
    {
        use rayon::prelude::*;

        let branches = subdirs
            .into_par_iter()
            .map(|subdir| {
                let mut branch = Vec::new();
                let subdir_retained = self.prune_directory(&subdir, rules, &mut branch)?;
                Ok((subdir, subdir_retained, branch))
            })
            .collect::<Result<Vec<_>, WalkError>>()?;

        let mut retained = false;
        for (subdir, subdir_retained, branch) in branches {
            excluded.extend(branch);
            retained |= settle_subdirectory(subdir, subdir_retained, rules, excluded);
        }
        Ok(retained)
    }
}

/// Children of one directory, partitioned and sorted by file name.
struct Listing {
    subdirs: Vec<PathBuf>,
    leaves: Vec<PathBuf>,
}

impl Listing {
    fn read(dir: &Path) -> Result<Self, WalkError> {
        let listing_error = |source| WalkError::Listing {
            path: dir.to_path_buf(),
            source,
        };
        let entries = fs::read_dir(dir).map_err(listing_error)?;

        let mut names = Vec::new();
        for entry in entries {
            names.push(entry.map_err(listing_error)?.file_name());
        }
        names.sort();

        let mut listing = Self {
            subdirs: Vec::new(),
            leaves: Vec::new(),
        };
        for name in names {
            let entry = DirectoryEntry::classify(dir.join(name))?;
            match entry.kind() {
                EntryKind::Directory => listing.subdirs.push(entry.into_path()),
                EntryKind::File | EntryKind::Symlink => listing.leaves.push(entry.into_path()),
                EntryKind::Special => {
                    trace_walk!("ignoring special file: {}", entry.path().display());
                }
            }
        }
        Ok(listing)
    }
}

/// Applies the collapse decision for a fully walked subdirectory.
///
/// Returns `true` when the parent must be retained.
fn settle_subdirectory<R>(
    subdir: PathBuf,
    subdir_retained: bool,
    rules: &R,
    excluded: &mut Vec<PathBuf>,
) -> bool
where
    R: ExclusionRules + ?Sized,
{
    if subdir_retained {
        return true;
    }
    if rules.is_excluded(&subdir) {
        trace_walk!("collapsing directory: {}", subdir.display());
        excluded.push(subdir);
        false
    } else {
        true
    }
}

/// Tests every leaf; all of them are evaluated even once one is retained.
fn settle_leaves<R>(leaves: Vec<PathBuf>, rules: &R, excluded: &mut Vec<PathBuf>) -> bool
where
    R: ExclusionRules + ?Sized,
{
    let mut retained = false;
    for leaf in leaves {
        if rules.is_excluded(&leaf) {
            trace_walk!("excluding: {}", leaf.display());
            excluded.push(leaf);
        } else {
            retained = true;
        }
    }
    retained
}

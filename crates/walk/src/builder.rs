use crate::error::WalkError;
use crate::walker::ExclusionWalker;
use std::path::PathBuf;

/// Configures an exclusion walk rooted at a specific path.
///
/// The root is used exactly as given: it is neither canonicalised nor made
/// absolute, so every emitted path begins with the same prefix the rules were
/// anchored on.
#[derive(Clone, Debug)]
pub struct WalkBuilder {
    root: PathBuf,
    parallel: bool,
}

impl WalkBuilder {
    /// Creates a new builder that will prune the tree below `root`.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            parallel: false,
        }
    }

    /// Requests that sibling subdirectories be walked on the rayon pool.
    ///
    /// Output is identical to the sequential walk. Without the `parallel`
    /// cargo feature the request is accepted and ignored.
    #[must_use]
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the root and builds an [`ExclusionWalker`].
    ///
    /// The root must exist and, following symbolic links, be a directory.
    pub fn build(self) -> Result<ExclusionWalker, WalkError> {
        ExclusionWalker::new(self.root, self.parallel)
    }
}

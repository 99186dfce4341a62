use std::path::{Path, PathBuf};

use logging::{LineMode, VerbosityConfig};

use crate::args::ParsedArgs;
use crate::error::CliError;

/// Where a batch of rules is read from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RuleSource {
    /// The process's standard input.
    Stdin,
    /// A single rule file.
    File(PathBuf),
    /// A `dpkg.cfg.d` style directory of fragments.
    Dir(PathBuf),
}

/// Validated settings for one run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RunConfig {
    root: PathBuf,
    sources: Vec<RuleSource>,
    output: Option<PathBuf>,
    line_mode: LineMode,
    dedupe: bool,
    parallel: bool,
    verbosity: VerbosityConfig,
}

impl RunConfig {
    /// Creates a configuration reading rules from standard input and writing
    /// newline-terminated records to standard output.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sources: vec![RuleSource::Stdin],
            output: None,
            line_mode: LineMode::Newline,
            dedupe: false,
            parallel: false,
            verbosity: VerbosityConfig::default(),
        }
    }

    pub(crate) fn from_parsed(parsed: ParsedArgs) -> Result<Self, CliError> {
        let ParsedArgs {
            prefix,
            rule_files,
            rule_dirs,
            null,
            output,
            dedupe,
            parallel,
            verbosity,
            ..
        } = parsed;

        let root = prefix.ok_or(CliError::MissingPrefix)?;
        let mut config = Self::new(root)
            .with_output(output)
            .with_line_mode(LineMode::from(null))
            .with_dedupe(dedupe)
            .with_parallel(parallel)
            .with_verbosity(VerbosityConfig::from_verbose_level(verbosity));

        if !rule_files.is_empty() || !rule_dirs.is_empty() {
            let files = rule_files.into_iter().map(|file| {
                if file.as_os_str() == "-" {
                    RuleSource::Stdin
                } else {
                    RuleSource::File(file)
                }
            });
            let dirs = rule_dirs.into_iter().map(RuleSource::Dir);
            config = config.with_sources(files.chain(dirs).collect());
        }
        Ok(config)
    }

    /// Replaces the rule sources. They are read in order and concatenated.
    #[must_use]
    pub fn with_sources(mut self, sources: Vec<RuleSource>) -> Self {
        self.sources = sources;
        self
    }

    /// Writes to `output` instead of standard output when set.
    #[must_use]
    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    /// Selects the record terminator.
    #[must_use]
    pub const fn with_line_mode(mut self, line_mode: LineMode) -> Self {
        self.line_mode = line_mode;
        self
    }

    /// Enables the post-pass dropping entries covered by an emitted ancestor.
    #[must_use]
    pub const fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    /// Requests a parallel walk.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets diagnostic verbosity.
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: VerbosityConfig) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Traversal root and pattern anchor.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Rule sources in reading order.
    #[must_use]
    pub fn sources(&self) -> &[RuleSource] {
        &self.sources
    }

    /// Output file, or `None` for standard output.
    #[must_use]
    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    /// Record terminator for the written list.
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Whether covered entries are dropped before writing.
    #[must_use]
    pub const fn dedupe(&self) -> bool {
        self.dedupe
    }

    /// Whether sibling subdirectories are walked in parallel.
    #[must_use]
    pub const fn parallel(&self) -> bool {
        self.parallel
    }

    /// Diagnostic verbosity.
    #[must_use]
    pub const fn verbosity(&self) -> VerbosityConfig {
        self.verbosity
    }
}

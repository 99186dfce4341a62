use std::io;
use std::path::PathBuf;

use filters::RuleSourceError;
use thiserror::Error;
use walk::WalkError;

/// Failure of a single `excludepaths` invocation.
///
/// Every variant maps to exit status 1.
#[derive(Debug, Error)]
pub enum CliError {
    /// The command line could not be parsed.
    #[error("{0}")]
    Usage(String),
    /// No `PREFIX` operand was supplied.
    #[error("missing PREFIX operand")]
    MissingPrefix,
    /// A rule source could not be read.
    #[error(transparent)]
    Rules(#[from] RuleSourceError),
    /// The tree walk failed.
    #[error(transparent)]
    Walk(#[from] WalkError),
    /// The output file could not be created.
    #[error("failed to create output file '{}': {source}", path.display())]
    CreateOutput {
        /// Requested output file.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },
    /// Writing the exclusion list failed.
    #[error("failed to write exclusion list: {0}")]
    WriteOutput(#[source] io::Error),
}

impl CliError {
    /// Exit status reported for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        1
    }
}

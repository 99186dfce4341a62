#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the command-line front-end for `excludepaths`. It parses
//! the arguments, loads dpkg `path-exclude`/`path-include` rules, runs the
//! pruning walk below the requested prefix, and writes the resulting
//! exclusion list.
//!
//! # Design
//!
//! The crate exposes [`run`] as the primary entry point. The function accepts
//! an iterator of arguments together with handles for standard input, output
//! and error so tests can drive it in memory. A
//! [`clap`](https://docs.rs/clap/) command definition recognises the options,
//! [`RunConfig`] captures the validated settings, and [`execute`] performs
//! the run.
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as exit status 1 with a single
//!   `excludepaths: error: ...` line on stderr.
//! - Nothing is written to the output until the walk has completed, so a
//!   failed run never leaves a partial list behind.
//! - Without `--rules` or `--rules-dir`, rules are read from standard input.
//!
//! # Examples
//!
//! ```
//! use cli::run;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = run(["excludepaths", "--version"], &mut &b""[..], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(!stdout.is_empty());
//! assert!(stderr.is_empty());
//! ```
//!
//! # See also
//!
//! - `src/bin/excludepaths.rs` for the binary that wires [`run`] into `main`.

use std::ffi::OsString;
use std::io::{BufRead, Write};

use logging::init_tracing;

mod args;
mod config;
mod error;
mod execute;

pub use crate::config::{RuleSource, RunConfig};
pub use crate::error::CliError;
pub use crate::execute::{compute_exclusions, execute, load_rules, write_exclusions};

use crate::args::{parse_args, usage_reason};

/// Program name used in diagnostics and the version banner.
pub const PROGRAM_NAME: &str = "excludepaths";

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Deterministic help text describing the command-line surface.
const HELP_TEXT: &str = concat!(
    "Usage: excludepaths [OPTIONS] PREFIX\n",
    "\n",
    "Evaluate dpkg path-exclude/path-include rules against the tree below\n",
    "PREFIX and print the minimal list of paths to exclude. Rule patterns are\n",
    "anchored on PREFIX. Rules are read from standard input unless --rules or\n",
    "--rules-dir is given.\n",
    "\n",
    "Options:\n",
    "  -f, --rules FILE      Read rules from FILE ('-' for standard input).\n",
    "  -d, --rules-dir DIR   Read dpkg.cfg.d-style rule fragments from DIR.\n",
    "  -0, --null            Terminate output records with NUL instead of newline.\n",
    "  -o, --output FILE     Write the exclusion list to FILE instead of standard output.\n",
    "      --dedupe          Drop entries already covered by an emitted directory.\n",
    "  -j, --parallel        Walk sibling directories in parallel.\n",
    "  -v, --verbose         Increase diagnostic verbosity (repeatable).\n",
    "  -h, --help            Show this help message and exit.\n",
    "  -V, --version         Output version information and exit.\n",
    "\n",
    "Rule files are read in the order given, followed by rule directories.\n",
    "Diagnostics can be filtered with the EXCLUDEPATHS_LOG environment variable.\n",
);

/// Returns the help text printed by `--help`.
#[must_use]
pub fn render_help() -> &'static str {
    HELP_TEXT
}

/// Returns the banner printed by `--version`.
#[must_use]
pub fn render_version() -> String {
    format!("{PROGRAM_NAME} {}\n", env!("CARGO_PKG_VERSION"))
}

/// Parses `arguments`, runs the requested computation and returns the exit
/// status.
///
/// `stdin` supplies rules when no rule file or directory is named (or when a
/// rule file is `-`). The exclusion list goes to `stdout` unless `--output`
/// names a file; diagnostics go to `stderr`.
pub fn run<I, S, In, Out, Err>(
    arguments: I,
    stdin: &mut In,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    In: BufRead,
    Out: Write,
    Err: Write,
{
    let parsed = match parse_args(arguments) {
        Ok(parsed) => parsed,
        Err(error) => return report(&CliError::Usage(usage_reason(&error)), stderr),
    };

    if parsed.show_help {
        return write_banner(render_help(), stdout);
    }
    if parsed.show_version {
        return write_banner(&render_version(), stdout);
    }

    let config = match RunConfig::from_parsed(parsed) {
        Ok(config) => config,
        Err(error) => return report(&error, stderr),
    };
    init_tracing(config.verbosity());

    match execute(&config, stdin, stdout) {
        Ok(()) => 0,
        Err(error) => {
            tracing::debug!(target: "excludepaths::output", ?error, "run failed");
            report(&error, stderr)
        }
    }
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}

fn write_banner<Out: Write>(text: &str, stdout: &mut Out) -> i32 {
    if stdout.write_all(text.as_bytes()).is_err() || stdout.flush().is_err() {
        return 1;
    }
    0
}

fn report<Err: Write>(error: &CliError, stderr: &mut Err) -> i32 {
    let _ = writeln!(stderr, "{PROGRAM_NAME}: error: {error}");
    error.exit_code()
}

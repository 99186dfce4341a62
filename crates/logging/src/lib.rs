#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` collects the ambient output plumbing shared by the excludepaths
//! workspace: mapping `-v` counts onto a [`tracing`] filter, installing the
//! stderr subscriber, subsystem-scoped tracing macros, and the record-oriented
//! [`PathSink`] that writes the final exclusion list.
//!
//! # Design
//!
//! - [`VerbosityConfig`] turns the number of `-v` flags into a default
//!   [`tracing_subscriber::EnvFilter`] directive. The `EXCLUDEPATHS_LOG`
//!   environment variable overrides it when set.
//! - [`init_tracing`] installs a `fmt` subscriber that writes to stderr so the
//!   path list on stdout stays machine readable.
//! - [`trace_rules!`], [`trace_walk!`] and [`trace_output!`] wrap the standard
//!   tracing macros with the `excludepaths::*` targets used across crates.
//! - [`PathSink`] streams paths into any [`std::io::Write`] implementor, one
//!   record per path, terminated according to its [`LineMode`].
//!
//! # Invariants
//!
//! - Diagnostics never reach stdout.
//! - [`PathSink`] writes path bytes verbatim; non-UTF-8 names are preserved on
//!   Unix.
//!
//! # Examples
//!
//! ```
//! use logging::{LineMode, PathSink};
//! use std::path::Path;
//!
//! let mut sink = PathSink::new(Vec::new());
//! sink.write_all([Path::new("/pkgroot/usr/share/doc/foo")])?;
//! assert_eq!(sink.into_inner(), b"/pkgroot/usr/share/doc/foo\n".to_vec());
//!
//! let mut sink = PathSink::with_line_mode(Vec::new(), LineMode::Nul);
//! sink.write(Path::new("a"))?;
//! assert_eq!(sink.into_inner(), b"a\0".to_vec());
//! # Ok::<(), std::io::Error>(())
//! ```

mod config;
mod line_mode;
mod sink;
mod tracing_bridge;
mod tracing_macros;

pub use config::{LOG_ENV, VerbosityConfig};
pub use line_mode::LineMode;
pub use sink::PathSink;
pub use tracing_bridge::{build_filter, init_tracing};

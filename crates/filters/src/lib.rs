#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `filters` evaluates dpkg-style `path-exclude` / `path-include` rules against
//! absolute paths. Rules come from `dpkg.cfg` lines, are anchored to a root
//! prefix, and are folded in definition order so that the last rule whose
//! pattern matches a path decides whether that path is excluded.
//!
//! # Design
//!
//! - [`PatternRule`] pairs a [`RuleKind`] with an anchored glob pattern. Rules
//!   are lightweight values; compilation happens once when a [`RuleEngine`] is
//!   built.
//! - [`RuleEngine`] owns the compiled matchers in input order and exposes
//!   [`RuleEngine::evaluate`], a pure fold over the immutable rule list.
//! - [`parse_line`], [`parse_rules`], [`read_rules`] and [`read_rules_dir`]
//!   turn configuration text into rules. Unrecognised or malformed lines are
//!   skipped, never reported.
//!
//! # Invariants
//!
//! - Rules are evaluated in definition order. The last matching rule wins and
//!   a path that matches no rule is not excluded.
//! - Patterns use `fnmatch` semantics: `*` and `?` also match `/`, so
//!   `/root/usr/share/doc/*` covers every depth below `doc`.
//! - Patterns and paths are compared as bytes. A pattern that is not valid
//!   UTF-8 is matched with a [`regex::bytes::Regex`] instead of a glob.
//! - Evaluation is total. A pattern that cannot be compiled is compared
//!   literally instead of being rejected.
//!
//! # Errors
//!
//! Only rule sources fail: [`read_rules`], [`read_rules_dir`] and
//! [`parse_rules`] report [`RuleSourceError`] when the underlying stream,
//! file, or directory cannot be read.
//!
//! # Examples
//!
//! Keep the copyright files while dropping the rest of the documentation:
//!
//! ```
//! use filters::{PatternRule, RuleEngine};
//! use std::path::Path;
//!
//! let root = Path::new("/pkgroot");
//! let engine = RuleEngine::from_rules([
//!     PatternRule::exclude_anchored(root, "/usr/share/doc/*"),
//!     PatternRule::include_anchored(root, "/usr/share/doc/*/copyright"),
//! ]);
//!
//! assert!(engine.evaluate("/pkgroot/usr/share/doc/bash/README"));
//! assert!(!engine.evaluate("/pkgroot/usr/share/doc/bash/copyright"));
//! assert!(!engine.evaluate("/pkgroot/usr/bin/bash"));
//! ```
//!
//! # See also
//!
//! - `walk::ExclusionWalker` folds these decisions over a directory tree.
//! - [`globset`] for the glob matching primitives used internally.

mod action;
mod compiled;
pub mod debug_filter;
mod decision;
mod error;
mod parse;
mod rule;
mod set;

pub use action::RuleKind;
pub use error::RuleSourceError;
pub use parse::{is_fragment_name, parse_line, parse_rules, read_rules, read_rules_dir};
pub use rule::PatternRule;
pub use set::RuleEngine;

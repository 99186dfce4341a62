//! crates/logging/src/tracing_bridge.rs
//! Bridge between the command-line verbosity and the tracing subscriber.
//!
//! Events are recorded through the standard tracing macros (usually via the
//! subsystem wrappers in [`crate::tracing_macros`]) and rendered by a
//! `tracing-subscriber` fmt layer on stderr.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! init_tracing(VerbosityConfig::from_verbose_level(2));
//! tracing::debug!(target: "excludepaths::walk", "entering directory");
//! ```

use std::env;
use std::io;

use tracing_subscriber::EnvFilter;

use crate::config::{LOG_ENV, VerbosityConfig};

/// Builds the event filter for `config`.
///
/// A non-empty, parseable [`LOG_ENV`] value takes precedence over the
/// verbosity-derived directive. Unparseable overrides fall back to the
/// verbosity directive rather than silencing diagnostics.
#[must_use]
pub fn build_filter(config: VerbosityConfig) -> EnvFilter {
    filter_from(config, env::var(LOG_ENV).ok().as_deref())
}

fn filter_from(config: VerbosityConfig, override_directive: Option<&str>) -> EnvFilter {
    override_directive
        .map(str::trim)
        .filter(|directive| !directive.is_empty())
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(config.directive()))
}

/// Installs the global stderr subscriber.
///
/// Returns `false` when a global subscriber is already installed, which keeps
/// repeated initialisation from tests and embedders harmless.
pub fn init_tracing(config: VerbosityConfig) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(config))
        .with_writer(io::stderr)
        .with_target(true)
        .without_time()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_directive_used_without_override() {
        let filter = filter_from(VerbosityConfig::from_verbose_level(2), None);
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn override_directive_takes_precedence() {
        let filter = filter_from(
            VerbosityConfig::default(),
            Some("excludepaths::walk=trace"),
        );
        assert_eq!(filter.to_string(), "excludepaths::walk=trace");
    }

    #[test]
    fn blank_override_is_ignored() {
        let filter = filter_from(VerbosityConfig::from_verbose_level(1), Some("  "));
        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    fn unparseable_override_falls_back_to_verbosity() {
        let filter = filter_from(VerbosityConfig::default(), Some("walk=loudest"));
        assert_eq!(filter.to_string(), "warn");
    }
}

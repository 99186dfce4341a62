//! crates/logging/src/config.rs
//! Verbosity configuration derived from repeated `-v` flags.

use tracing::level_filters::LevelFilter;

/// Environment variable that overrides the verbosity-derived filter.
///
/// Accepts any [`tracing_subscriber::EnvFilter`] directive, for example
/// `EXCLUDEPATHS_LOG=excludepaths::walk=trace`.
pub const LOG_ENV: &str = "EXCLUDEPATHS_LOG";

/// Verbosity requested on the command line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct VerbosityConfig {
    level: u8,
}

impl VerbosityConfig {
    /// Creates a configuration from the number of `-v` flags supplied.
    ///
    /// Levels above 3 saturate at trace output.
    #[must_use]
    pub const fn from_verbose_level(level: u8) -> Self {
        Self { level }
    }

    /// Maps the verbose level onto the most detailed tracing level recorded.
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self.level {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Returns the default filter directive for this configuration.
    #[must_use]
    pub fn directive(self) -> String {
        self.level_filter().to_string().to_ascii_lowercase()
    }
}

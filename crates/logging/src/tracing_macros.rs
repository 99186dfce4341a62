//! crates/logging/src/tracing_macros.rs
//! Convenience macros for excludepaths-specific tracing.
//!
//! These macros provide ergonomic wrappers around standard tracing macros
//! with appropriate targets for each subsystem. Crates invoking them must
//! depend on `tracing` directly.

/// Emit a rule-loading or rule-evaluation trace.
///
/// # Example
/// ```ignore
/// trace_rules!("loaded {} rules from {}", count, path.display());
/// ```
#[macro_export]
macro_rules! trace_rules {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "excludepaths::rules", $($arg)*);
    };
}

/// Emit a tree-walk trace.
///
/// # Example
/// ```ignore
/// trace_walk!("collapsing {}", path.display());
/// ```
#[macro_export]
macro_rules! trace_walk {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "excludepaths::walk", $($arg)*);
    };
}

/// Emit an output summary trace.
///
/// # Example
/// ```ignore
/// trace_output!("wrote {} paths", count);
/// ```
#[macro_export]
macro_rules! trace_output {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "excludepaths::output", $($arg)*);
    };
}

//! Rule tracing for pattern compilation, rule loading and evaluation.
//!
//! All tracing is conditionally compiled behind the `tracing` feature flag and
//! produces no-op inline functions when disabled.
//!
//! # Examples
//!
//! ```rust,ignore
//! use filters::debug_filter::{trace_rule_loaded, trace_rule_decision};
//!
//! trace_rule_loaded("path-exclude", "/pkgroot/usr/share/doc/*");
//! trace_rule_decision("/pkgroot/usr/share/doc/bash", true, Some("/pkgroot/usr/share/doc/*"));
//! ```

/// Target name for tracing events.
#[cfg(feature = "tracing")]
const RULES_TARGET: &str = "excludepaths::rules";

// ============================================================================
// Tracing functions (feature-gated)
// ============================================================================

/// Traces a rule accepted from a configuration source.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_rule_loaded(option: &str, pattern: &str) {
    tracing::debug!(
        target: RULES_TARGET,
        option = %option,
        pattern = %pattern,
        "rule_loaded"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_rule_loaded(_option: &str, _pattern: &str) {}

/// Traces a configuration line that did not produce a rule.
///
/// # Arguments
///
/// * `line_number` - One-based line number within its source
/// * `line` - The raw line text
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_line_skipped(line_number: usize, line: &str) {
    tracing::trace!(
        target: RULES_TARGET,
        line_number = line_number,
        line = %line,
        "line_skipped"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_line_skipped(_line_number: usize, _line: &str) {}

/// Traces a pattern that fell back to literal comparison.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_pattern_fallback(pattern: &str, reason: &str) {
    tracing::warn!(
        target: RULES_TARGET,
        pattern = %pattern,
        reason = %reason,
        "pattern compared literally"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_pattern_fallback(_pattern: &str, _reason: &str) {}

/// Traces a fragment file read from a rules directory.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_fragment_loaded(fragment: &str, rule_count: usize) {
    tracing::debug!(
        target: RULES_TARGET,
        fragment = %fragment,
        rule_count = rule_count,
        "fragment_loaded"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_fragment_loaded(_fragment: &str, _rule_count: usize) {}

/// Traces the final decision for a path together with the deciding pattern.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_rule_decision(path: &str, excluded: bool, deciding_pattern: Option<&str>) {
    tracing::trace!(
        target: RULES_TARGET,
        path = %path,
        excluded = excluded,
        deciding_pattern = ?deciding_pattern,
        "rule_decision"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_rule_decision(_path: &str, _excluded: bool, _deciding_pattern: Option<&str>) {}

/// Reports whether per-path decisions are currently being recorded.
///
/// Lets callers skip computing the deciding rule when nobody listens.
#[cfg(feature = "tracing")]
#[inline]
pub fn decisions_traced() -> bool {
    tracing::enabled!(target: RULES_TARGET, tracing::Level::TRACE)
}

/// Always `false` when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn decisions_traced() -> bool {
    false
}

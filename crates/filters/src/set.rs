use std::path::Path;
use std::sync::Arc;

use crate::{
    PatternRule,
    compiled::CompiledRule,
    debug_filter::{decisions_traced, trace_rule_decision},
    decision::RuleEngineInner,
};

/// Compiled, immutable, ordered collection of rules.
///
/// A `RuleEngine` is built once from a sequence of [`PatternRule`]s via
/// [`from_rules`](Self::from_rules). Each pattern is compiled into a glob
/// matcher in input order; the order is never changed afterwards because
/// [`evaluate`](Self::evaluate) folds the rules left to right and the last
/// matching rule decides.
///
/// `RuleEngine` is cheaply cloneable (the compiled rules live behind an
/// [`Arc`]) and can be shared across threads.
///
/// # Examples
///
/// ```
/// use filters::{PatternRule, RuleEngine};
///
/// let engine = RuleEngine::from_rules([
///     PatternRule::exclude("/pkgroot/usr/share/doc/*"),
///     PatternRule::include("/pkgroot/usr/share/doc/important/*"),
/// ]);
///
/// assert!(engine.evaluate("/pkgroot/usr/share/doc/foo/readme.txt"));
/// // the later include wins
/// assert!(!engine.evaluate("/pkgroot/usr/share/doc/important/file.txt"));
/// // nothing matches: retained
/// assert!(!engine.evaluate("/pkgroot/usr/bin/ls"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct RuleEngine {
    inner: Arc<RuleEngineInner>,
}

impl RuleEngine {
    /// Builds a [`RuleEngine`] from the supplied rules, preserving their order.
    ///
    /// Construction never fails: any string is accepted as a pattern.
    pub fn from_rules<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = PatternRule>,
    {
        let rules = rules.into_iter().map(CompiledRule::new).collect();
        Self {
            inner: Arc::new(RuleEngineInner { rules }),
        }
    }

    /// Returns `true` if the engine holds no rules.
    ///
    /// An empty engine never excludes anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.rules.is_empty()
    }

    /// Number of rules held by the engine.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.rules.len()
    }

    /// Iterates over the rules in evaluation order.
    pub fn rules(&self) -> impl Iterator<Item = &PatternRule> {
        self.inner.rules.iter().map(|compiled| &compiled.rule)
    }

    /// Returns `true` if `path` is excluded.
    ///
    /// Starts from "not excluded" and folds every rule in order: an exclude
    /// rule sets the mark when its pattern matches, an include rule clears it.
    /// The pattern is matched against the whole path string.
    #[must_use]
    pub fn evaluate(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let excluded = self.inner.excluded(path);
        if decisions_traced() {
            let deciding = self
                .deciding_rule(path)
                .map(|rule| rule.pattern().to_string_lossy());
            trace_rule_decision(&path.to_string_lossy(), excluded, deciding.as_deref());
        }
        excluded
    }

    /// Returns the last rule whose pattern matches `path`, if any.
    ///
    /// Its kind always agrees with [`evaluate`](Self::evaluate).
    #[must_use]
    pub fn deciding_rule(&self, path: impl AsRef<Path>) -> Option<&PatternRule> {
        self.inner
            .deciding_rule(path.as_ref())
            .map(|compiled| &compiled.rule)
    }
}

impl FromIterator<PatternRule> for RuleEngine {
    fn from_iter<I: IntoIterator<Item = PatternRule>>(iter: I) -> Self {
        Self::from_rules(iter)
    }
}

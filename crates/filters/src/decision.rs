use std::path::Path;

use crate::{RuleKind, compiled::CompiledRule};

#[derive(Debug, Default)]
pub(crate) struct RuleEngineInner {
    pub(crate) rules: Vec<CompiledRule>,
}

impl RuleEngineInner {
    /// Folds every rule over `path` in definition order.
    ///
    /// An exclude rule can only set the mark and an include rule can only clear
    /// it, so the result equals the kind of the last matching rule.
    pub(crate) fn excluded(&self, path: &Path) -> bool {
        self.rules
            .iter()
            .fold(false, |excluded, rule| match rule.rule.kind {
                RuleKind::Exclude => excluded || rule.matches(path),
                RuleKind::Include => excluded && !rule.matches(path),
            })
    }

    pub(crate) fn deciding_rule(&self, path: &Path) -> Option<&CompiledRule> {
        last_matching_rule(&self.rules, path)
    }
}

fn last_matching_rule<'a>(rules: &'a [CompiledRule], path: &Path) -> Option<&'a CompiledRule> {
    rules.iter().rev().find(|rule| rule.matches(path))
}

//! Integration tests for rule precedence.
//!
//! Rules fold left to right: an exclude rule can set the mark, an include rule
//! can clear it, so the last rule whose pattern matches a path decides.

use filters::{PatternRule, RuleEngine, RuleKind};
use proptest::prelude::*;
use std::path::Path;

// ============================================================================
// Basic Precedence Tests
// ============================================================================

/// A later include overrides an earlier exclude with the same pattern.
#[test]
fn later_include_wins_over_identical_exclude() {
    let pattern = "/pkgroot/usr/share/doc/*";
    let engine = RuleEngine::from_rules([
        PatternRule::exclude(pattern),
        PatternRule::include(pattern),
    ]);
    assert!(!engine.evaluate("/pkgroot/usr/share/doc/foo"));
}

/// Swapping the two rules flips the decision.
#[test]
fn swapped_order_excludes() {
    let pattern = "/pkgroot/usr/share/doc/*";
    let engine = RuleEngine::from_rules([
        PatternRule::include(pattern),
        PatternRule::exclude(pattern),
    ]);
    assert!(engine.evaluate("/pkgroot/usr/share/doc/foo"));
}

#[test]
fn documentation_with_important_subtree() {
    let root = Path::new("/pkgroot");
    let engine = RuleEngine::from_rules([
        PatternRule::exclude_anchored(root, "/usr/share/doc/*"),
        PatternRule::include_anchored(root, "/usr/share/doc/important/*"),
    ]);

    assert!(engine.evaluate("/pkgroot/usr/share/doc/foo/readme.txt"));
    assert!(engine.evaluate("/pkgroot/usr/share/doc/foo"));
    assert!(!engine.evaluate("/pkgroot/usr/share/doc/important/file.txt"));
    // the directory itself only matches the exclude pattern
    assert!(engine.evaluate("/pkgroot/usr/share/doc/important"));
    assert!(!engine.evaluate("/pkgroot/usr/share/doc"));
}

#[test]
fn alternating_rules() {
    let engine = RuleEngine::from_rules([
        PatternRule::exclude("/r/*"),
        PatternRule::include("/r/*.txt"),
        PatternRule::exclude("/r/temp.txt"),
        PatternRule::include("/r/temp.txt"),
    ]);

    assert!(engine.evaluate("/r/data.bin"));
    assert!(!engine.evaluate("/r/notes.txt"));
    assert!(!engine.evaluate("/r/temp.txt"));
}

#[test]
fn locale_purging_keeps_selected_languages() {
    let root = Path::new("/target");
    let engine = RuleEngine::from_rules([
        PatternRule::exclude_anchored(root, "/usr/share/locale/*"),
        PatternRule::include_anchored(root, "/usr/share/locale/en*"),
        PatternRule::include_anchored(root, "/usr/share/locale/locale.alias"),
    ]);

    assert!(engine.evaluate("/target/usr/share/locale/de/LC_MESSAGES/bash.mo"));
    assert!(!engine.evaluate("/target/usr/share/locale/en_GB/LC_MESSAGES/bash.mo"));
    assert!(!engine.evaluate("/target/usr/share/locale/locale.alias"));
}

#[test]
fn patterns_without_wildcards_match_exactly() {
    let engine = RuleEngine::from_rules([PatternRule::exclude("/r/usr/share/doc")]);
    assert!(engine.evaluate("/r/usr/share/doc"));
    assert!(!engine.evaluate("/r/usr/share/doc/x"));
}

#[test]
fn malformed_patterns_do_not_break_evaluation() {
    let engine = RuleEngine::from_rules([
        PatternRule::exclude("/r/[unterminated"),
        PatternRule::exclude("/r/{brace"),
        PatternRule::exclude("/r/[z-a]"),
        PatternRule::exclude(""),
    ]);
    assert!(engine.evaluate("/r/[unterminated"));
    assert!(engine.evaluate("/r/{brace"));
    assert!(!engine.evaluate("/r/other"));
}

// ============================================================================
// Property Tests
// ============================================================================

fn rule_strategy() -> impl Strategy<Value = PatternRule> {
    let pattern = prop_oneof![
        Just("/r/*"),
        Just("/r/a*"),
        Just("/r/a/*"),
        Just("/r/?"),
        Just("/r/[ab]*"),
        Just("/r/[!a]*"),
        Just("/r/a/b"),
        Just("*.txt"),
    ];
    (any::<bool>(), pattern).prop_map(|(exclude, pattern)| {
        if exclude {
            PatternRule::exclude(pattern)
        } else {
            PatternRule::include(pattern)
        }
    })
}

fn path_strategy() -> impl Strategy<Value = String> {
    "/r(/[ab.txc]{1,3}){1,3}"
}

proptest! {
    #[test]
    fn evaluate_equals_kind_of_last_matching_rule(
        rules in prop::collection::vec(rule_strategy(), 0..8),
        path in path_strategy(),
    ) {
        let engine = RuleEngine::from_rules(rules);
        let expected = engine
            .deciding_rule(&path)
            .is_some_and(|rule| rule.kind() == RuleKind::Exclude);
        prop_assert_eq!(engine.evaluate(&path), expected);
    }

    #[test]
    fn appending_non_matching_rules_changes_nothing(
        rules in prop::collection::vec(rule_strategy(), 0..6),
        path in path_strategy(),
    ) {
        let before = RuleEngine::from_rules(rules.clone()).evaluate(&path);
        let mut extended = rules;
        extended.push(PatternRule::exclude("/elsewhere/*"));
        extended.push(PatternRule::include("/elsewhere/*"));
        prop_assert_eq!(RuleEngine::from_rules(extended).evaluate(&path), before);
    }

    #[test]
    fn evaluate_is_total(pattern in "\\PC{0,12}", path in "\\PC{0,16}") {
        let engine = RuleEngine::from_rules([
            PatternRule::exclude(pattern.clone()),
            PatternRule::include(pattern),
        ]);
        let _ = engine.evaluate(&path);
    }
}

//! Level resolution
//!
//! Given the current rules and a namespace, picks the effective level and
//! decides whether a message at some level passes it. Everything here is
//! pure; the registry owns the mutable state and calls in.
//!
//! Precedence among matching rules:
//! - exact beats regex, regex beats prefix, prefix beats the `*` wildcard
//! - within a class the longer literal (or regex source) wins
//! - remaining ties keep the rule that was inserted first

use indexmap::IndexMap;
use nslog_core_types::Level;

use crate::pattern::{NamespacePattern, Specificity};

/// Insertion-ordered mapping of pattern to level
///
/// Setting an existing pattern overwrites its level in place.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: IndexMap<NamespacePattern, Level>,
}

impl RuleSet {
    /// A rule set holding only the default `* -> info` rule
    pub fn new() -> Self {
        let mut rules = Self::empty();
        rules.set(NamespacePattern::Wildcard, Level::Info);
        rules
    }

    /// A rule set with no rules at all; nothing resolves against it
    pub fn empty() -> Self {
        Self {
            rules: IndexMap::new(),
        }
    }

    /// Insert or overwrite the rule for `pattern`, returning the previous level
    pub fn set(&mut self, pattern: impl Into<NamespacePattern>, level: Level) -> Option<Level> {
        self.rules.insert(pattern.into(), level)
    }

    pub fn get(&self, pattern: &NamespacePattern) -> Option<Level> {
        self.rules.get(pattern).copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&NamespacePattern, Level)> {
        self.rules.iter().map(|(p, l)| (p, *l))
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

/// The rule that decided a namespace's effective level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchedRule<'a> {
    pub pattern: &'a NamespacePattern,
    pub level: Level,
    pub specificity: Specificity,
}

/// Find the most specific rule matching `namespace`
pub fn resolve_rule<'a>(namespace: &str, rules: &'a RuleSet) -> Option<MatchedRule<'a>> {
    let mut best: Option<MatchedRule<'a>> = None;

    for (pattern, level) in rules.iter() {
        if !pattern.matches(namespace) {
            continue;
        }
        let specificity = pattern.specificity();
        match best {
            // Strictly greater only: equal-rank rules keep the earlier one.
            Some(b) if specificity <= b.specificity => {}
            _ => {
                best = Some(MatchedRule {
                    pattern,
                    level,
                    specificity,
                })
            }
        }
    }

    best
}

/// Effective level for `namespace`, or `None` when no rule matches
pub fn resolve(namespace: &str, rules: &RuleSet) -> Option<Level> {
    resolve_rule(namespace, rules).map(|m| m.level)
}

/// Whether a message at `message` passes a threshold of `configured`
pub fn permits(message: Level, configured: Level) -> bool {
    message.ordinal() >= configured.ordinal()
}

/// Resolve then gate; unconfigured namespaces never pass
pub fn should_emit(namespace: &str, level: Level, rules: &RuleSet) -> bool {
    resolve(namespace, rules).is_some_and(|configured| permits(level, configured))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regex(source: &str) -> NamespacePattern {
        NamespacePattern::regex(source).unwrap()
    }

    #[test]
    fn test_default_rule_set_has_wildcard_info() {
        let rules = RuleSet::new();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.get(&NamespacePattern::Wildcard), Some(Level::Info));
        assert_eq!(resolve("anything", &rules), Some(Level::Info));
    }

    #[test]
    fn test_empty_rule_set_is_unconfigured() {
        let rules = RuleSet::empty();
        assert_eq!(resolve("app", &rules), None);
        assert!(!should_emit("app", Level::Error, &rules));
    }

    #[test]
    fn test_exact_beats_regex_regardless_of_order() {
        let mut rules = RuleSet::new();
        rules.set("app:*", Level::Info);
        rules.set(regex(r"app:component\d+"), Level::Trace);
        rules.set("app:component1", Level::Info);
        assert_eq!(resolve("app:component1", &rules), Some(Level::Info));
        assert_eq!(resolve("app:component2", &rules), Some(Level::Trace));
    }

    #[test]
    fn test_regex_beats_prefix_and_wildcard() {
        let mut rules = RuleSet::empty();
        rules.set(regex(r"test:\d+"), Level::Trace);
        rules.set("*", Level::Info);
        rules.set("test:*", Level::Warn);
        assert_eq!(resolve("test:42", &rules), Some(Level::Trace));
        assert_eq!(resolve("test:x", &rules), Some(Level::Warn));
    }

    #[test]
    fn test_longer_prefix_wins() {
        let mut rules = RuleSet::new();
        rules.set("app:*", Level::Warn);
        rules.set("app:db:*", Level::Trace);
        assert_eq!(resolve("app:db:pool", &rules), Some(Level::Trace));
        assert_eq!(resolve("app:web", &rules), Some(Level::Warn));
        assert_eq!(resolve("other", &rules), Some(Level::Info));
    }

    #[test]
    fn test_longer_regex_source_wins() {
        let mut rules = RuleSet::empty();
        rules.set(regex("db"), Level::Error);
        rules.set(regex("db:.+"), Level::Trace);
        assert_eq!(resolve("db:pool", &rules), Some(Level::Trace));
    }

    #[test]
    fn test_equal_regex_length_keeps_first_inserted() {
        let mut rules = RuleSet::empty();
        rules.set(regex("a.c"), Level::Warn);
        rules.set(regex("ab."), Level::Trace);
        assert_eq!(resolve("abc", &rules), Some(Level::Warn));
    }

    #[test]
    fn test_overwrite_keeps_single_rule_and_position() {
        let mut rules = RuleSet::new();
        assert_eq!(rules.set("test", Level::Trace), None);
        rules.set("other", Level::Warn);
        assert_eq!(rules.set("test", Level::Info), Some(Level::Trace));
        assert_eq!(rules.len(), 3);
        let order: Vec<String> = rules.iter().map(|(p, _)| p.to_string()).collect();
        assert_eq!(order, vec!["*", "test", "other"]);
    }

    #[test]
    fn test_permits_threshold() {
        assert!(!permits(Level::Trace, Level::Info));
        assert!(permits(Level::Info, Level::Info));
        assert!(permits(Level::Error, Level::Trace));
        assert!(!permits(Level::Warn, Level::Error));
    }

    #[test]
    fn test_resolve_rule_reports_winner() {
        let mut rules = RuleSet::new();
        rules.set("app:*", Level::Trace);
        let matched = resolve_rule("app:test", &rules).unwrap();
        assert_eq!(matched.pattern.to_string(), "app:*");
        assert_eq!(matched.level, Level::Trace);
        assert_eq!(matched.specificity.length, 4);
    }
}

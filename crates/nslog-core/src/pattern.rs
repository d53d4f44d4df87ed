//! Namespace patterns
//!
//! A pattern is the key of a level rule. Literal strings are classified once,
//! at construction, into wildcard / prefix / exact variants so that matching
//! and ranking never have to re-inspect the text.

use std::fmt;
use std::hash::{Hash, Hasher};

use regex::Regex;

use crate::errors::{NsLogError, Result};

/// Specificity class, declared in ascending precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PatternClass {
    Wildcard,
    Prefix,
    Regex,
    Exact,
}

/// Rank of a matching pattern: class first, then literal length
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity {
    pub class: PatternClass,
    pub length: usize,
}

/// A compiled regular-expression pattern, identified by its source text
#[derive(Debug, Clone)]
pub struct RegexPattern {
    regex: Regex,
}

impl RegexPattern {
    /// Compile `source`
    ///
    /// # Errors
    ///
    /// Returns `InvalidPattern` if the expression does not compile.
    pub fn new(source: &str) -> Result<Self> {
        Regex::new(source)
            .map(|regex| Self { regex })
            .map_err(|e| NsLogError::InvalidPattern {
                pattern: source.to_string(),
                reason: e.to_string(),
            })
    }

    /// The expression's source text
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Unanchored search; anchor the source with `^…$` for full-string matching
    pub fn is_match(&self, namespace: &str) -> bool {
        self.regex.is_match(namespace)
    }
}

impl PartialEq for RegexPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for RegexPattern {}

impl Hash for RegexPattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl From<Regex> for RegexPattern {
    fn from(regex: Regex) -> Self {
        Self { regex }
    }
}

/// Key of a level rule
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NamespacePattern {
    /// `*`, matches every namespace
    Wildcard,
    /// `stem*`, matches namespaces starting with `stem` (stored without the `*`)
    Prefix(String),
    /// Matches one namespace exactly
    Exact(String),
    Regex(RegexPattern),
}

impl NamespacePattern {
    /// Classify a literal string pattern
    pub fn literal(pattern: &str) -> Self {
        if pattern == "*" {
            NamespacePattern::Wildcard
        } else if let Some(stem) = pattern.strip_suffix('*') {
            NamespacePattern::Prefix(stem.to_string())
        } else {
            NamespacePattern::Exact(pattern.to_string())
        }
    }

    /// Compile a regular-expression pattern
    ///
    /// # Errors
    ///
    /// Returns `InvalidPattern` if the expression does not compile.
    pub fn regex(source: &str) -> Result<Self> {
        RegexPattern::new(source).map(NamespacePattern::Regex)
    }

    pub fn matches(&self, namespace: &str) -> bool {
        match self {
            NamespacePattern::Wildcard => true,
            NamespacePattern::Prefix(stem) => namespace.starts_with(stem.as_str()),
            NamespacePattern::Exact(name) => namespace == name,
            NamespacePattern::Regex(re) => re.is_match(namespace),
        }
    }

    pub fn class(&self) -> PatternClass {
        match self {
            NamespacePattern::Wildcard => PatternClass::Wildcard,
            NamespacePattern::Prefix(_) => PatternClass::Prefix,
            NamespacePattern::Regex(_) => PatternClass::Regex,
            NamespacePattern::Exact(_) => PatternClass::Exact,
        }
    }

    /// Ranking used when several rules match the same namespace
    ///
    /// Length is the literal length for prefix and exact patterns (the
    /// trailing `*` excluded) and the source length for regex patterns.
    pub fn specificity(&self) -> Specificity {
        let length = match self {
            NamespacePattern::Wildcard => 0,
            NamespacePattern::Prefix(stem) => stem.chars().count(),
            NamespacePattern::Exact(name) => name.chars().count(),
            NamespacePattern::Regex(re) => re.as_str().chars().count(),
        };
        Specificity {
            class: self.class(),
            length,
        }
    }
}

impl fmt::Display for NamespacePattern {
    /// Literal patterns print as written; regex patterns print as `/source/`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamespacePattern::Wildcard => f.write_str("*"),
            NamespacePattern::Prefix(stem) => write!(f, "{}*", stem),
            NamespacePattern::Exact(name) => f.write_str(name),
            NamespacePattern::Regex(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

impl From<&str> for NamespacePattern {
    fn from(pattern: &str) -> Self {
        NamespacePattern::literal(pattern)
    }
}

impl From<String> for NamespacePattern {
    fn from(pattern: String) -> Self {
        NamespacePattern::literal(&pattern)
    }
}

impl From<&String> for NamespacePattern {
    fn from(pattern: &String) -> Self {
        NamespacePattern::literal(pattern)
    }
}

impl From<Regex> for NamespacePattern {
    fn from(regex: Regex) -> Self {
        NamespacePattern::Regex(regex.into())
    }
}

impl From<RegexPattern> for NamespacePattern {
    fn from(regex: RegexPattern) -> Self {
        NamespacePattern::Regex(regex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_classification() {
        assert_eq!(NamespacePattern::literal("*"), NamespacePattern::Wildcard);
        assert_eq!(
            NamespacePattern::literal("app:*"),
            NamespacePattern::Prefix("app:".to_string())
        );
        assert_eq!(
            NamespacePattern::literal("app:db"),
            NamespacePattern::Exact("app:db".to_string())
        );
        // Only a trailing star is special
        assert_eq!(
            NamespacePattern::literal("*:db"),
            NamespacePattern::Exact("*:db".to_string())
        );
    }

    #[test]
    fn test_double_star_is_a_prefix_of_star() {
        let pattern = NamespacePattern::literal("**");
        assert_eq!(pattern, NamespacePattern::Prefix("*".to_string()));
        assert!(pattern.matches("*anything"));
        assert!(!pattern.matches("anything"));
    }

    #[test]
    fn test_matching() {
        assert!(NamespacePattern::Wildcard.matches(""));
        assert!(NamespacePattern::literal("app:*").matches("app:"));
        assert!(NamespacePattern::literal("app:*").matches("app:test"));
        assert!(!NamespacePattern::literal("app:*").matches("ap"));
        assert!(NamespacePattern::literal("test").matches("test"));
        assert!(!NamespacePattern::literal("test").matches("test:1"));
    }

    #[test]
    fn test_regex_is_unanchored_search() {
        let pattern = NamespacePattern::regex(r"test:\d+").unwrap();
        assert!(pattern.matches("test:123"));
        assert!(pattern.matches("x-test:1-y"));
        let anchored = NamespacePattern::regex(r"^test:\d+$").unwrap();
        assert!(!anchored.matches("x-test:1-y"));
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        let err = NamespacePattern::regex("app:(").unwrap_err();
        assert!(matches!(err, NsLogError::InvalidPattern { ref pattern, .. } if pattern == "app:("));
    }

    #[test]
    fn test_specificity_ordering() {
        let wildcard = NamespacePattern::Wildcard.specificity();
        let prefix = NamespacePattern::literal("app:*").specificity();
        let regex = NamespacePattern::regex("a").unwrap().specificity();
        let exact = NamespacePattern::literal("a").specificity();

        assert!(wildcard < prefix);
        assert!(prefix < regex);
        assert!(regex < exact);
        assert_eq!(prefix.length, 4);
    }

    #[test]
    fn test_regex_keys_by_source() {
        let a = NamespacePattern::regex("app:.*").unwrap();
        let b = NamespacePattern::regex("app:.*").unwrap();
        assert_eq!(a, b);
        // Same text, different variant
        assert_ne!(NamespacePattern::literal("app:*"), NamespacePattern::regex("app:*").unwrap());
    }

    #[test]
    fn test_display_round_trips_literals() {
        for text in ["*", "app:*", "app:db"] {
            assert_eq!(NamespacePattern::literal(text).to_string(), text);
        }
        assert_eq!(NamespacePattern::regex("x+").unwrap().to_string(), "/x+/");
    }
}

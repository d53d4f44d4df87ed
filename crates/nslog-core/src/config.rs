//! Declarative registry configuration
//!
//! Rules can be described as data instead of code, in TOML, JSON or a
//! compact directive string:
//!
//! ```toml
//! enabled = true
//!
//! [[rules]]
//! pattern = "*"
//! level = "info"
//!
//! [[rules]]
//! pattern = '^db:\d+$'
//! regex = true
//! level = "warn"
//! ```
//!
//! The equivalent directive string is `*=info,/^db:\d+$/=warn`: comma
//! separated `pattern=level` pairs, where a pattern wrapped in slashes is a
//! regex. Commas cannot appear inside a directive pattern; use TOML or JSON
//! for such expressions.
//!
//! Parsing never touches the filesystem or environment; callers read the
//! text however they like.

use serde::{Deserialize, Serialize};

use nslog_core_types::schema::OP_APPLY_CONFIG;
use nslog_core_types::Level;

use crate::errors::{NsLogError, Result};
use crate::pattern::NamespacePattern;
use crate::registry::Registry;
use crate::{log_op_applied, log_op_rejected};

/// One level rule as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub pattern: String,
    pub level: String,
    /// Treat `pattern` as a regular expression instead of a literal
    #[serde(default)]
    pub regex: bool,
}

impl RuleConfig {
    pub fn new(pattern: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            level: level.into(),
            regex: false,
        }
    }

    pub fn regex(pattern: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            regex: true,
            ..Self::new(pattern, level)
        }
    }

    /// Validate the rule into its typed form
    ///
    /// # Errors
    ///
    /// Returns `InvalidLevel` for an unknown level symbol and
    /// `InvalidPattern` for a regex that does not compile.
    pub fn compile(&self) -> Result<(NamespacePattern, Level)> {
        let level = self.level.parse::<Level>()?;
        let pattern = if self.regex {
            NamespacePattern::regex(&self.pattern)?
        } else {
            NamespacePattern::literal(&self.pattern)
        };
        Ok((pattern, level))
    }
}

/// Registry settings that can be loaded from configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Gate state to apply; `None` leaves the registry's gate as it is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Rules applied in order, so later entries overwrite earlier ones
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl RegistryConfig {
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the document is not valid TOML for this shape.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| NsLogError::InvalidConfig {
            reason: e.to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` if the document is not valid JSON for this shape.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| NsLogError::InvalidConfig {
            reason: e.to_string(),
        })
    }

    /// Parse a directive string such as `*=info,app:*=trace,/^db:\d+$/=warn`
    ///
    /// Only the syntax is checked here; levels and regexes are validated by
    /// [`compile`](Self::compile) and [`apply`](Self::apply).
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a directive without `=` or with an empty
    /// pattern.
    pub fn parse_directives(text: &str) -> Result<Self> {
        let mut rules = Vec::new();
        for directive in text.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            let (pattern, level) =
                directive
                    .rsplit_once('=')
                    .ok_or_else(|| NsLogError::InvalidConfig {
                        reason: format!("directive '{}' is missing '=level'", directive),
                    })?;
            let (pattern, level) = (pattern.trim(), level.trim());
            if pattern.is_empty() {
                return Err(NsLogError::InvalidConfig {
                    reason: format!("directive '{}' has an empty pattern", directive),
                });
            }

            let rule = match pattern
                .strip_prefix('/')
                .and_then(|rest| rest.strip_suffix('/'))
            {
                Some(source) if !source.is_empty() => RuleConfig::regex(source, level),
                _ => RuleConfig::new(pattern, level),
            };
            rules.push(rule);
        }

        Ok(Self {
            enabled: None,
            rules,
        })
    }

    /// Layer `other` on top of `self`: its rules come after ours and its
    /// gate setting, if any, wins.
    pub fn merge(mut self, other: RegistryConfig) -> Self {
        self.rules.extend(other.rules);
        if other.enabled.is_some() {
            self.enabled = other.enabled;
        }
        self
    }

    /// Validate every rule
    ///
    /// # Errors
    ///
    /// Returns the first rule's `InvalidLevel` or `InvalidPattern` error.
    pub fn compile(&self) -> Result<Vec<(NamespacePattern, Level)>> {
        self.rules.iter().map(RuleConfig::compile).collect()
    }

    /// Apply to `registry`, all or nothing
    ///
    /// Every rule is validated before any is set, so a bad entry leaves the
    /// registry untouched. Rules and gate then change under one write lock,
    /// so a concurrent dispatch never sees part of the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation error.
    pub fn apply(&self, registry: &Registry) -> Result<()> {
        let compiled = self.compile().map_err(|err| {
            log_op_rejected!(OP_APPLY_CONFIG, err.clone());
            err
        })?;

        registry.apply_validated(compiled, self.enabled);
        log_op_applied!(OP_APPLY_CONFIG, rules = self.rules.len(), enabled = ?self.enabled);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directives() {
        let config = RegistryConfig::parse_directives(r" *=info , app:*=trace,/^db:\d+$/=warn,").unwrap();
        assert_eq!(
            config.rules,
            vec![
                RuleConfig::new("*", "info"),
                RuleConfig::new("app:*", "trace"),
                RuleConfig::regex(r"^db:\d+$", "warn"),
            ]
        );
        assert_eq!(config.enabled, None);
    }

    #[test]
    fn test_directive_regex_may_contain_equals() {
        let config = RegistryConfig::parse_directives("/a=b/=error").unwrap();
        assert_eq!(config.rules, vec![RuleConfig::regex("a=b", "error")]);
    }

    #[test]
    fn test_lone_slashes_are_literal() {
        let config = RegistryConfig::parse_directives("//=info,/=warn").unwrap();
        assert!(config.rules.iter().all(|r| !r.regex));
    }

    #[test]
    fn test_directive_errors() {
        assert!(matches!(
            RegistryConfig::parse_directives("app:*"),
            Err(NsLogError::InvalidConfig { .. })
        ));
        assert!(matches!(
            RegistryConfig::parse_directives("=info"),
            Err(NsLogError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_compile_reports_invalid_level() {
        let config = RegistryConfig::parse_directives("app=loud").unwrap();
        assert_eq!(
            config.compile().unwrap_err(),
            NsLogError::InvalidLevel {
                level: "loud".to_string()
            }
        );
    }

    #[test]
    fn test_merge_appends_rules_and_overrides_gate() {
        let base = RegistryConfig {
            enabled: Some(true),
            rules: vec![RuleConfig::new("*", "warn")],
        };
        let overlay = RegistryConfig {
            enabled: Some(false),
            rules: vec![RuleConfig::new("app", "trace")],
        };
        let merged = base.merge(overlay);
        assert_eq!(merged.enabled, Some(false));
        assert_eq!(merged.rules.len(), 2);
        assert_eq!(merged.rules[1].pattern, "app");

        let keep_gate = merged.clone().merge(RegistryConfig::default());
        assert_eq!(keep_gate.enabled, Some(false));
    }
}

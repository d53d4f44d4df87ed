//! Severity levels
//!
//! The level set is fixed at build time. Variants are declared from most
//! verbose to least verbose, so the derived `Ord` is the comparison used by
//! every gate decision.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Message severity, ordered `Trace < Info < Warn < Error`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Detailed debugging output
    Trace,
    /// General information
    Info,
    /// Suspicious condition
    Warn,
    /// Runtime error
    Error,
}

/// A level symbol outside the recognized set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized level symbol '{0}' (expected one of: trace, info, warn, error)")]
pub struct UnknownLevel(pub String);

impl Level {
    /// Every level, most verbose first
    pub const ALL: [Level; 4] = [Level::Trace, Level::Info, Level::Warn, Level::Error];

    /// Position in the fixed ordering
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// The lowercase symbol used in configuration and by sinks
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }

    /// The uppercase label used in rendered prefixes
    pub fn label(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl FromStr for Level {
    type Err = UnknownLevel;

    /// Parse a level symbol. Only the exact lowercase symbols are accepted;
    /// anything else is rejected rather than coerced.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trace" => Ok(Level::Trace),
            "info" => Ok(Level::Info),
            "warn" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            other => Err(UnknownLevel(other.to_string())),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

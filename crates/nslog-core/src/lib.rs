//! nslog Core - namespaced logging facade
//!
//! Callers obtain a named [`Logger`] from a [`Registry`] and emit messages at
//! a [`Level`]. For every message the registry resolves the namespace's
//! effective level from pattern rules, checks the global gate, and hands the
//! raw message parts to a pluggable [`Sink`].
//!
//! - [`pattern`]: wildcard / prefix / exact / regex rule keys and their ranking
//! - [`resolver`]: effective-level resolution and level comparison
//! - [`registry`]: the process-wide owner of rules, gate, sink and loggers
//! - [`sink`]: the sink contract and the built-in console, writer and memory sinks
//! - [`config`]: rules as TOML, JSON or directive strings
//! - [`logging_facility`]: `tracing` diagnostics about configuration changes

pub mod config;
pub mod errors;
pub mod logger;
pub mod logging_facility;
mod macros;
pub mod pattern;
pub mod registry;
pub mod resolver;
pub mod sink;

// Re-export commonly used types
pub use config::{RegistryConfig, RuleConfig};
pub use errors::{ExError, ExErrorKind, NsLogError, Result};
pub use logger::Logger;
pub use nslog_core_types::{schema, Level, LogValue, UnknownLevel};
pub use pattern::{NamespacePattern, PatternClass, RegexPattern, Specificity};
pub use registry::Registry;
pub use resolver::{permits, resolve, resolve_rule, MatchedRule, RuleSet};
pub use sink::{ConsoleSink, MemorySink, Record, Sink, WriterSink};

#[doc(hidden)]
pub mod __private {
    pub use tracing;
}

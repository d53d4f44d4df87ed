use std::fmt;
use std::sync::Weak;

use nslog_core_types::{Level, LogValue};

use crate::registry::Registry;

/// Per-namespace logging handle
///
/// Obtained from [`Registry::get_logger`], which hands out the same `Arc`
/// for every lookup of a namespace. Each level method is sugar for
/// [`Registry::dispatch`] with this handle's namespace.
///
/// A handle refers to its registry weakly: once the registry is dropped (or
/// the global instance is reset and the old one released), calls on the
/// handle are silently discarded.
pub struct Logger {
    namespace: String,
    registry: Weak<Registry>,
}

impl Logger {
    pub(crate) fn new(namespace: String, registry: Weak<Registry>) -> Self {
        Self {
            namespace,
            registry,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Emit `parts` at `level`
    pub fn log(&self, level: Level, parts: &[LogValue]) {
        if let Some(registry) = self.registry.upgrade() {
            registry.dispatch(&self.namespace, level, parts);
        }
    }

    pub fn trace(&self, parts: &[LogValue]) {
        self.log(Level::Trace, parts)
    }

    pub fn info(&self, parts: &[LogValue]) {
        self.log(Level::Info, parts)
    }

    pub fn warn(&self, parts: &[LogValue]) {
        self.log(Level::Warn, parts)
    }

    pub fn error(&self, parts: &[LogValue]) {
        self.log(Level::Error, parts)
    }

    /// Whether a message at `level` would currently reach the sink
    ///
    /// Useful to skip building expensive message parts.
    pub fn is_enabled_for(&self, level: Level) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.would_emit(&self.namespace, level))
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

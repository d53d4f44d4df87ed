//! Logger registry
//!
//! The registry owns all mutable logging configuration: the level rules,
//! the enabled gate, the current sink and the cache of logger handles.
//!
//! # Global instance
//!
//! [`Registry::instance`] returns the process-wide registry, creating it on
//! first use. [`Registry::reset_instance`] swaps in a fresh default registry,
//! which is how tests isolate themselves from each other. Code that wants an
//! independent registry (e.g. one per test) uses [`Registry::new`].
//!
//! # Concurrency
//!
//! Rules, gate and sink live behind one `RwLock`. A dispatch reads all three
//! under a single read guard, so it sees one consistent configuration, then
//! releases the guard before calling the sink. A sink may therefore log or
//! reconfigure the registry itself, and a panicking sink cannot poison the
//! lock or leave the configuration half-updated.
//!
//! # Example
//!
//! ```
//! use nslog_core::{Level, MemorySink, Registry};
//! use nslog_core::log_info;
//!
//! let registry = Registry::new();
//! let sink = MemorySink::new();
//! registry.set_sink(sink.clone());
//! registry.set_level("app:*", Level::Trace);
//!
//! let logger = registry.get_logger("app:db")?;
//! logger.trace(&["connecting".into()]);
//! log_info!(logger, "connected", 3);
//!
//! assert_eq!(
//!     sink.lines(),
//!     vec!["[TRACE] [app:db] connecting", "[INFO] [app:db] connected 3"]
//! );
//! # Ok::<(), nslog_core::NsLogError>(())
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{
    Arc, Mutex, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak,
};

use nslog_core_types::schema::{
    OP_DISPATCH, OP_GET_LOGGER, OP_RESET_SINK, OP_SET_ENABLED, OP_SET_LEVEL, OP_SET_SINK,
};
use nslog_core_types::{Level, LogValue};

use crate::errors::{NsLogError, Result};
use crate::logger::Logger;
use crate::pattern::NamespacePattern;
use crate::resolver::{self, RuleSet};
use crate::sink::{ConsoleSink, Sink};
use crate::{log_op_applied, log_op_rejected};

/// Storage for the process-wide registry; the inner lock allows resets.
static GLOBAL_REGISTRY: OnceLock<RwLock<Arc<Registry>>> = OnceLock::new();

fn global_cell() -> &'static RwLock<Arc<Registry>> {
    GLOBAL_REGISTRY.get_or_init(|| RwLock::new(Registry::new()))
}

struct RegistryState {
    rules: RuleSet,
    enabled: bool,
    sink: Arc<dyn Sink>,
}

impl RegistryState {
    fn new() -> Self {
        Self {
            rules: RuleSet::new(),
            enabled: true,
            sink: default_sink(),
        }
    }
}

static DEFAULT_SINK: OnceLock<Arc<dyn Sink>> = OnceLock::new();

fn default_sink() -> Arc<dyn Sink> {
    DEFAULT_SINK
        .get_or_init(|| Arc::new(ConsoleSink::new()))
        .clone()
}

/// Owner of logging configuration and logger handles
pub struct Registry {
    state: RwLock<RegistryState>,
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
    self_ref: Weak<Registry>,
}

impl Registry {
    /// Create an independent registry with default configuration:
    /// `* -> info`, enabled, console sink.
    pub fn new() -> Arc<Self> {
        Arc::new_cyclic(|self_ref| Self {
            state: RwLock::new(RegistryState::new()),
            loggers: Mutex::new(HashMap::new()),
            self_ref: self_ref.clone(),
        })
    }

    /// The process-wide registry, created on first call
    pub fn instance() -> Arc<Self> {
        global_cell()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the process-wide registry with a fresh default one
    ///
    /// Handles obtained from the previous instance stop delivering once
    /// that instance is dropped.
    pub fn reset_instance() {
        *global_cell()
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Registry::new();
    }

    fn read_state(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the handle for `namespace`, creating and caching it if needed
    ///
    /// # Errors
    ///
    /// Returns `LoggerCreation` if the logger cache is unusable because a
    /// thread panicked while holding it.
    pub fn get_logger(&self, namespace: &str) -> Result<Arc<Logger>> {
        let mut loggers = self.loggers.lock().map_err(|_| {
            let err = NsLogError::LoggerCreation {
                namespace: namespace.to_string(),
                reason: "logger cache is poisoned".to_string(),
            };
            log_op_rejected!(OP_GET_LOGGER, err.clone());
            err
        })?;

        if let Some(logger) = loggers.get(namespace) {
            return Ok(logger.clone());
        }

        let logger = Arc::new(Logger::new(namespace.to_string(), self.self_ref.clone()));
        loggers.insert(namespace.to_string(), logger.clone());
        log_op_applied!(OP_GET_LOGGER, namespace = namespace);
        Ok(logger)
    }

    /// Number of distinct namespaces with a cached handle
    pub fn logger_count(&self) -> usize {
        self.loggers
            .lock()
            .map(|loggers| loggers.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len())
    }

    /// Insert or overwrite the rule for `pattern`
    ///
    /// String patterns are classified as `*`, `prefix*` or exact; pass a
    /// [`regex::Regex`] or [`NamespacePattern::regex`] for regex rules.
    pub fn set_level(&self, pattern: impl Into<NamespacePattern>, level: Level) {
        let pattern = pattern.into();
        log_op_applied!(OP_SET_LEVEL, pattern = %pattern, level = %level);
        self.write_state().rules.set(pattern, level);
    }

    /// [`set_level`](Self::set_level) taking a level symbol
    ///
    /// # Errors
    ///
    /// Returns `InvalidLevel` if `level` is not `trace`, `info`, `warn` or
    /// `error`. The rule set is left untouched.
    pub fn set_level_named(&self, pattern: impl Into<NamespacePattern>, level: &str) -> Result<()> {
        let level = level.parse::<Level>().map_err(|e| {
            let err = NsLogError::from(e);
            log_op_rejected!(OP_SET_LEVEL, err.clone());
            err
        })?;
        self.set_level(pattern, level);
        Ok(())
    }

    /// Compile `source` and register it as a regex rule
    ///
    /// # Errors
    ///
    /// Returns `InvalidPattern` if the expression does not compile.
    pub fn set_regex_level(&self, source: &str, level: Level) -> Result<()> {
        let pattern = NamespacePattern::regex(source).map_err(|err| {
            log_op_rejected!(OP_SET_LEVEL, err.clone());
            err
        })?;
        self.set_level(pattern, level);
        Ok(())
    }

    /// Set validated rules and, optionally, the gate under one write guard
    ///
    /// A concurrent dispatch sees either none of the change or all of it.
    pub(crate) fn apply_validated(
        &self,
        rules: impl IntoIterator<Item = (NamespacePattern, Level)>,
        enabled: Option<bool>,
    ) {
        let mut state = self.write_state();
        for (pattern, level) in rules {
            state.rules.set(pattern, level);
        }
        if let Some(enabled) = enabled {
            state.enabled = enabled;
        }
    }

    /// Snapshot of the current rules
    pub fn rules(&self) -> RuleSet {
        self.read_state().rules.clone()
    }

    /// Effective level for `namespace`, or `None` if no rule matches
    pub fn level_for(&self, namespace: &str) -> Option<Level> {
        resolver::resolve(namespace, &self.read_state().rules)
    }

    pub fn enable(&self) {
        self.set_enabled(true);
    }

    pub fn disable(&self) {
        self.set_enabled(false);
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.write_state().enabled = enabled;
        log_op_applied!(OP_SET_ENABLED, enabled = enabled);
    }

    pub fn is_enabled(&self) -> bool {
        self.read_state().enabled
    }

    /// Route every passing message to `sink` instead of the current one
    pub fn set_sink<S: Sink + 'static>(&self, sink: S) {
        self.set_shared_sink(Arc::new(sink));
    }

    /// Like [`set_sink`](Self::set_sink) for a sink that is already shared
    pub fn set_shared_sink(&self, sink: Arc<dyn Sink>) {
        self.write_state().sink = sink;
        log_op_applied!(OP_SET_SINK);
    }

    /// Restore the built-in console sink
    pub fn reset_sink(&self) {
        self.write_state().sink = default_sink();
        log_op_applied!(OP_RESET_SINK);
    }

    /// Whether a message at `level` for `namespace` would reach the sink now
    pub fn would_emit(&self, namespace: &str, level: Level) -> bool {
        let state = self.read_state();
        state.enabled && resolver::should_emit(namespace, level, &state.rules)
    }

    /// Gate a message and, if it passes, hand the raw parts to the sink
    ///
    /// Usually reached through a [`Logger`] rather than called directly.
    pub fn dispatch(&self, namespace: &str, level: Level, parts: &[LogValue]) {
        let sink = {
            let state = self.read_state();
            if !state.enabled || !resolver::should_emit(namespace, level, &state.rules) {
                return;
            }
            state.sink.clone()
        };
        sink.write(level, namespace, parts);
    }

    /// [`dispatch`](Self::dispatch) taking a level symbol
    ///
    /// # Errors
    ///
    /// Returns `InvalidLevel` for an unrecognized symbol; nothing is emitted.
    pub fn dispatch_named(&self, namespace: &str, level: &str, parts: &[LogValue]) -> Result<()> {
        let level = level.parse::<Level>().map_err(|e| {
            let err = NsLogError::from(e);
            log_op_rejected!(OP_DISPATCH, err.clone());
            err
        })?;
        self.dispatch(namespace, level, parts);
        Ok(())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read_state();
        f.debug_struct("Registry")
            .field("rules", &state.rules)
            .field("enabled", &state.enabled)
            .field("loggers", &self.logger_count())
            .finish_non_exhaustive()
    }
}

//! Variadic logging macros
//!
//! Each macro converts its arguments into [`LogValue`](crate::LogValue)s and
//! calls the matching [`Logger`](crate::Logger) method.
//!
//! ```
//! use nslog_core::{log_error, Registry, MemorySink};
//! use serde_json::json;
//!
//! let registry = Registry::new();
//! let sink = MemorySink::new();
//! registry.set_sink(sink.clone());
//!
//! let logger = registry.get_logger("myapp:component")?;
//! log_error!(logger, "Error occurred", json!({"details": "error info"}));
//!
//! let record = &sink.records()[0];
//! assert_eq!(record.parts.len(), 2);
//! assert!(!record.parts[1].is_primitive());
//! # Ok::<(), nslog_core::NsLogError>(())
//! ```

/// Log at an explicit level: `log_at!(logger, Level::Warn, "a", 1)`
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr $(, $part:expr)* $(,)?) => {
        $logger.log($level, &[$($crate::LogValue::from($part)),*])
    };
}

#[macro_export]
macro_rules! log_trace {
    ($logger:expr $(, $part:expr)* $(,)?) => {
        $logger.trace(&[$($crate::LogValue::from($part)),*])
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr $(, $part:expr)* $(,)?) => {
        $logger.info(&[$($crate::LogValue::from($part)),*])
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr $(, $part:expr)* $(,)?) => {
        $logger.warn(&[$($crate::LogValue::from($part)),*])
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr $(, $part:expr)* $(,)?) => {
        $logger.error(&[$($crate::LogValue::from($part)),*])
    };
}

use nslog_core_types::UnknownLevel;
use thiserror::Error;

/// Result type alias using NsLogError
pub type Result<T> = std::result::Result<T, NsLogError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling and testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Boundary validation
    /// A level symbol outside the recognized set
    InvalidLevel,
    /// A regular-expression pattern that does not compile
    InvalidPattern,
    /// Malformed configuration document or directive string
    InvalidConfig,

    // Construction
    /// A logger handle could not be built
    LoggerCreation,

    // Values
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidLevel => "ERR_INVALID_LEVEL",
            ExErrorKind::InvalidPattern => "ERR_INVALID_PATTERN",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::LoggerCreation => "ERR_LOGGER_CREATION",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification used for programmatic handling plus the
/// context (operation, pattern, namespace) needed to debug a rejection.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    pattern: Option<String>,
    namespace: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            pattern: None,
            namespace: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add pattern context
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Add namespace context
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the pattern context, if any
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Get the namespace context, if any
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(pattern) = &self.pattern {
            write!(f, " (pattern: {})", pattern)?;
        }
        if let Some(namespace) = &self.namespace {
            write!(f, " (namespace: {})", namespace)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for nslog operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NsLogError {
    /// Level symbol is not one of trace, info, warn, error
    #[error("Invalid log level: {level}")]
    InvalidLevel { level: String },

    /// Regex pattern failed to compile
    #[error("Invalid namespace pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Logger handle could not be constructed
    #[error("Failed to create logger for namespace '{namespace}': {reason}")]
    LoggerCreation { namespace: String, reason: String },

    /// Configuration could not be parsed or validated
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Value could not be converted to a structured message part
    #[error("Serialization failed: {reason}")]
    Serialization { reason: String },
}

impl From<UnknownLevel> for NsLogError {
    fn from(err: UnknownLevel) -> Self {
        NsLogError::InvalidLevel { level: err.0 }
    }
}

impl From<serde_json::Error> for NsLogError {
    fn from(err: serde_json::Error) -> Self {
        NsLogError::Serialization {
            reason: err.to_string(),
        }
    }
}

impl From<NsLogError> for ExError {
    fn from(err: NsLogError) -> Self {
        let message = err.to_string();
        match err {
            NsLogError::InvalidLevel { .. } => {
                ExError::new(ExErrorKind::InvalidLevel).with_message(message)
            }
            NsLogError::InvalidPattern { pattern, .. } => ExError::new(ExErrorKind::InvalidPattern)
                .with_pattern(pattern)
                .with_message(message),
            NsLogError::LoggerCreation { namespace, .. } => {
                ExError::new(ExErrorKind::LoggerCreation)
                    .with_op("get_logger")
                    .with_namespace(namespace)
                    .with_message(message)
            }
            NsLogError::InvalidConfig { .. } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(message)
            }
            NsLogError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_level_converts_to_invalid_level() {
        let err: NsLogError = "verbose".parse::<nslog_core_types::Level>().unwrap_err().into();
        assert_eq!(
            err,
            NsLogError::InvalidLevel {
                level: "verbose".to_string()
            }
        );
    }

    #[test]
    fn test_display_includes_code_and_context() {
        let err = ExError::new(ExErrorKind::InvalidPattern)
            .with_op("set_level")
            .with_pattern("(")
            .with_message("unclosed group");
        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_INVALID_PATTERN]"));
        assert!(rendered.contains("set_level"));
        assert!(rendered.contains("(pattern: ()"));
    }

    #[test]
    fn test_source_chain_is_exposed() {
        use std::error::Error;

        let inner = ExError::new(ExErrorKind::InvalidLevel).with_message("bad level");
        let outer = ExError::new(ExErrorKind::InvalidConfig).with_source(inner);
        assert_eq!(
            outer.source_error().map(ExError::kind),
            Some(ExErrorKind::InvalidLevel)
        );
        assert!(outer.source().is_some());
    }
}

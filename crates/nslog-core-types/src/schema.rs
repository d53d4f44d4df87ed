//! Canonical schema constants for the library's own diagnostics
//!
//! These constants keep the `tracing` events emitted by the registry
//! consistent, so tests and subscribers can match on them.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";

// Registry subjects
pub const FIELD_PATTERN: &str = "pattern";
pub const FIELD_LEVEL: &str = "level";
pub const FIELD_NAMESPACE: &str = "namespace";
pub const FIELD_ENABLED: &str = "enabled";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_APPLIED: &str = "applied";
pub const EVENT_REJECTED: &str = "rejected";

// Canonical operation names
pub const OP_SET_LEVEL: &str = "set_level";
pub const OP_SET_ENABLED: &str = "set_enabled";
pub const OP_SET_SINK: &str = "set_sink";
pub const OP_RESET_SINK: &str = "reset_sink";
pub const OP_GET_LOGGER: &str = "get_logger";
pub const OP_DISPATCH: &str = "dispatch";
pub const OP_APPLY_CONFIG: &str = "apply_config";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!EVENT_APPLIED.is_empty());
        assert!(!EVENT_REJECTED.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_APPLIED, EVENT_REJECTED);
    }

    #[test]
    fn test_op_names_are_distinct() {
        let ops = [
            OP_SET_LEVEL,
            OP_SET_ENABLED,
            OP_SET_SINK,
            OP_RESET_SINK,
            OP_GET_LOGGER,
            OP_DISPATCH,
            OP_APPLY_CONFIG,
        ];
        for (i, a) in ops.iter().enumerate() {
            for b in &ops[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}

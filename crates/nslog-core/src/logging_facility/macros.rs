//! Canonical diagnostics macros
//!
//! These macros give every configuration change and rejected call the same
//! `component` / `op` / `event` shape.

/// Record that an operation changed registry state
///
/// # Example
///
/// ```
/// # use nslog_core::log_op_applied;
/// log_op_applied!("set_level");
/// log_op_applied!("set_level", pattern = "app:*", level = "trace");
/// ```
#[macro_export]
macro_rules! log_op_applied {
    ($op:expr) => {
        $crate::__private::tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_APPLIED,
        );
    };
    ($op:expr, $($field:tt)*) => {
        $crate::__private::tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_APPLIED,
            $($field)*
        );
    };
}

/// Record that an operation rejected its input
///
/// The error is converted into [`ExError`](crate::errors::ExError) so the
/// event carries the stable error code.
///
/// # Example
///
/// ```
/// # use nslog_core::{log_op_rejected, NsLogError};
/// let err = NsLogError::InvalidLevel { level: "loud".to_string() };
/// log_op_rejected!("set_level", err);
/// ```
#[macro_export]
macro_rules! log_op_rejected {
    ($op:expr, $err:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__private::tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_REJECTED,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
        );
    }};
}

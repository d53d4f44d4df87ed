//! Diagnostics about the logging configuration itself
//!
//! Namespaced messages go to sinks. Changes to the registry (rules set,
//! gate flipped, sink swapped, config rejected) are reported separately as
//! `tracing` events with `component`, `op` and `event` fields.
//!
//! ```rust
//! use nslog_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{capture_diagnostics, DiagnosticCapture, DiagnosticEvent};

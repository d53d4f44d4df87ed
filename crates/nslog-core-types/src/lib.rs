//! Core types shared across nslog crates
//!
//! This crate provides the vocabulary used by the resolver, the registry
//! and every sink:
//!
//! - **Levels**: the fixed, totally ordered severity set
//! - **Values**: the tagged message-part union handed to sinks
//! - **Schema constants**: canonical field keys and event names for the
//!   library's own diagnostics

pub mod level;
pub mod schema;
pub mod value;

pub use level::{Level, UnknownLevel};
pub use value::LogValue;

//! Logging initialization module
//!
//! Provides a single initialization point for the diagnostics subscriber.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is not set
    pub fn default_filter(&self) -> &'static str {
        match self {
            Profile::Development => "nslog_core=debug",
            Profile::Production => "nslog_core=info",
            Profile::Test => "nslog_core=trace",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the diagnostics subscriber
///
/// Only the first call has an effect.
///
/// # Profiles
///
/// - **Development**: Human-readable diagnostics at debug level
/// - **Production**: JSON structured diagnostics at info level
/// - **Test**: Bare registry; use `capture_diagnostics()` to collect events
///
/// # Example
///
/// ```
/// use nslog_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_filter()));
        // A subscriber installed elsewhere wins; ours is then simply not used.
        let _ = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish()
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        // Multiple calls should not panic
        init(Profile::Test);
        init(Profile::Test);
        init(Profile::Development);
    }

    #[test]
    fn test_profile_filters() {
        assert_eq!(Profile::Production.default_filter(), "nslog_core=info");
        assert_ne!(Profile::Development, Profile::Production);
    }
}

//! In-memory capture of registry diagnostics
//!
//! Installs a `tracing` layer that keeps every event so tests can assert on
//! which configuration changes the registry reported.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use nslog_core_types::schema::{FIELD_COMPONENT, FIELD_ERR_CODE, FIELD_EVENT, FIELD_OP};

/// One recorded diagnostics event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticEvent {
    pub level: tracing::Level,
    pub fields: BTreeMap<String, String>,
}

impl DiagnosticEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn component(&self) -> Option<&str> {
        self.field(FIELD_COMPONENT)
    }

    pub fn op(&self) -> Option<&str> {
        self.field(FIELD_OP)
    }

    pub fn event(&self) -> Option<&str> {
        self.field(FIELD_EVENT)
    }

    /// Stable `ERR_*` code of a rejection
    pub fn err_code(&self) -> Option<&str> {
        self.field(FIELD_ERR_CODE)
    }

    pub fn is(&self, op: &str, event: &str) -> bool {
        self.op() == Some(op) && self.event() == Some(event)
    }
}

#[derive(Default)]
struct Fields(BTreeMap<String, String>);

impl Visit for Fields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_string(), format!("{:?}", value));
    }
}

type Store = Arc<Mutex<Vec<DiagnosticEvent>>>;

/// Layer pushing events into a [`DiagnosticCapture`]
pub struct CaptureLayer {
    store: Store,
}

impl CaptureLayer {
    pub fn new() -> (Self, DiagnosticCapture) {
        let store = Store::default();
        (
            Self {
                store: Arc::clone(&store),
            },
            DiagnosticCapture { store },
        )
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        event.record(&mut fields);
        self.store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(DiagnosticEvent {
                level: *event.metadata().level(),
                fields: fields.0,
            });
    }
}

/// Read side of the capture
#[derive(Clone)]
pub struct DiagnosticCapture {
    store: Store,
}

impl DiagnosticCapture {
    /// Snapshot of everything recorded so far
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&DiagnosticEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    /// First event for `op` carrying `field = value`
    pub fn find(&self, op: &str, field: &str, value: &str) -> Option<DiagnosticEvent> {
        self.events()
            .into_iter()
            .find(|e| e.op() == Some(op) && e.field(field) == Some(value))
    }

    /// # Panics
    ///
    /// Panics if no `op` / `event` pair was recorded.
    pub fn assert_recorded(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is(op, event)),
            "Expected event op={} event={} among {} recorded",
            op,
            event,
            events.len()
        );
    }

    pub fn clear(&self) {
        self.store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

static CAPTURE: OnceLock<DiagnosticCapture> = OnceLock::new();

/// Route diagnostics into memory for the rest of the process
///
/// The first call installs the global subscriber; later calls return the
/// same handle. Tests in one binary share it, so filter on values unique to
/// each test.
///
/// ```
/// use nslog_core::logging_facility::capture_diagnostics;
/// use nslog_core::log_op_applied;
///
/// let capture = capture_diagnostics();
/// log_op_applied!("doc_example_op");
/// capture.assert_recorded("doc_example_op", "applied");
/// ```
pub fn capture_diagnostics() -> DiagnosticCapture {
    CAPTURE
        .get_or_init(|| {
            let (layer, capture) = CaptureLayer::new();
            // Another global subscriber wins; the capture then stays empty.
            let _ = tracing_subscriber::registry().with(layer).try_init();
            capture
        })
        .clone()
}

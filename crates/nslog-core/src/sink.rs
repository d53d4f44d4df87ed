//! Output sinks
//!
//! A sink receives every message that passes the registry's gate and is
//! solely responsible for rendering and delivering it. Sinks must not panic;
//! delivery failures (a closed pipe, a full disk) are swallowed here rather
//! than surfaced to the code that logged.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{SecondsFormat, Utc};
use nslog_core_types::{Level, LogValue};

/// Final destination of a log message
///
/// Any `Fn(Level, &str, &[LogValue]) + Send + Sync` closure is a sink.
pub trait Sink: Send + Sync {
    /// Deliver one message. Parts arrive un-rendered.
    fn write(&self, level: Level, namespace: &str, parts: &[LogValue]);
}

impl<F> Sink for F
where
    F: Fn(Level, &str, &[LogValue]) + Send + Sync,
{
    fn write(&self, level: Level, namespace: &str, parts: &[LogValue]) {
        self(level, namespace, parts)
    }
}

/// Render a message the way the built-in sinks do
///
/// Produces `[LEVEL] [namespace]` followed by each part separated by a
/// single space. Structured parts are pretty-printed JSON.
///
/// ```
/// use nslog_core::sink::render_line;
/// use nslog_core::{Level, LogValue};
///
/// let line = render_line(Level::Info, "app", &[LogValue::from("ready"), LogValue::Null]);
/// assert_eq!(line, "[INFO] [app] ready null");
/// ```
pub fn render_line(level: Level, namespace: &str, parts: &[LogValue]) -> String {
    let mut line = format!("[{}] [{}]", level.label(), namespace);
    for part in parts {
        line.push(' ');
        line.push_str(&part.render());
    }
    line
}

/// The default sink: one line per message on a standard stream
///
/// `error` goes to stderr; `trace`, `info` and `warn` go to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub const fn new() -> Self {
        Self
    }
}

impl Sink for ConsoleSink {
    fn write(&self, level: Level, namespace: &str, parts: &[LogValue]) {
        let line = render_line(level, namespace, parts);
        // Write failures are dropped: a sink never fails the caller.
        let _ = match level {
            Level::Error => writeln!(std::io::stderr().lock(), "{}", line),
            Level::Trace | Level::Info | Level::Warn => {
                writeln!(std::io::stdout().lock(), "{}", line)
            }
        };
    }
}

/// Renders lines into any writer, optionally prefixed with a UTC timestamp
///
/// Suitable for log files and in-memory buffers.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: Mutex<W>,
    timestamps: bool,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            timestamps: false,
        }
    }

    /// Prefix every line with an RFC 3339 timestamp (millisecond precision)
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    /// Recover the writer, e.g. to inspect a buffer
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write(&self, level: Level, namespace: &str, parts: &[LogValue]) {
        let line = render_line(level, namespace, parts);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = if self.timestamps {
            let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            writeln!(writer, "{} {}", now, line)
        } else {
            writeln!(writer, "{}", line)
        };
        let _ = writer.flush();
    }
}

/// One message as seen by a [`MemorySink`]
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub level: Level,
    pub namespace: String,
    pub parts: Vec<LogValue>,
}

impl Record {
    /// The line [`ConsoleSink`] would have printed
    pub fn render(&self) -> String {
        render_line(self.level, &self.namespace, &self.parts)
    }
}

/// Keeps every delivered message in memory
///
/// Clones share the same storage, so a clone can be installed as the
/// registry's sink while the original is kept for inspection.
///
/// ```
/// use nslog_core::{Level, LogValue, MemorySink, Registry};
///
/// let registry = Registry::new();
/// let sink = MemorySink::new();
/// registry.set_sink(sink.clone());
///
/// registry.dispatch("app", Level::Info, &[LogValue::from("hello")]);
/// assert_eq!(sink.lines(), vec!["[INFO] [app] hello".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<Record>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every record, oldest first
    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rendered form of every record
    pub fn lines(&self) -> Vec<String> {
        self.records().iter().map(Record::render).collect()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove and return every record
    pub fn drain(&self) -> Vec<Record> {
        std::mem::take(&mut *self.records.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Sink for MemorySink {
    fn write(&self, level: Level, namespace: &str, parts: &[LogValue]) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Record {
                level,
                namespace: namespace.to_string(),
                parts: parts.to_vec(),
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_line_prefix_only() {
        assert_eq!(render_line(Level::Warn, "ns", &[]), "[WARN] [ns]");
    }

    #[test]
    fn test_render_line_structured_part() {
        let line = render_line(
            Level::Info,
            "test",
            &[LogValue::from("test"), LogValue::from(json!({"foo": "bar"}))],
        );
        assert_eq!(line, "[INFO] [test] test {\n  \"foo\": \"bar\"\n}");
    }

    #[test]
    fn test_closure_is_a_sink() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_in_sink = seen.clone();
        let sink = move |level: Level, ns: &str, parts: &[LogValue]| {
            seen_in_sink
                .lock()
                .unwrap()
                .push((level, ns.to_string(), parts.len()));
        };

        Sink::write(&sink, Level::Error, "a", &[LogValue::Null, LogValue::Null]);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![(Level::Error, "a".to_string(), 2)]
        );
    }

    #[test]
    fn test_writer_sink_plain() {
        let sink = WriterSink::new(Vec::new());
        sink.write(Level::Info, "app", &[LogValue::from("one")]);
        sink.write(Level::Error, "app", &[LogValue::from(2)]);
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "[INFO] [app] one\n[ERROR] [app] 2\n");
    }

    #[test]
    fn test_writer_sink_timestamps() {
        let sink = WriterSink::new(Vec::new()).with_timestamps(true);
        sink.write(Level::Info, "app", &[LogValue::from("x")]);
        let out = String::from_utf8(sink.into_inner()).unwrap();
        let (stamp, rest) = out.split_once(' ').unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
        assert_eq!(rest, "[INFO] [app] x\n");
    }

    #[test]
    fn test_memory_sink_shares_storage_between_clones() {
        let sink = MemorySink::new();
        let installed = sink.clone();
        installed.write(Level::Trace, "a", &[LogValue::from("t")]);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.records()[0].namespace, "a");

        let drained = sink.drain();
        assert_eq!(drained.len(), 1);
        assert!(installed.is_empty());
    }
}

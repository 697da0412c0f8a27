use std::collections::VecDeque;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use tracing_appender::rolling;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Log file prefix used by the daily rolling appender.
const LOG_FILE_PREFIX: &str = "meadow.log";

const MAX_CONSOLE_LINES: usize = 500;
const LOG_RETENTION_DAYS: u64 = 7;

/// Severity of a captured log line, as shown in the console overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<tracing::Level> for LogLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => LogLevel::Trace,
            tracing::Level::DEBUG => LogLevel::Debug,
            tracing::Level::INFO => LogLevel::Info,
            tracing::Level::WARN => LogLevel::Warn,
            tracing::Level::ERROR => LogLevel::Error,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// One captured log line.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub target: String,
    pub message: String,
}

/// Ring buffer shared between the tracing layer and the console.
pub type LogBuffer = Arc<Mutex<VecDeque<LogEntry>>>;

pub fn new_log_buffer(capacity: usize) -> LogBuffer {
    Arc::new(Mutex::new(VecDeque::with_capacity(capacity)))
}

/// Push into a capped buffer, evicting the oldest line when full.
fn push_capped(buf: &mut VecDeque<LogEntry>, entry: LogEntry, cap: usize) {
    while buf.len() >= cap.max(1) {
        buf.pop_front();
    }
    buf.push_back(entry);
}

/// Directory for rolling log files.
///
/// `MEADOW_LOG_DIR` wins; otherwise `<data dir>/meadow/logs`, falling back to
/// `./logs` when the platform has no data directory.
pub fn log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MEADOW_LOG_DIR") {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .map(|data| data.join("meadow").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Delete rolled log files older than `max_age`. Returns how many were removed.
///
/// Only files carrying the meadow log prefix are considered, so a shared
/// directory is left alone.
fn cleanup_old_logs(dir: &Path, max_age: Duration) -> usize {
    let Some(cutoff) = SystemTime::now().checked_sub(max_age) else {
        return 0;
    };
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };

    let mut removed = 0;
    for entry in entries.flatten() {
        if !entry.file_name().to_string_lossy().starts_with(LOG_FILE_PREFIX) {
            continue;
        }
        let stale = entry
            .metadata()
            .and_then(|meta| meta.modified())
            .map(|modified| modified <= cutoff)
            .unwrap_or(false);
        if stale && std::fs::remove_file(entry.path()).is_ok() {
            removed += 1;
        }
    }
    removed
}

/// Tracing layer feeding the console ring buffer.
struct ConsoleLayer {
    buffer: LogBuffer,
    capacity: usize,
}

impl<S: tracing::Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut fields = FieldCollector::default();
        event.record(&mut fields);

        let entry = LogEntry {
            level: (*event.metadata().level()).into(),
            target: event.metadata().target().to_string(),
            message: fields.into_message(),
        };

        if let Ok(mut buf) = self.buffer.lock() {
            push_capped(&mut buf, entry, self.capacity);
        }
    }
}

/// Flattens an event's fields into `message key=value ...`.
#[derive(Default)]
struct FieldCollector {
    message: Option<String>,
    extras: Vec<String>,
}

impl FieldCollector {
    fn push(&mut self, name: &str, rendered: String) {
        if name == "message" {
            self.message = Some(rendered);
        } else {
            self.extras.push(format!("{name}={rendered}"));
        }
    }

    fn into_message(self) -> String {
        let mut parts = Vec::with_capacity(self.extras.len() + 1);
        parts.extend(self.message);
        parts.extend(self.extras);
        parts.join(" ")
    }
}

impl tracing::field::Visit for FieldCollector {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        self.push(field.name(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.push(field.name(), value.to_string());
    }
}

/// Install the global subscriber and return the console buffer.
///
/// Filter: `MEADOW_LOG`, then `RUST_LOG`, default `info`. Files roll daily
/// in [`log_dir`] and are kept for a week. Nothing is written to stdout,
/// which belongs to the terminal UI.
pub fn init() -> LogBuffer {
    let buffer = new_log_buffer(MAX_CONSOLE_LINES);

    let filter = EnvFilter::try_from_env("MEADOW_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let dir = log_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("warning: cannot create log directory {}: {e}", dir.display());
    }
    cleanup_old_logs(&dir, Duration::from_secs(LOG_RETENTION_DAYS * 86_400));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(rolling::daily(&dir, LOG_FILE_PREFIX))
        .with_ansi(false)
        .with_target(true);

    let console_layer = ConsoleLayer {
        buffer: buffer.clone(),
        capacity: MAX_CONSOLE_LINES,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn entry(msg: &str) -> LogEntry {
        LogEntry {
            level: LogLevel::Info,
            target: "test".into(),
            message: msg.into(),
        }
    }

    #[test]
    fn log_dir_honours_env_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        let original = std::env::var("MEADOW_LOG_DIR").ok();

        std::env::set_var("MEADOW_LOG_DIR", "/tmp/meadow-test-logs");
        assert_eq!(log_dir(), PathBuf::from("/tmp/meadow-test-logs"));

        match original {
            Some(v) => std::env::set_var("MEADOW_LOG_DIR", v),
            None => std::env::remove_var("MEADOW_LOG_DIR"),
        }
    }

    #[test]
    fn log_dir_default_ends_in_logs() {
        let _guard = ENV_LOCK.lock().unwrap();
        let original = std::env::var("MEADOW_LOG_DIR").ok();

        std::env::remove_var("MEADOW_LOG_DIR");
        assert!(log_dir().ends_with("logs"));

        if let Some(v) = original {
            std::env::set_var("MEADOW_LOG_DIR", v);
        }
    }

    #[test]
    fn push_capped_evicts_oldest() {
        let mut buf = VecDeque::new();
        for i in 0..5 {
            push_capped(&mut buf, entry(&format!("line {i}")), 3);
        }
        let messages: Vec<_> = buf.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn level_converts_from_tracing() {
        assert_eq!(LogLevel::from(tracing::Level::WARN), LogLevel::Warn);
        assert_eq!(LogLevel::from(tracing::Level::TRACE), LogLevel::Trace);
        assert!(LogLevel::Error > LogLevel::Info);
        assert_eq!(LogLevel::Debug.to_string(), "DEBUG");
    }

    #[test]
    fn collector_puts_message_first() {
        let mut c = FieldCollector::default();
        c.push("agent", "3".into());
        c.push("message", "forced reversal".into());
        c.push("x", "12.5".into());
        assert_eq!(c.into_message(), "forced reversal agent=3 x=12.5");
    }

    #[test]
    fn collector_without_message() {
        let mut c = FieldCollector::default();
        c.push("a", "1".into());
        assert_eq!(c.into_message(), "a=1");
        assert_eq!(FieldCollector::default().into_message(), "");
    }

    #[test]
    fn cleanup_only_touches_meadow_logs() {
        let tmp = std::env::temp_dir().join("meadow-test-log-cleanup");
        let _ = std::fs::create_dir_all(&tmp);

        let rolled = tmp.join("meadow.log.2025-01-01");
        let other = tmp.join("notes.txt");
        std::fs::write(&rolled, "a").unwrap();
        std::fs::write(&other, "b").unwrap();

        let removed = cleanup_old_logs(&tmp, Duration::ZERO);
        assert_eq!(removed, 1);
        assert!(!rolled.exists());
        assert!(other.exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }
}

//! File-backed debug logging.
//!
//! The TUI owns the terminal, so diagnostics go to a rotating log file in
//! the temp dir instead of stdout. Logging is off unless `--logs` is given,
//! and `--no-logs` wins over everything. A separate tracing subscriber
//! writes structured JSON events to its own file when logging is on.

use crate::config::AppConfig;
use std::{
    env, fs,
    io::Write,
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, OnceLock,
    },
    time::{SystemTime, UNIX_EPOCH},
};
use tracing_subscriber::fmt::time::UtcTime;

const LOG_MAX_BYTES: u64 = 5 * 1024 * 1024;
static LOG_ENABLED: AtomicBool = AtomicBool::new(false);
static LOG_WRITER: OnceLock<Mutex<Option<LogWriter>>> = OnceLock::new();
static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Path to the temp log file we rotate between runs.
pub fn log_file_path() -> PathBuf {
    env::temp_dir().join("noisefit_tui.log")
}

/// Path to the structured tracing log (JSON lines).
pub fn trace_log_path() -> PathBuf {
    env::var("NOISEFIT_TRACE_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir().join("noisefit_trace.jsonl"))
}

struct LogWriter {
    path: PathBuf,
    file: fs::File,
    bytes_written: u64,
}

impl LogWriter {
    fn open(path: PathBuf) -> Option<Self> {
        let mut bytes_written = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        if bytes_written > LOG_MAX_BYTES {
            let _ = fs::remove_file(&path);
            bytes_written = 0;
        }
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .ok()?;
        Some(Self {
            path,
            file,
            bytes_written,
        })
    }

    fn rotate_if_needed(&mut self, next_len: usize) {
        if self.bytes_written.saturating_add(next_len as u64) <= LOG_MAX_BYTES {
            return;
        }
        if let Ok(file) = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)
        {
            self.file = file;
            self.bytes_written = 0;
        }
    }

    fn write_line(&mut self, line: &str) {
        self.rotate_if_needed(line.len());
        if self.file.write_all(line.as_bytes()).is_ok() {
            self.bytes_written = self.bytes_written.saturating_add(line.len() as u64);
        }
    }
}

/// Enable or disable the debug log according to the CLI flags.
pub fn init_logging(config: &AppConfig) {
    let enabled = config.logs && !config.no_logs;
    LOG_ENABLED.store(enabled, Ordering::Relaxed);
    if enabled {
        let writer = LOG_WRITER.get_or_init(|| Mutex::new(None));
        if let Ok(mut slot) = writer.lock() {
            if slot.is_none() {
                *slot = LogWriter::open(log_file_path());
            }
        }
    }
}

/// Append one timestamped line to the debug log. No-op when logging is off.
pub fn log_debug(message: &str) {
    if !LOG_ENABLED.load(Ordering::Relaxed) {
        return;
    }
    let Some(writer) = LOG_WRITER.get() else {
        return;
    };
    if let Ok(mut slot) = writer.lock() {
        if let Some(writer) = slot.as_mut() {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default();
            let line = format!("[{}.{:03}] {message}\n", now.as_secs(), now.subsec_millis());
            writer.write_line(&line);
        }
    }
}

/// Install a JSON tracing subscriber writing to the trace file. Safe to call
/// more than once; only the first call takes effect.
pub fn init_tracing(config: &AppConfig) {
    if !config.logs || config.no_logs {
        return;
    }
    let _ = TRACING_INIT.get_or_init(|| {
        let path = trace_log_path();
        let file = match fs::OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => file,
            Err(_) => return,
        };
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_timer(UtcTime::rfc_3339())
            .with_writer(file)
            .with_current_span(false)
            .with_span_list(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

#[cfg(test)]
pub(crate) fn set_logging_for_tests(enabled: bool) {
    LOG_ENABLED.store(enabled, Ordering::Relaxed);
    if enabled {
        let writer = LOG_WRITER.get_or_init(|| Mutex::new(None));
        if let Ok(mut slot) = writer.lock() {
            if slot.is_none() {
                *slot = LogWriter::open(log_file_path());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_debug_is_a_noop_when_disabled() {
        set_logging_for_tests(false);
        // Must not panic or create state.
        log_debug("disabled message");
    }

    #[test]
    fn log_paths_live_in_temp_dir() {
        assert!(log_file_path().starts_with(env::temp_dir()));
    }
}

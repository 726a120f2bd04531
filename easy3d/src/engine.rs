/// Easy3D Engine - owner of the process-wide log sink
///
/// Scenes hold all of their own state; the only thing shared across scenes
/// is where diagnostics go. The sink starts as a `DefaultLogger` and can be
/// replaced at any time (tests capture entries this way).

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::default())))
}

/// Log sink owner
///
/// # Example
///
/// ```no_run
/// use easy3d::easy3d::{Engine, log::{Logger, LogEntry}};
///
/// struct SilentLogger;
/// impl Logger for SilentLogger {
///     fn log(&self, _entry: &LogEntry) {}
/// }
///
/// Engine::set_logger(SilentLogger);
/// ```
pub struct Engine;

impl Engine {
    /// Set a custom logger
    ///
    /// Replace the current logger with a custom implementation (file logger,
    /// in-game console, test capture, ...).
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger, INFO and above)
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(DefaultLogger::default());
        }
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    ///
    /// # Arguments
    ///
    /// * `severity` - Log severity level
    /// * `source` - Source component (e.g., "easy3d::Scene")
    /// * `message` - Log message
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: None,
            line: None,
        });
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by engine_error! (and therefore engine_err!/engine_bail!).
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: Some(file),
            line: Some(line),
        });
    }

    fn dispatch(entry: LogEntry) {
        // A poisoned sink drops the entry; logging never takes the frame down.
        if let Ok(lock) = logger_lock().read() {
            lock.log(&entry);
        }
    }
}

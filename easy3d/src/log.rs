//! Log sink for Easy3D
//!
//! Every reported failure (unknown object, malformed geometry, shader
//! compile error, ...) flows through here. The sink is swappable:
//! - Customizable logger via Logger trait
//! - Severity levels (Trace, Debug, Info, Warn, Error)
//! - Colored console output by default
//! - File and line information for ERROR entries

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// Implement this trait to create custom loggers (file logging, network logging, etc.)
///
/// # Example
///
/// ```no_run
/// use easy3d::easy3d::log::{Logger, LogEntry};
///
/// struct StderrLogger;
///
/// impl Logger for StderrLogger {
///     fn log(&self, entry: &LogEntry) {
///         eprintln!("[{}] {}", entry.source, entry.message);
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    ///
    /// # Arguments
    ///
    /// * `entry` - The log entry to process
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level (Trace, Debug, Info, Warn, Error)
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source component (e.g., "easy3d::Scene", "easy3d::ObjectRegistry")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for detailed ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for detailed ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-draw details (draw order, bound buffers)
    Trace,

    /// Object lifecycle details (buffer allocation and release)
    Debug,

    /// Scene-level events (program rebuilt, scene destroyed)
    Info,

    /// Recoverable misuse (deleting an unknown object)
    Warn,

    /// Reported failures, always with file:line
    Error,
}

impl LogSeverity {
    /// Fixed-width label used by the console logger
    pub fn label(&self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }
}

/// Default logger implementation using colored console output
///
/// Entries below `min_severity` are dropped. The renderer emits a TRACE
/// entry every frame, so the default threshold is `Info`.
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message` on stdout
/// - Error: `[timestamp] [ERROR] [source] message (file:line)` on stderr
#[derive(Debug, Clone, Copy)]
pub struct DefaultLogger {
    min_severity: LogSeverity,
}

impl DefaultLogger {
    /// Create a console logger that prints entries at or above `min_severity`
    pub fn with_min_severity(min_severity: LogSeverity) -> Self {
        Self { min_severity }
    }

    /// Lowest severity that gets printed
    pub fn min_severity(&self) -> LogSeverity {
        self.min_severity
    }

    /// Whether an entry of this severity would be printed
    pub fn accepts(&self, severity: LogSeverity) -> bool {
        severity >= self.min_severity
    }
}

impl Default for DefaultLogger {
    fn default() -> Self {
        Self::with_min_severity(LogSeverity::Info)
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        if !self.accepts(entry.severity) {
            return;
        }

        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let label = entry.severity.label();
        let severity_str = match entry.severity {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        };
        let source = entry.source.bright_blue();

        match (entry.file, entry.line) {
            (Some(file), Some(line)) => eprintln!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp, severity_str, source, entry.message, file, line
            ),
            _ => println!(
                "[{}] [{}] [{}] {}",
                timestamp, severity_str, source, entry.message
            ),
        }
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message (very verbose, typically disabled)
///
/// # Example
///
/// ```text
/// engine_trace!("easy3d::Renderer", "Drawing object {}", id);
/// ```
#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::easy3d::Engine::log(
            $crate::easy3d::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message (development information)
///
/// # Example
///
/// ```text
/// engine_debug!("easy3d::ObjectRegistry", "Allocated {} buffers", count);
/// ```
#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::easy3d::Engine::log(
            $crate::easy3d::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message (important events)
///
/// # Example
///
/// ```text
/// engine_info!("easy3d::Scene", "Lighting program rebuilt");
/// ```
#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::easy3d::Engine::log(
            $crate::easy3d::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message (potential issues)
///
/// # Example
///
/// ```text
/// engine_warn!("easy3d::ObjectRegistry", "Object {} does not exist", id);
/// ```
#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::easy3d::Engine::log(
            $crate::easy3d::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
///
/// # Example
///
/// ```text
/// engine_error!("easy3d::Scene", "Program link failed: {}", log);
/// ```
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::easy3d::Engine::log_detailed(
            $crate::easy3d::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;

/// Magnum Engine - Global diagnostics facade
///
/// Scene graphs and math values are plain owned data, so the only process-wide
/// state is the logger and its severity threshold. Both live in thread-safe
/// static storage guarded by RwLock.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Minimum severity forwarded to the logger
static LOG_LEVEL: OnceLock<RwLock<LogSeverity>> = OnceLock::new();

/// Severity threshold used until [`Engine::set_log_level`] is called
pub const DEFAULT_LOG_LEVEL: LogSeverity = LogSeverity::Info;

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

fn level_lock() -> &'static RwLock<LogSeverity> {
    LOG_LEVEL.get_or_init(|| RwLock::new(DEFAULT_LOG_LEVEL))
}

// ===== PUBLIC API =====

/// Engine-wide diagnostics manager
///
/// Every precondition violation, rejected operation and structural event in
/// the math and scene graph modules is reported through this facade.
///
/// # Example
///
/// ```no_run
/// use magnum_engine::magnum::{Engine, log::LogSeverity};
///
/// // Show structural events (object/feature/group creation) too
/// Engine::set_log_level(LogSeverity::Trace);
///
/// // ... build scenes ...
///
/// Engine::reset_logger();
/// ```
pub struct Engine;

impl Engine {
    // ===== LOGGING API =====

    /// Set a custom logger
    ///
    /// Replace the default logger with a custom implementation (file logger,
    /// test capture, etc.)
    ///
    /// # Arguments
    ///
    /// * `logger` - Any type implementing the Logger trait
    ///
    /// # Example
    ///
    /// ```no_run
    /// use magnum_engine::magnum::{Engine, log::{Logger, LogEntry}};
    ///
    /// struct FileLogger;
    /// impl Logger for FileLogger {
    ///     fn log(&self, entry: &LogEntry) {
    ///         // Write to file...
    ///     }
    /// }
    ///
    /// Engine::set_logger(FileLogger);
    /// ```
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger) and the threshold to
    /// [`DEFAULT_LOG_LEVEL`]
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(DefaultLogger);
        }
        Self::set_log_level(DEFAULT_LOG_LEVEL);
    }

    /// Set the minimum severity forwarded to the logger
    ///
    /// Entries below `level` are dropped before reaching the logger.
    pub fn set_log_level(level: LogSeverity) {
        if let Ok(mut lock) = level_lock().write() {
            *lock = level;
        }
    }

    /// Current minimum severity
    pub fn log_level() -> LogSeverity {
        level_lock().read().map(|level| *level).unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Whether an entry of `severity` would reach the logger
    pub fn is_enabled(severity: LogSeverity) -> bool {
        severity >= Self::log_level()
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    ///
    /// # Arguments
    ///
    /// * `severity` - Log severity level
    /// * `source` - Source module (e.g., "magnum::SceneGraph")
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
    /// Used by engine_error! macro to include source location.
    ///
    /// # Arguments
    ///
    /// * `severity` - Log severity level (typically Error)
    /// * `source` - Source module (e.g., "magnum::Math")
    /// * `message` - Log message
    /// * `file` - Source file path
    /// * `line` - Source line number
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
        if !Self::is_enabled(entry.severity) {
            return;
        }
        if let Ok(lock) = logger_lock().read() {
            lock.log(&entry);
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;

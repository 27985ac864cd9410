//! # duallog
//! Thread-safe logger writing every line to the console, in color, and to an
//! optional log file bracketed by session markers.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! duallog = "0.1.0"
//! ```
//!
//! ```rust
//! use duallog::Logger;
//!
//! let logger = Logger::new("main");
//! logger.log_message("Hello, world!");
//! logger.log_success("Connected");
//! logger.log_warning("Disk almost full");
//! logger.log_error("Connection lost"); // flushed before returning
//! ```
//!
//! ## Sharing the console between loggers
//! Loggers built from the same [`ConsoleLock`] never interleave their console lines.
//! ```rust
//! use duallog::{ConsoleLock, Logger};
//!
//! let console = ConsoleLock::shared();
//! let handles: Vec<_> = ["net", "disk"].into_iter().map(|name| {
//!     let logger = Logger::with_shared_console(name, console.clone());
//!     std::thread::spawn(move || {
//!         for i in 0..5 {
//!             logger.log_message(&format!("tick {i}"));
//!         }
//!     })
//! }).collect();
//! for h in handles { h.join().unwrap(); }
//! ```
//!
//! ## Logging to files
//! The log file is created if it does not exist and appended to if it does.
//! Missing parent directories are created. Failures are reported on the console,
//! never returned.
//!
//! ```rust
//! use duallog::Logger;
//!
//! let path = std::env::temp_dir().join("duallog-doc").join("app.log");
//! let logger = Logger::new("main");
//! logger.enable_file_logging(&path);
//! logger.log_error("Hello, file!");
//! // error lines are on disk as soon as the call returns
//! assert!(std::fs::read_to_string(&path).unwrap().contains("Hello, file!"));
//! logger.disable_file_logging();
//! ```
//!
//! ## Colors
//! Colors are used only when stdout is an interactive terminal. Set
//! `DUALLOG_COLOR=always|never|auto` or call [`ConfigBuilder::with_color_mode`]
//! to override.
//! ```rust
//! use duallog::{ColorMode, ConsoleTarget, logger_config};
//!
//! let (console, captured) = ConsoleTarget::memory();
//! let logger = logger_config()
//!     .with_name("net")
//!     .with_console(console)
//!     .with_color_mode(ColorMode::Always)
//!     .build();
//! logger.log_warning("disk low");
//! assert!(captured.contents().starts_with("\x1B[33m["));
//! ```
//!
//! ## `log` facade
//! ```rust
//! use std::sync::Arc;
//!
//! duallog::install(Arc::new(duallog::Logger::new("app"))).unwrap();
//! log::warn!("routed through duallog");
//! ```

mod color;
mod config;
mod console;
mod error;
mod log_writer;
mod severity;
mod utils;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::{LevelFilter, Log, SetLoggerError};

pub use color::{AnsiColorizer, ColorFlags, PlainColorizer, TerminalColorizer};
pub use config::ColorMode;
pub use console::{ConsoleLock, ConsoleTarget, MemoryConsole};
pub use severity::Severity;
pub use utils::{format_log, timestamp};

use config::DUALLOG_CONFIG;
use console::{ConsoleLockRef, ConsoleSink};
use log_writer::FileSink;

/// A named logger driving a console sink and an optional file sink.
///
/// Every method takes `&self`; share the logger across threads with an `Arc`.
/// Dropping it closes the log file with a footer.
pub struct Logger {
    name: String,
    console: ConsoleSink,
    file: FileSink,
}

impl Logger {
    /// Logger with its own console lock, writing to stdout.
    pub fn new(name: &str) -> Self {
        logger_config().with_name(name).build()
    }

    /// Logger serializing its console output with every other holder of `lock`.
    pub fn with_shared_console(name: &str, lock: Arc<ConsoleLock>) -> Self {
        logger_config()
            .with_name(name)
            .with_console_lock(lock)
            .build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Starts a session in `path`, closing the current one with a switching marker.
    /// Success or failure is announced on the console.
    pub fn enable_file_logging<P: AsRef<Path>>(&self, path: P) {
        let path = path.as_ref();
        // The file lock is released before notifying.
        match self.file.enable(path, &self.name) {
            Ok(()) => self.notify(
                Severity::Message,
                &format!("File logging enabled: {}", path.display()),
            ),
            Err(err) => self.notify(
                Severity::Error,
                &format!("Failed to open log file: {} ({err})", path.display()),
            ),
        }
    }

    /// Ends the current session with a footer. No-op when file logging is off.
    pub fn disable_file_logging(&self) {
        if self.file.disable() {
            self.notify(Severity::Message, "File logging disabled");
        }
    }

    pub fn is_file_logging(&self) -> bool {
        self.file.path().is_some()
    }

    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.file.path()
    }

    pub fn colors_enabled(&self) -> bool {
        self.console.colors_enabled()
    }

    pub fn shares_console_lock(&self) -> bool {
        self.console.is_shared()
    }

    /// Writes one line tagged with `severity` to both sinks.
    pub fn emit(&self, severity: Severity, message: &str) {
        let line = format_log(message, severity.prefix(), &self.name);
        self.console.write(&line, severity.color());
        self.file.write(&line, severity);
    }

    pub fn log_message(&self, message: &str) {
        self.emit(Severity::Message, message);
    }

    pub fn log_success(&self, message: &str) {
        self.emit(Severity::Success, message);
    }

    pub fn log_warning(&self, message: &str) {
        self.emit(Severity::Warning, message);
    }

    /// Like the other severities, but both streams are flushed before returning.
    pub fn log_error(&self, message: &str) {
        self.emit(Severity::Error, message);
        self.console.flush();
        self.file.flush();
    }

    fn notify(&self, severity: Severity, message: &str) {
        let line = format_log(message, severity.prefix(), &self.name);
        self.console.write(&line, severity.color());
    }
}

impl Log for Logger {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        let message = record.args().to_string();
        match Severity::from(record.level()) {
            Severity::Error => self.log_error(&message),
            severity => self.emit(severity, &message),
        }
    }

    fn flush(&self) {
        self.console.flush();
        self.file.flush();
    }
}

/// Global `log` backend wrapping a shared logger.
struct GlobalLogger(Arc<Logger>);

impl Log for GlobalLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.0.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        self.0.log(record)
    }

    fn flush(&self) {
        Log::flush(self.0.as_ref())
    }
}

/// Routes the `log` macros to `logger`. Every record is forwarded; there is no
/// level filtering. Fails if a global logger is already set.
pub fn install(logger: Arc<Logger>) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(GlobalLogger(logger)))?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

/// Builder for configuring and constructing a [`Logger`].
pub struct ConfigBuilder {
    name: String,
    console_lock: Option<Arc<ConsoleLock>>,
    console: ConsoleTarget,
    color_mode: Option<ColorMode>,
    log_file: Option<PathBuf>,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            name: "main".into(),
            console_lock: None,
            console: ConsoleTarget::Stdout,
            color_mode: None,
            log_file: None,
        }
    }
}

impl ConfigBuilder {
    /// Sets the logger name
    pub fn with_name(self, name: &str) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }
    /// Shares a console lock instead of owning one.
    pub fn with_console_lock(self, lock: Arc<ConsoleLock>) -> Self {
        Self {
            console_lock: Some(lock),
            ..self
        }
    }
    /// Sets the console stream (stdout by default).
    pub fn with_console(self, console: ConsoleTarget) -> Self {
        Self { console, ..self }
    }
    /// Overrides `DUALLOG_COLOR`.
    pub fn with_color_mode(self, mode: ColorMode) -> Self {
        Self {
            color_mode: Some(mode),
            ..self
        }
    }
    /// Enables file logging right after construction.
    pub fn with_log_file<P: AsRef<Path>>(self, path: P) -> Self {
        Self {
            log_file: Some(path.as_ref().to_path_buf()),
            ..self
        }
    }
    /// Maybe enables file logging
    pub fn maybe_with_log_file<P: AsRef<Path>>(self, path: Option<P>) -> Self {
        Self {
            log_file: path.map(|p| p.as_ref().to_path_buf()),
            ..self
        }
    }

    #[must_use]
    pub fn build(self) -> Logger {
        let Self {
            name,
            console_lock,
            console,
            color_mode,
            log_file,
        } = self;
        let lock = match console_lock {
            Some(lock) => ConsoleLockRef::Shared(lock),
            None => ConsoleLockRef::Owned(ConsoleLock::new()),
        };
        let mode = color_mode.unwrap_or_else(|| DUALLOG_CONFIG.color_mode());
        let logger = Logger {
            name,
            console: ConsoleSink::new(lock, console, mode),
            file: FileSink::default(),
        };
        if let Some(path) = log_file {
            logger.enable_file_logging(path);
        }
        logger
    }
}

/// Returns a default ConfigBuilder for configuring a logger.
pub fn logger_config() -> ConfigBuilder {
    ConfigBuilder::default()
}

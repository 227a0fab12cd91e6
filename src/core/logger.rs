//! Named logger implementation

use super::{
    appender::Destination,
    log_level::LogLevel,
    policy::{FatalAction, LevelPolicy},
};
use crate::appenders::ConsoleAppender;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// A handle bound to a name and a destination.
///
/// The logger keeps no filtering state of its own: every call asks the shared
/// [`LevelPolicy`] whether its name may emit at the given level.
///
/// Emitted lines look like `<metadata><TAG> [<name>] <message>`; the
/// `[<name>] ` segment is left out for an unnamed logger.
///
/// # Example
///
/// ```
/// use leveled_logger::prelude::*;
/// use std::sync::Arc;
///
/// let policy = LevelPolicy::builder().format_flags(FormatFlags::none()).build();
/// let memory = MemoryAppender::new();
/// let logger = policy.logger_with("", Arc::new(memory.clone()));
///
/// logger.verbose("hidden");
/// logger.debug(format_args!("x={}", 5));
/// assert_eq!(memory.contents(), "D x=5\n");
/// ```
#[derive(Clone)]
pub struct NamedLogger {
    policy: Arc<LevelPolicy>,
    name: String,
    destination: Destination,
}

impl NamedLogger {
    /// Bind a logger to `name`; writes go to standard error when no
    /// destination is given.
    pub fn new(
        policy: Arc<LevelPolicy>,
        name: impl Into<String>,
        destination: Option<Destination>,
    ) -> Self {
        Self {
            policy,
            name: name.into(),
            destination: destination.unwrap_or_else(|| Arc::new(ConsoleAppender::stderr())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> &Arc<LevelPolicy> {
        &self.policy
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    /// Whether a message at `level` would currently be written
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.policy.is_loggable(&self.name, level)
    }

    /// Log at `level`. A FATAL message terminates per the policy's
    /// [`FatalAction`] after it is written.
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl fmt::Display) {
        if let Some(rendered) = self.emit(Location::caller(), level, message) {
            if level == LogLevel::Fatal {
                self.terminate(rendered);
            }
        }
    }

    /// Log with a numeric level code (1 = VERBOSE .. 6 = FATAL).
    ///
    /// Unknown codes are filtered like any other: code 0 is below every
    /// threshold and does nothing, codes above 6 pass every threshold.
    ///
    /// # Panics
    ///
    /// Panics with "unsupported log level N" when an unknown code passes
    /// the threshold.
    #[track_caller]
    pub fn log_raw(&self, code: u8, message: impl fmt::Display) {
        match LogLevel::try_from(code) {
            Ok(level) => self.log(level, message),
            Err(e) => {
                if code < self.policy.threshold_for(&self.name) as u8 {
                    self.policy.metrics().record_suppressed();
                    return;
                }
                panic!("{}", e)
            }
        }
    }

    #[track_caller]
    pub fn verbose(&self, message: impl fmt::Display) {
        self.emit(Location::caller(), LogLevel::Verbose, message);
    }

    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.emit(Location::caller(), LogLevel::Debug, message);
    }

    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.emit(Location::caller(), LogLevel::Info, message);
    }

    #[track_caller]
    pub fn warning(&self, message: impl fmt::Display) {
        self.emit(Location::caller(), LogLevel::Warning, message);
    }

    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.emit(Location::caller(), LogLevel::Error, message);
    }

    /// Write the message, then terminate per the policy's [`FatalAction`].
    ///
    /// With the default [`FatalAction::Panic`] the panic payload is the
    /// rendered message, including the `[name] ` prefix.
    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display) -> ! {
        // No threshold can exceed FATAL, so the line is always written.
        let rendered = self
            .emit(Location::caller(), LogLevel::Fatal, message)
            .unwrap_or_default();
        self.terminate(rendered)
    }

    pub fn flush(&self) {
        if let Err(e) = self.destination.flush() {
            eprintln!(
                "[LOGGER ERROR] Appender '{}' flush failed: {}",
                self.destination.name(),
                e
            );
        }
    }

    /// Filter, render and write one message. Returns the rendered message
    /// (without metadata or tag) when a line was produced.
    fn emit(
        &self,
        location: &Location<'_>,
        level: LogLevel,
        message: impl fmt::Display,
    ) -> Option<String> {
        if !self.policy.is_loggable(&self.name, level) {
            self.policy.metrics().record_suppressed();
            return None;
        }

        let rendered = if self.name.is_empty() {
            message.to_string()
        } else {
            format!("[{}] {}", self.name, message)
        };

        let line = self.policy.format_line(
            location,
            level,
            &rendered,
            self.destination.supports_color(),
        );
        match self.destination.write_line(&line) {
            Ok(()) => {
                self.policy.metrics().record_emitted();
            }
            Err(e) => {
                self.policy.metrics().record_write_failure();
                eprintln!(
                    "[LOGGER ERROR] Appender '{}' failed: {}",
                    self.destination.name(),
                    e
                );
            }
        }

        Some(rendered)
    }

    #[track_caller]
    fn terminate(&self, rendered: String) -> ! {
        self.policy.metrics().record_fatal();
        self.flush();

        match self.policy.fatal_action() {
            FatalAction::Panic => panic!("{}", rendered),
            FatalAction::Abort => std::process::abort(),
            FatalAction::Exit(code) => std::process::exit(code),
        }
    }
}

impl fmt::Debug for NamedLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedLogger")
            .field("name", &self.name)
            .field("destination", &self.destination.name())
            .finish()
    }
}

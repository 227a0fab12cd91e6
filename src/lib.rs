//! # Leveled Logger
//!
//! A minimal leveled logging facade: named loggers emit messages tagged with
//! a severity, filtered against a per-name or default threshold, and written
//! synchronously to a destination stream.
//!
//! ## Features
//!
//! - **Per-name thresholds**: quiet one component or debug another at runtime
//! - **Shared policy**: threshold changes reach existing logger handles at once
//! - **Caller locations**: file:line metadata points at the emitting call
//! - **Log-and-abort**: FATAL writes its line before terminating
//!
//! ```
//! use leveled_logger::prelude::*;
//! use leveled_logger::{error, info};
//! use std::sync::Arc;
//!
//! let policy = LevelPolicy::builder()
//!     .threshold("net", LogLevel::Warning)
//!     .format_flags(FormatFlags::none())
//!     .build();
//! let memory = MemoryAppender::new();
//! let logger = policy.logger_with("net", Arc::new(memory.clone()));
//!
//! info!(logger, "connecting to {}", "10.0.0.1");
//! error!(logger, "connection refused after {} attempts", 3);
//! assert_eq!(memory.contents(), "E [net] connection refused after 3 attempts\n");
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, MemoryAppender, WriterAppender};
    pub use crate::core::{
        Appender, Destination, FatalAction, FormatFlags, LevelPolicy, LevelPolicyBuilder,
        LocationStyle, LogLevel, LoggerError, LoggerMetrics, NamedLogger, PolicyConfig, Result,
        TimestampFormat,
    };
}

pub use crate::appenders::{ConsoleAppender, FileAppender, MemoryAppender, WriterAppender};
pub use crate::core::{
    Appender, Destination, Directives, FatalAction, FormatFlags, LevelPolicy, LevelPolicyBuilder,
    LocationStyle, LogLevel, LoggerError, LoggerMetrics, NamedLogger, PolicyConfig, Result,
    TimestampFormat, DEFAULT_ENV_VAR,
};

/// Set the threshold for `name` on the process-wide policy.
pub fn set_threshold(name: impl Into<String>, level: LogLevel) {
    LevelPolicy::global().set_threshold(name, level);
}

/// Set the default threshold on the process-wide policy.
pub fn set_default_threshold(level: LogLevel) {
    LevelPolicy::global().set_default_threshold(level);
}

/// Replace the format flags of the process-wide policy.
pub fn set_format_flags(flags: FormatFlags) {
    LevelPolicy::global().set_format_flags(flags);
}

/// Create a logger bound to the process-wide policy; standard error is used
/// when `destination` is `None`.
pub fn new_logger(name: impl Into<String>, destination: Option<Destination>) -> NamedLogger {
    NamedLogger::new(std::sync::Arc::clone(LevelPolicy::global()), name, destination)
}

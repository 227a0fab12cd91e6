//! Logging macros for ergonomic log message formatting.
//!
//! Each macro forwards its arguments through `format_args!`, so the message
//! is only rendered when the logger's threshold lets it through. Positional
//! `{}` placeholders take the place of printf verbs: `%d`, `%s` and `%v`
//! become `{}`, `%x` becomes `{:x}`, `%5d` becomes `{:5}` and `%.2f`
//! becomes `{:.2}`.
//!
//! # Examples
//!
//! ```
//! use leveled_logger::prelude::*;
//! use leveled_logger::{debug, warning};
//! use std::sync::Arc;
//!
//! let policy = LevelPolicy::builder().format_flags(FormatFlags::none()).build();
//! let memory = MemoryAppender::new();
//! let logger = policy.logger_with("", Arc::new(memory.clone()));
//!
//! debug!(logger, "x={}", 5);
//! warning!(logger, "{:.2}% of quota used by {:>4}", 93.456, "job");
//! assert_eq!(memory.lines(), vec!["D x=5", "W 93.46% of quota used by  job"]);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = LevelPolicy::new().shared().logger("app");
/// use leveled_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format_args!($($arg)+))
    };
}

/// Log a verbose-level message.
#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($arg:tt)+) => {
        $logger.verbose(format_args!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = LevelPolicy::new().shared().logger("app");
/// use leveled_logger::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(format_args!($($arg)+))
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(format_args!($($arg)+))
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warning(format_args!($($arg)+))
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(format_args!($($arg)+))
    };
}

/// Log a fatal-level message and terminate.
///
/// # Examples
///
/// ```should_panic
/// # use leveled_logger::prelude::*;
/// # let logger = LevelPolicy::new().shared().logger("app");
/// use leveled_logger::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal(format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::appenders::MemoryAppender;
    use crate::core::{FormatFlags, LevelPolicy, LocationStyle, LogLevel, NamedLogger};
    use std::sync::Arc;

    fn logger() -> (NamedLogger, MemoryAppender) {
        let policy = LevelPolicy::builder()
            .default_threshold(LogLevel::Verbose)
            .format_flags(FormatFlags::none())
            .build();
        let memory = MemoryAppender::new();
        (policy.logger_with("m", Arc::new(memory.clone())), memory)
    }

    #[test]
    fn test_level_macros() {
        let (logger, memory) = logger();
        verbose!(logger, "v{}", 1);
        debug!(logger, "d{}", 2);
        info!(logger, "i{}", 3);
        warning!(logger, "w{}", 4);
        error!(logger, "e{}", 5);
        log!(logger, LogLevel::Info, "{}-{}", "a", "b");

        assert_eq!(
            memory.lines(),
            vec!["V [m] v1", "D [m] d2", "I [m] i3", "W [m] w4", "E [m] e5", "I [m] a-b"]
        );
    }

    #[test]
    fn test_positional_formatting() {
        let (logger, memory) = logger();
        info!(logger, "{1} before {0}", "second", "first");
        info!(logger, "{:x} {:5}| {:.2}", 255, 42, 1.0 / 3.0);
        assert_eq!(
            memory.lines(),
            vec!["I [m] first before second", "I [m] ff    42| 0.33"]
        );
    }

    #[test]
    fn test_macro_reports_invocation_site() {
        let policy = LevelPolicy::builder()
            .format_flags(FormatFlags::none().with_location(LocationStyle::Short))
            .build();
        let memory = MemoryAppender::new();
        let logger = policy.logger_with("", Arc::new(memory.clone()));

        let expected_line = line!() + 1;
        info!(logger, "at {}", "site");

        assert_eq!(memory.contents(), format!("macros.rs:{}: I at site\n", expected_line));
    }

    #[test]
    #[should_panic(expected = "[m] gave up after 3 tries")]
    fn test_fatal_macro() {
        let (logger, _memory) = logger();
        fatal!(logger, "gave up after {} tries", 3);
    }
}

//! Console appender implementation

use crate::core::{Appender, Result};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

/// Writes lines to the process's standard error or standard output.
///
/// Standard error is the default destination of every logger.
pub struct ConsoleAppender {
    stream: Stream,
}

impl ConsoleAppender {
    pub fn stderr() -> Self {
        Self {
            stream: Stream::Stderr,
        }
    }

    pub fn stdout() -> Self {
        Self {
            stream: Stream::Stdout,
        }
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::stderr()
    }
}

impl Appender for ConsoleAppender {
    fn write_line(&self, line: &str) -> Result<()> {
        // The std handles lock internally, so each line is written whole.
        match self.stream {
            Stream::Stderr => std::io::stderr().lock().write_all(line.as_bytes())?,
            Stream::Stdout => std::io::stdout().lock().write_all(line.as_bytes())?,
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        match self.stream {
            Stream::Stderr => std::io::stderr().flush()?,
            Stream::Stdout => std::io::stdout().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.stream {
            Stream::Stderr => "stderr",
            Stream::Stdout => "stdout",
        }
    }

    fn supports_color(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_stderr() {
        assert_eq!(ConsoleAppender::default().name(), "stderr");
        assert_eq!(ConsoleAppender::stdout().name(), "stdout");
    }

    #[test]
    fn test_console_supports_color() {
        assert!(ConsoleAppender::stderr().supports_color());
        assert!(ConsoleAppender::stdout().supports_color());
    }

    #[test]
    fn test_write_and_flush() {
        let appender = ConsoleAppender::stderr();
        appender.write_line("I console appender test\n").unwrap();
        appender.flush().unwrap();
    }
}

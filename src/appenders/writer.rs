//! Appender over an arbitrary `Write` implementation

use crate::core::{Appender, Result};
use parking_lot::Mutex;
use std::io::Write;

/// Wraps any writable stream, e.g. a socket or a pipe handed in by the caller.
pub struct WriterAppender<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterAppender<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the wrapped stream
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> Appender for WriterAppender<W> {
    fn write_line(&self, line: &str) -> Result<()> {
        self.writer.lock().write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "writer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoggerError;

    #[test]
    fn test_writes_through() {
        let appender = WriterAppender::new(Vec::new());
        appender.write_line("E one\n").unwrap();
        appender.write_line("F two\n").unwrap();
        appender.flush().unwrap();
        assert_eq!(appender.into_inner(), b"E one\nF two\n");
    }

    #[test]
    fn test_write_error_propagates() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let appender = WriterAppender::new(Broken);
        let err = appender.write_line("I lost\n").unwrap_err();
        assert!(matches!(err, LoggerError::IoError(_)));
    }
}

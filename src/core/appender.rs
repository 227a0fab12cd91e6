//! Appender trait for log output destinations

use super::error::Result;
use std::sync::Arc;

/// A destination stream for formatted lines.
///
/// Implementations serialize concurrent callers internally so each
/// `write_line` reaches the underlying stream as one uninterrupted write.
pub trait Appender: Send + Sync {
    fn write_line(&self, line: &str) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;

    /// Whether ANSI color codes may be written to this destination
    fn supports_color(&self) -> bool {
        false
    }
}

/// Shared handle to an appender; several loggers may write to one destination.
pub type Destination = Arc<dyn Appender>;

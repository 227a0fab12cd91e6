//! In-memory appender

use crate::core::{Appender, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Collects lines in a shared buffer.
///
/// Clones share the same buffer, so a test can hand one clone to a logger
/// and read the output through another.
///
/// # Example
///
/// ```
/// use leveled_logger::prelude::*;
/// use std::sync::Arc;
///
/// let policy = LevelPolicy::builder().format_flags(FormatFlags::none()).build();
/// let memory = MemoryAppender::new();
/// let logger = policy.logger_with("db", Arc::new(memory.clone()));
///
/// logger.info("connected");
/// assert_eq!(memory.contents(), "I [db] connected\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryAppender {
    buffer: Arc<Mutex<String>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        self.buffer.lock().clone()
    }

    /// Written lines without their trailing newline
    pub fn lines(&self) -> Vec<String> {
        self.buffer.lock().lines().map(String::from).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Appender for MemoryAppender {
    fn write_line(&self, line: &str) -> Result<()> {
        self.buffer.lock().push_str(line);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let memory = MemoryAppender::new();
        let handle = memory.clone();
        assert!(memory.is_empty());

        handle.write_line("D a\n").unwrap();
        handle.write_line("I b\n").unwrap();
        assert_eq!(memory.lines(), vec!["D a", "I b"]);

        memory.clear();
        assert!(handle.is_empty());
    }
}

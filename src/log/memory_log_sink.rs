use std::{
    error::Error as StdError,
    sync::{Mutex, PoisonError},
};

use crate::log::{
    explicit_tag::ExplicitTag, log_level::LogLevel, log_record::LogRecord, log_sink::LogSink,
};

/// Sink that keeps every record it receives in memory.
///
/// Meant as a test double: plant it, log through the facade, then assert on
/// [`records`](Self::records).
#[derive(Debug, Default)]
pub struct MemoryLogSink {
    explicit_tag: ExplicitTag,
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the records written so far, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns the records written so far.
    pub fn drain(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.records.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl LogSink for MemoryLogSink {
    fn explicit_tag(&self) -> &ExplicitTag {
        &self.explicit_tag
    }

    fn log(&self, level: LogLevel, tag: Option<&str>, message: &str, error: Option<&dyn StdError>) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogRecord::new(level, tag, message, error));
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn drain_empties_the_buffer() {
        let sink = MemoryLogSink::new();
        sink.info("one", &[]);
        sink.info("two", &[]);

        let drained = sink.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[1].message, "two");
        assert!(sink.records().is_empty());
    }
}

use std::error::Error as StdError;

use crate::log::{explicit_tag::ExplicitTag, log_level::LogLevel, log_sink::LogSink};

/// Sink that accepts every call and writes nothing.
#[derive(Debug, Default)]
pub struct NoopLogSink {
    explicit_tag: ExplicitTag,
}

impl NoopLogSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogSink for NoopLogSink {
    #[inline]
    fn explicit_tag(&self) -> &ExplicitTag {
        &self.explicit_tag
    }

    #[inline]
    fn log(&self, _level: LogLevel, _tag: Option<&str>, _message: &str, _error: Option<&dyn StdError>) {}
}

//! The platform output primitive a [`DebugSink`](crate::DebugSink) writes to.

use std::io::{self, Write};

use crate::log::log_level::LogLevel;

/// Final destination of composed, length-bounded records.
///
/// Implementations must not panic or report errors to the caller.
pub trait LogOutput: Send + Sync {
    /// Writes one line segment at `level`.
    fn write(&self, level: LogLevel, tag: Option<&str>, text: &str);

    /// Writes one segment of an assert-level record.
    fn write_fatal(&self, tag: Option<&str>, text: &str);
}

/// Writes `L/Tag: text` lines to standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrOutput;

impl StderrOutput {
    fn write_line(level: LogLevel, tag: Option<&str>, text: &str) {
        let mut err = io::stderr().lock();
        let _ = writeln!(err, "{}/{}: {}", level.letter(), tag.unwrap_or("-"), text);
    }
}

impl LogOutput for StderrOutput {
    fn write(&self, level: LogLevel, tag: Option<&str>, text: &str) {
        Self::write_line(level, tag, text);
    }

    fn write_fatal(&self, tag: Option<&str>, text: &str) {
        Self::write_line(LogLevel::Assert, tag, text);
        let _ = io::stderr().flush();
    }
}

/// Re-emits records as `tracing` events with a `tag` field.
///
/// Assert-level records become `ERROR` events carrying `fatal = true`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingOutput;

impl LogOutput for TracingOutput {
    fn write(&self, level: LogLevel, tag: Option<&str>, text: &str) {
        let tag = tag.unwrap_or_default();
        match level {
            LogLevel::Trace => tracing::trace!(tag, "{text}"),
            LogLevel::Debug => tracing::debug!(tag, "{text}"),
            LogLevel::Info => tracing::info!(tag, "{text}"),
            LogLevel::Warn => tracing::warn!(tag, "{text}"),
            LogLevel::Error => tracing::error!(tag, "{text}"),
            LogLevel::Assert => self.write_fatal(Some(tag), text),
        }
    }

    fn write_fatal(&self, tag: Option<&str>, text: &str) {
        tracing::error!(tag = tag.unwrap_or_default(), fatal = true, "{text}");
    }
}

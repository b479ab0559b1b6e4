use std::error::Error as StdError;

use crate::log::log_level::LogLevel;

/// Owned copy of a single composed log record.
///
/// This struct captures what a sink's write primitive received, so it can be
/// inspected after the logging call returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// The severity level of the record.
    pub level: LogLevel,
    /// Explicit or inferred tag, if one was resolved.
    pub tag: Option<String>,
    /// The composed message, including any appended error trace.
    pub message: String,
    /// `Display` of the error the record was logged with.
    pub error: Option<String>,
}

impl LogRecord {
    /// Creates a new `LogRecord` from the arguments of [`LogSink::log`](crate::LogSink::log).
    ///
    /// # Example
    ///
    /// ```rust
    /// use timber::{LogLevel, LogRecord};
    ///
    /// let record = LogRecord::new(LogLevel::Info, Some("Net"), "connected", None);
    /// assert_eq!(record.tag.as_deref(), Some("Net"));
    /// ```
    #[must_use]
    pub fn new(
        level: LogLevel,
        tag: Option<&str>,
        message: &str,
        error: Option<&dyn StdError>,
    ) -> Self {
        Self {
            level,
            tag: tag.map(str::to_owned),
            message: message.to_owned(),
            error: error.map(|e| e.to_string()),
        }
    }
}

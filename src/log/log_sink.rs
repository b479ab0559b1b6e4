//! The sink capability every log destination ("tree") implements.
//!
//! Implementors provide two things: a one-shot [`ExplicitTag`] slot and the
//! [`LogSink::log`] write primitive. Every severity shorthand, the generic
//! `log_at*` family, and the message composition rules come for free.

use std::error::Error as StdError;

use crate::{
    analytics::{Bundle, Event, EventParams},
    forest::TreeOfSouls,
    log::{
        explicit_tag::ExplicitTag,
        log_format::{self, Args},
        log_level::LogLevel,
    },
};

/// A destination for log records.
///
/// None of the logging methods report failures to the caller: a record that
/// cannot be composed is dropped, a malformed template is written raw.
pub trait LogSink: Send + Sync {
    /// Slot holding the one-shot tag for the next call on the current thread.
    fn explicit_tag(&self) -> &ExplicitTag;

    /// Writes a fully composed record.
    ///
    /// * `tag` - Explicit or inferred tag. May be `None`.
    /// * `message` - Formatted message, with the error trace appended when both were given.
    /// * `error` - The error the record was logged with, if any.
    fn log(&self, level: LogLevel, tag: Option<&str>, message: &str, error: Option<&dyn StdError>);

    /// Sets the one-shot tag for the next call on this thread.
    ///
    /// Composite sinks override this to hand the tag to the sinks they wrap.
    fn set_tag(&self, tag: &str) {
        self.explicit_tag().set(tag);
    }

    /// The dispatch sink behind this tree, if it is one.
    #[doc(hidden)]
    fn as_tree_of_souls(&self) -> Option<&TreeOfSouls> {
        None
    }

    /// Resolves the tag for the current call. The default consumes the explicit tag.
    fn tag(&self) -> Option<String> {
        self.explicit_tag().take()
    }

    /// Whether a record at `level` with `tag` should be written.
    fn is_loggable(&self, _tag: Option<&str>, _level: LogLevel) -> bool {
        true
    }

    /// Formats `template` with `args`. Only called when `args` is non-empty.
    fn format_message(&self, template: &str, args: Args<'_>) -> String {
        log_format::format_or_raw(template, args)
    }

    fn trace(&self, message: &str, args: Args<'_>) {
        prepare_log(self, LogLevel::Trace, None, Some(message), args);
    }

    fn trace_with(&self, error: &dyn StdError, message: &str, args: Args<'_>) {
        prepare_log(self, LogLevel::Trace, Some(error), Some(message), args);
    }

    fn trace_err(&self, error: &dyn StdError) {
        prepare_log(self, LogLevel::Trace, Some(error), None, &[]);
    }

    fn debug(&self, message: &str, args: Args<'_>) {
        prepare_log(self, LogLevel::Debug, None, Some(message), args);
    }

    fn debug_with(&self, error: &dyn StdError, message: &str, args: Args<'_>) {
        prepare_log(self, LogLevel::Debug, Some(error), Some(message), args);
    }

    fn debug_err(&self, error: &dyn StdError) {
        prepare_log(self, LogLevel::Debug, Some(error), None, &[]);
    }

    fn info(&self, message: &str, args: Args<'_>) {
        prepare_log(self, LogLevel::Info, None, Some(message), args);
    }

    fn info_with(&self, error: &dyn StdError, message: &str, args: Args<'_>) {
        prepare_log(self, LogLevel::Info, Some(error), Some(message), args);
    }

    fn info_err(&self, error: &dyn StdError) {
        prepare_log(self, LogLevel::Info, Some(error), None, &[]);
    }

    fn warn(&self, message: &str, args: Args<'_>) {
        prepare_log(self, LogLevel::Warn, None, Some(message), args);
    }

    fn warn_with(&self, error: &dyn StdError, message: &str, args: Args<'_>) {
        prepare_log(self, LogLevel::Warn, Some(error), Some(message), args);
    }

    fn warn_err(&self, error: &dyn StdError) {
        prepare_log(self, LogLevel::Warn, Some(error), None, &[]);
    }

    fn error(&self, message: &str, args: Args<'_>) {
        prepare_log(self, LogLevel::Error, None, Some(message), args);
    }

    fn error_with(&self, error: &dyn StdError, message: &str, args: Args<'_>) {
        prepare_log(self, LogLevel::Error, Some(error), Some(message), args);
    }

    fn error_err(&self, error: &dyn StdError) {
        prepare_log(self, LogLevel::Error, Some(error), None, &[]);
    }

    fn assert(&self, message: &str, args: Args<'_>) {
        prepare_log(self, LogLevel::Assert, None, Some(message), args);
    }

    fn assert_with(&self, error: &dyn StdError, message: &str, args: Args<'_>) {
        prepare_log(self, LogLevel::Assert, Some(error), Some(message), args);
    }

    fn assert_err(&self, error: &dyn StdError) {
        prepare_log(self, LogLevel::Assert, Some(error), None, &[]);
    }

    fn log_at(&self, level: LogLevel, message: &str, args: Args<'_>) {
        prepare_log(self, level, None, Some(message), args);
    }

    fn log_at_with(&self, level: LogLevel, error: &dyn StdError, message: &str, args: Args<'_>) {
        prepare_log(self, level, Some(error), Some(message), args);
    }

    fn log_at_err(&self, level: LogLevel, error: &dyn StdError) {
        prepare_log(self, level, Some(error), None, &[]);
    }

    /// Reports a crash-worthy condition. Ignored unless the sink overrides it.
    fn crash(&self, _message: &str, _args: Args<'_>) {}

    fn crash_with(&self, _error: &dyn StdError, _message: &str, _args: Args<'_>) {}

    fn crash_err(&self, _error: &dyn StdError) {}

    /// Records an analytics event. Ignored unless the sink overrides it.
    fn event(&self, _event: &dyn Event, _params: EventParams<'_>) {}

    fn event_bundle(&self, _event: &dyn Event, _bundle: &dyn Bundle) {}
}

/// Composes one record and hands it to `sink.log`.
///
/// The tag is resolved before the loggability check so a one-shot tag never
/// leaks into the following call.
pub(crate) fn prepare_log<S: LogSink + ?Sized>(
    sink: &S,
    level: LogLevel,
    error: Option<&dyn StdError>,
    message: Option<&str>,
    args: Args<'_>,
) {
    let tag = sink.tag();
    if !sink.is_loggable(tag.as_deref(), level) {
        return;
    }

    let message = match (message.filter(|m| !m.is_empty()), error) {
        (None, None) => return,
        (None, Some(error)) => log_format::error_trace(error),
        (Some(message), error) => {
            let mut message = if args.is_empty() {
                message.to_owned()
            } else {
                sink.format_message(message, args)
            };
            if let Some(error) = error {
                message.push('\n');
                message.push_str(&log_format::error_trace(error));
            }
            message
        }
    };

    sink.log(level, tag.as_deref(), &message, error);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::log::{log_record::LogRecord, memory_log_sink::MemoryLogSink};
    use std::io;

    fn record(level: LogLevel, tag: Option<&str>, message: &str, error: Option<&str>) -> LogRecord {
        LogRecord {
            level,
            tag: tag.map(str::to_owned),
            message: message.to_owned(),
            error: error.map(str::to_owned),
        }
    }

    #[test]
    fn every_severity_writes_one_record_at_its_level() {
        let sink = MemoryLogSink::new();
        sink.trace("t", &[]);
        sink.debug("d", &[]);
        sink.info("i", &[]);
        sink.warn("w", &[]);
        sink.error("e", &[]);
        sink.assert("a", &[]);

        let levels: Vec<LogLevel> = sink.records().iter().map(|r| r.level).collect();
        assert_eq!(levels, LogLevel::ALL.to_vec());
    }

    #[test]
    fn formats_only_when_args_are_supplied() {
        let sink = MemoryLogSink::new();
        sink.info("100% literal", &[]);
        sink.info("hello %s", &[&"world"]);

        assert_eq!(
            sink.records(),
            vec![
                record(LogLevel::Info, None, "100% literal", None),
                record(LogLevel::Info, None, "hello world", None),
            ]
        );
    }

    #[test]
    fn malformed_template_is_written_raw() {
        let sink = MemoryLogSink::new();
        sink.info("%.70000f", &[&1.5]);
        sink.warn("%s and %s", &[&"one"]);

        assert_eq!(
            sink.records(),
            vec![
                record(LogLevel::Info, None, "%.70000f", None),
                record(LogLevel::Warn, None, "%s and %s", None),
            ]
        );
    }

    #[test]
    fn empty_message_without_error_is_dropped() {
        let sink = MemoryLogSink::new();
        sink.warn("", &[]);
        sink.log_at(LogLevel::Error, "", &[&1]);
        assert!(sink.records().is_empty());
    }

    #[test]
    fn error_only_writes_error_trace() {
        let sink = MemoryLogSink::new();
        let err = io::Error::other("disk full");
        sink.error_err(&err);
        sink.warn_with(&err, "", &[]);

        assert_eq!(
            sink.records(),
            vec![
                record(LogLevel::Error, None, "disk full", Some("disk full")),
                record(LogLevel::Warn, None, "disk full", Some("disk full")),
            ]
        );
    }

    #[test]
    fn message_with_error_appends_trace_after_newline() {
        let sink = MemoryLogSink::new();
        let err = io::Error::other("refused");
        sink.debug_with(&err, "connect to %s", &[&"db"]);

        assert_eq!(
            sink.records(),
            vec![record(LogLevel::Debug, None, "connect to db\nrefused", Some("refused"))]
        );
    }

    #[test]
    fn explicit_tag_applies_to_next_call_only() {
        let sink = MemoryLogSink::new();
        sink.explicit_tag().set("Net");
        sink.info("first", &[]);
        sink.info("second", &[]);

        let tags: Vec<Option<String>> = sink.records().into_iter().map(|r| r.tag).collect();
        assert_eq!(tags, vec![Some("Net".to_owned()), None]);
    }

    struct WarnOnly(MemoryLogSink);

    impl LogSink for WarnOnly {
        fn explicit_tag(&self) -> &ExplicitTag {
            self.0.explicit_tag()
        }

        fn log(&self, level: LogLevel, tag: Option<&str>, message: &str, error: Option<&dyn StdError>) {
            self.0.log(level, tag, message, error);
        }

        fn is_loggable(&self, _tag: Option<&str>, level: LogLevel) -> bool {
            level >= LogLevel::Warn
        }
    }

    #[test]
    fn filtered_record_still_consumes_tag() {
        let sink = WarnOnly(MemoryLogSink::new());
        sink.explicit_tag().set("Dropped");
        sink.debug("filtered", &[]);
        sink.warn("kept", &[]);

        assert_eq!(sink.0.records(), vec![record(LogLevel::Warn, None, "kept", None)]);
    }

    #[test]
    fn generic_family_uses_given_level() {
        let sink = MemoryLogSink::new();
        let err = io::Error::other("boom");
        sink.log_at(LogLevel::Warn, "n=%d", &[&5]);
        sink.log_at_with(LogLevel::Info, &err, "ctx", &[]);
        sink.log_at_err(LogLevel::Assert, &err);

        assert_eq!(
            sink.records(),
            vec![
                record(LogLevel::Warn, None, "n=5", None),
                record(LogLevel::Info, None, "ctx\nboom", Some("boom")),
                record(LogLevel::Assert, None, "boom", Some("boom")),
            ]
        );
    }

    #[test]
    fn crash_and_event_default_to_no_op() {
        let sink = MemoryLogSink::new();
        let err = io::Error::other("boom");
        sink.crash("fatal %s", &[&1]);
        sink.crash_err(&err);
        sink.event(&crate::analytics::Label::new("open"), &[]);
        assert!(sink.records().is_empty());
    }
}

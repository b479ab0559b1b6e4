//! Convenience methods that log values, errors and events through the
//! process-wide facade, tagged with the calling source file.
//!
//! ```
//! use std::sync::Arc;
//! use timber::{MemoryLogSink, ext::LogValueExt, facade};
//!
//! let memory = Arc::new(MemoryLogSink::new());
//! facade::plant(memory.clone()).unwrap();
//!
//! 42.log_info("answer", "!", " ");
//!
//! let records = memory.records();
//! assert_eq!(records[0].message, "answer 42 !");
//! # facade::uproot_all();
//! ```

use std::{error::Error as StdError, fmt, panic::Location, path::Path};

use crate::{
    analytics::{Bundlify, Event, EventParams},
    debug::MAX_TAG_LENGTH,
    facade,
    forest::TreeOfSouls,
    log::{log_level::LogLevel, log_sink::LogSink},
};

/// Logs `self` wrapped in a prefix and postfix.
pub trait LogValueExt {
    fn log_at_level(&self, level: LogLevel, prefix: &str, postfix: &str, separator: &str);

    #[track_caller]
    fn log_debug(&self, prefix: &str, postfix: &str, separator: &str) {
        self.log_at_level(LogLevel::Debug, prefix, postfix, separator);
    }

    #[track_caller]
    fn log_info(&self, prefix: &str, postfix: &str, separator: &str) {
        self.log_at_level(LogLevel::Info, prefix, postfix, separator);
    }

    #[track_caller]
    fn log_warn(&self, prefix: &str, postfix: &str, separator: &str) {
        self.log_at_level(LogLevel::Warn, prefix, postfix, separator);
    }

    #[track_caller]
    fn log_error(&self, prefix: &str, postfix: &str, separator: &str) {
        self.log_at_level(LogLevel::Error, prefix, postfix, separator);
    }

    #[track_caller]
    fn log_assert(&self, prefix: &str, postfix: &str, separator: &str) {
        self.log_at_level(LogLevel::Assert, prefix, postfix, separator);
    }
}

impl<T: fmt::Display + ?Sized> LogValueExt for T {
    #[track_caller]
    fn log_at_level(&self, level: LogLevel, prefix: &str, postfix: &str, separator: &str) {
        let message = format!("{prefix}{separator}{self}{separator}{postfix}");
        caller_tagged().log_at(level, &message, &[]);
    }
}

/// Reports `self` as a non-fatal crash.
pub trait CrashExt {
    fn crash(&self, message: Option<&str>);
}

impl<E: StdError> CrashExt for E {
    #[track_caller]
    fn crash(&self, message: Option<&str>) {
        let souls = caller_tagged();
        match message {
            Some(message) => souls.crash_with(self, message, &[]),
            None => souls.crash_err(self),
        }
    }
}

/// Records `self` as an analytics event.
pub trait EventExt {
    fn emit(&self);

    /// Collects `params` into a [`Bundlify`] and records it with the event.
    fn emit_with(&self, params: EventParams<'_>);
}

impl<E: Event> EventExt for E {
    fn emit(&self) {
        facade::event(self, &[]);
    }

    #[track_caller]
    fn emit_with(&self, params: EventParams<'_>) {
        let bundle = params
            .iter()
            .fold(Bundlify::new(), |bundle, (param, value)| bundle.put_param(*param, value));
        caller_tagged().event_bundle(self, &bundle);
    }
}

#[track_caller]
fn caller_tagged() -> &'static TreeOfSouls {
    facade::tag(&file_tag(Location::caller().file()))
}

/// `src/net/client.rs` becomes `client`.
fn file_tag(file: &str) -> String {
    let stem = Path::new(file)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file);
    stem.chars().take(MAX_TAG_LENGTH).collect()
}

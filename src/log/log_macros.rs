//! Leveled logging macros for any [`LogSink`](crate::LogSink) and for the
//! process-wide facade.
//!
//! Arguments after the template are any `Display` values and are substituted
//! printf-style (`%s`, `%d`, ...).
//!
//! # Feature Flags
//! specific log levels are controlled by cargo features:
//! `log-trace`, `log-debug`, `log-info`, `log-warn`, `log-error`.
//!
//! If a feature is disabled, the corresponding macros expand to `()`, removing
//! all formatting and allocation overhead at compile time. Assert-level macros
//! follow `log-error`.

// ============================================================================
// 1. GENERIC INTERNAL MACROS (The "Workers")
// ============================================================================

#[macro_export]
macro_rules! sink_log {
    ($sink:expr, $lvl:expr, $msg:expr $(, $arg:expr)* $(,)?) => {{
        $crate::LogSink::log_at(
            &*$sink,
            $lvl,
            $msg,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
        );
    }};
}

#[macro_export]
macro_rules! timber_log {
    ($lvl:expr, $msg:expr $(, $arg:expr)* $(,)?) => {{
        $crate::facade::log_at(
            $lvl,
            $msg,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
        );
    }};
}

// ============================================================================
// 2. LEVEL-SPECIFIC MACROS (Feature Gated)
// ============================================================================

// ---------------------- TRACE ----------------------
#[cfg(feature = "log-trace")]
#[macro_export]
macro_rules! sink_trace   { ($sink:expr, $($arg:tt)*) => { $crate::sink_log!($sink, $crate::LogLevel::Trace, $($arg)*) } }
#[cfg(feature = "log-trace")]
#[macro_export]
macro_rules! timber_trace { ($($arg:tt)*) => { $crate::timber_log!($crate::LogLevel::Trace, $($arg)*) } }

#[cfg(not(feature = "log-trace"))]
#[macro_export]
macro_rules! sink_trace {
    ($($arg:tt)*) => {
        ()
    };
}
#[cfg(not(feature = "log-trace"))]
#[macro_export]
macro_rules! timber_trace {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- DEBUG ----------------------
#[cfg(feature = "log-debug")]
#[macro_export]
macro_rules! sink_debug   { ($sink:expr, $($arg:tt)*) => { $crate::sink_log!($sink, $crate::LogLevel::Debug, $($arg)*) } }
#[cfg(feature = "log-debug")]
#[macro_export]
macro_rules! timber_debug { ($($arg:tt)*) => { $crate::timber_log!($crate::LogLevel::Debug, $($arg)*) } }

#[cfg(not(feature = "log-debug"))]
#[macro_export]
macro_rules! sink_debug {
    ($($arg:tt)*) => {
        ()
    };
}
#[cfg(not(feature = "log-debug"))]
#[macro_export]
macro_rules! timber_debug {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- INFO ----------------------
#[cfg(feature = "log-info")]
#[macro_export]
macro_rules! sink_info   { ($sink:expr, $($arg:tt)*) => { $crate::sink_log!($sink, $crate::LogLevel::Info, $($arg)*) } }
#[cfg(feature = "log-info")]
#[macro_export]
macro_rules! timber_info { ($($arg:tt)*) => { $crate::timber_log!($crate::LogLevel::Info, $($arg)*) } }

#[cfg(not(feature = "log-info"))]
#[macro_export]
macro_rules! sink_info {
    ($($arg:tt)*) => {
        ()
    };
}
#[cfg(not(feature = "log-info"))]
#[macro_export]
macro_rules! timber_info {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- WARN ----------------------
#[cfg(feature = "log-warn")]
#[macro_export]
macro_rules! sink_warn   { ($sink:expr, $($arg:tt)*) => { $crate::sink_log!($sink, $crate::LogLevel::Warn, $($arg)*) } }
#[cfg(feature = "log-warn")]
#[macro_export]
macro_rules! timber_warn { ($($arg:tt)*) => { $crate::timber_log!($crate::LogLevel::Warn, $($arg)*) } }

#[cfg(not(feature = "log-warn"))]
#[macro_export]
macro_rules! sink_warn {
    ($($arg:tt)*) => {
        ()
    };
}
#[cfg(not(feature = "log-warn"))]
#[macro_export]
macro_rules! timber_warn {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- ERROR / ASSERT ----------------------
// Generally always enabled, but consistent structure allows user to disable if really needed.
#[cfg(feature = "log-error")]
#[macro_export]
macro_rules! sink_error   { ($sink:expr, $($arg:tt)*) => { $crate::sink_log!($sink, $crate::LogLevel::Error, $($arg)*) } }
#[cfg(feature = "log-error")]
#[macro_export]
macro_rules! timber_error { ($($arg:tt)*) => { $crate::timber_log!($crate::LogLevel::Error, $($arg)*) } }
#[cfg(feature = "log-error")]
#[macro_export]
macro_rules! sink_assert   { ($sink:expr, $($arg:tt)*) => { $crate::sink_log!($sink, $crate::LogLevel::Assert, $($arg)*) } }
#[cfg(feature = "log-error")]
#[macro_export]
macro_rules! timber_assert { ($($arg:tt)*) => { $crate::timber_log!($crate::LogLevel::Assert, $($arg)*) } }

#[cfg(not(feature = "log-error"))]
#[macro_export]
macro_rules! sink_error {
    ($($arg:tt)*) => {
        ()
    };
}
#[cfg(not(feature = "log-error"))]
#[macro_export]
macro_rules! timber_error {
    ($($arg:tt)*) => {
        ()
    };
}
#[cfg(not(feature = "log-error"))]
#[macro_export]
macro_rules! sink_assert {
    ($($arg:tt)*) => {
        ()
    };
}
#[cfg(not(feature = "log-error"))]
#[macro_export]
macro_rules! timber_assert {
    ($($arg:tt)*) => {
        ()
    };
}

#[cfg(all(test, feature = "log-trace"))]
mod tests {
    use crate::{LogLevel, MemoryLogSink};
    use std::sync::Arc;

    #[test]
    fn sink_macros_format_and_pick_level() {
        let sink = Arc::new(MemoryLogSink::new());
        let peers = 3;
        crate::sink_info!(sink, "connected to %d peers", peers);
        crate::sink_trace!(sink, "no args");
        crate::sink_assert!(sink, "%s/%s", "a", 'b');

        let records = sink.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].level, LogLevel::Info);
        assert_eq!(records[0].message, "connected to 3 peers");
        assert_eq!(records[1].message, "no args");
        assert_eq!(records[2].level, LogLevel::Assert);
        assert_eq!(records[2].message, "a/b");
    }
}

//! Timber is a process-wide logging facade.
//!
//! Any number of log sinks ("trees") can be planted into it. Every log call
//! made anywhere in the program then reaches all of them.
//!
//! - [`LogSink`]: the capability a tree implements; only `log` is required.
//! - [`DebugSink`]: the default tree, with call-site tags and bounded records.
//! - [`Timber`]: a registry plus the [`TreeOfSouls`] that dispatches to it.
//! - [`facade`]: free functions over the process-wide instance.

/// Analytics events and bundles accepted by the event capability.
pub mod analytics;
/// Handles configuration loading and management.
pub mod config;
/// The default sink.
pub mod debug;
/// Value, error and event extensions logging through the facade.
pub mod ext;
/// The process-wide facade.
pub mod facade;
/// Sink registry and composite dispatch.
pub mod forest;
/// Sink capability, levels, formatting and outputs.
pub mod log;
/// The lifecycle-scoped facade object.
pub mod timber;

pub use analytics::{Bundle, Bundlify, Event, EventParameter, EventParams, Eventable, Label};
pub use config::{Config, ConfigError};
pub use debug::{DebugSink, DebugSinkConfig, TagError, TagInference};
pub use forest::{ForestError, TreeOfSouls};
pub use log::{
    Args, ExplicitTag, FormatError, LevelParseError, LogLevel, LogOutput, LogRecord, LogSink,
    MemoryLogSink, NoopLogSink, StderrOutput, TracingOutput, error_trace, format_message,
};
pub use timber::Timber;

pub mod explicit_tag;
pub mod log_format;
pub mod log_level;
pub mod log_macros;
pub mod log_output;
pub mod log_record;
pub mod log_sink;
pub mod memory_log_sink;
pub mod noop_log_sink;

pub use explicit_tag::ExplicitTag;
pub use log_format::{Args, FormatError, error_trace, format_message};
pub use log_level::{LevelParseError, LogLevel};
pub use log_output::{LogOutput, StderrOutput, TracingOutput};
pub use log_record::LogRecord;
pub use log_sink::LogSink;
pub use memory_log_sink::MemoryLogSink;
pub use noop_log_sink::NoopLogSink;

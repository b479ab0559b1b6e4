//! The default sink and its helpers: call-site tag inference and splitting of
//! oversized messages.

pub mod chunking;
pub mod debug_sink;
pub mod tag_inference;

pub use debug_sink::{CONFIG_SECTION, DebugSink, DebugSinkConfig, MAX_LOG_LENGTH};
pub use tag_inference::{MAX_TAG_LENGTH, TagError, TagInference};

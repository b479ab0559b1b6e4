use std::{error::Error as StdError, fmt, sync::Arc};

use crate::{
    analytics::{Bundle, Event, EventParams},
    config::{Config, ConfigError},
    debug::{
        chunking::split_for_output,
        tag_inference::{self, MAX_TAG_LENGTH, TagInference},
    },
    log::{
        explicit_tag::ExplicitTag,
        log_format::Args,
        log_level::LogLevel,
        log_output::{LogOutput, StderrOutput},
        log_sink::LogSink,
    },
};

/// Maximum record length of constrained platform outputs, in chars.
pub const MAX_LOG_LENGTH: usize = 4000;

/// Config section read by [`DebugSinkConfig::from_config`].
pub const CONFIG_SECTION: &str = "Timber";

/// Tunables of a [`DebugSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugSinkConfig {
    /// Records at least this long are split before writing. Clamped to 1.
    pub max_log_length: usize,
    /// Cap of inferred tags; `None` when the output has no tag limit.
    pub max_tag_length: Option<usize>,
    /// Records below this level are dropped.
    pub min_level: LogLevel,
    pub tag_inference: TagInference,
}

impl Default for DebugSinkConfig {
    fn default() -> Self {
        Self {
            max_log_length: MAX_LOG_LENGTH,
            max_tag_length: Some(MAX_TAG_LENGTH),
            min_level: LogLevel::Trace,
            tag_inference: TagInference::Disabled,
        }
    }
}

impl DebugSinkConfig {
    #[must_use]
    pub fn with_max_log_length(mut self, max_log_length: usize) -> Self {
        self.max_log_length = max_log_length.max(1);
        self
    }

    #[must_use]
    pub fn with_max_tag_length(mut self, max_tag_length: Option<usize>) -> Self {
        self.max_tag_length = max_tag_length;
        self
    }

    #[must_use]
    pub fn with_min_level(mut self, min_level: LogLevel) -> Self {
        self.min_level = min_level;
        self
    }

    #[must_use]
    pub fn with_tag_inference(mut self, tag_inference: TagInference) -> Self {
        self.tag_inference = tag_inference;
        self
    }

    /// Reads the `[Timber]` section, keeping defaults for missing keys.
    ///
    /// Keys: `max_log_length`, `max_tag_length` (`none` for no limit),
    /// `min_level`, `infer_tags` (`true`/`false`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a present key cannot be parsed.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let mut out = Self::default();

        if let Some(raw) = config.get_non_empty(CONFIG_SECTION, "max_log_length") {
            let max: usize = parse_value("max_log_length", raw)?;
            if max == 0 {
                return Err(ConfigError::invalid("max_log_length", raw));
            }
            out.max_log_length = max;
        }

        if let Some(raw) = config.get_non_empty(CONFIG_SECTION, "max_tag_length") {
            out.max_tag_length = if raw.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(parse_value("max_tag_length", raw)?)
            };
        }

        if let Some(raw) = config.get_non_empty(CONFIG_SECTION, "min_level") {
            out.min_level = parse_value("min_level", raw)?;
        }

        if let Some(raw) = config.get_non_empty(CONFIG_SECTION, "infer_tags") {
            let infer: bool = parse_value("infer_tags", raw)?;
            out.tag_inference = if infer {
                TagInference::CallStack
            } else {
                TagInference::Disabled
            };
        }

        Ok(out)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::invalid(key, raw))
}

/// The default sink: optional call-site tags, length-bounded output, and
/// events/crashes rendered as debug/error records.
pub struct DebugSink {
    explicit_tag: ExplicitTag,
    output: Arc<dyn LogOutput>,
    config: DebugSinkConfig,
}

impl DebugSink {
    #[must_use]
    pub fn new(output: Arc<dyn LogOutput>) -> Self {
        Self::with_config(output, DebugSinkConfig::default())
    }

    #[must_use]
    pub fn with_config(output: Arc<dyn LogOutput>, config: DebugSinkConfig) -> Self {
        Self {
            explicit_tag: ExplicitTag::new(),
            output,
            config,
        }
    }

    /// Sink writing `L/Tag: text` lines to standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Arc::new(StderrOutput))
    }

    #[must_use]
    pub fn config(&self) -> &DebugSinkConfig {
        &self.config
    }

    fn write(&self, level: LogLevel, tag: Option<&str>, text: &str) {
        if level == LogLevel::Assert {
            self.output.write_fatal(tag, text);
        } else {
            self.output.write(level, tag, text);
        }
    }
}

impl fmt::Debug for DebugSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugSink")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LogSink for DebugSink {
    fn explicit_tag(&self) -> &ExplicitTag {
        &self.explicit_tag
    }

    /// Explicit tag first, then call-stack inference when enabled.
    ///
    /// # Panics
    ///
    /// Panics with a [`TagError`](tag_inference::TagError) payload when
    /// inference is enabled but no caller frame can be resolved.
    fn tag(&self) -> Option<String> {
        if let Some(tag) = self.explicit_tag.take() {
            return Some(tag);
        }
        match self.config.tag_inference {
            TagInference::Disabled => None,
            TagInference::CallStack => {
                match tag_inference::infer_from_call_stack(self.config.max_tag_length) {
                    Ok(tag) => Some(tag),
                    Err(err) => std::panic::panic_any(err),
                }
            }
        }
    }

    fn is_loggable(&self, _tag: Option<&str>, level: LogLevel) -> bool {
        level >= self.config.min_level
    }

    fn log(&self, level: LogLevel, tag: Option<&str>, message: &str, _error: Option<&dyn StdError>) {
        if message.chars().count() < self.config.max_log_length {
            self.write(level, tag, message);
            return;
        }
        for part in split_for_output(message, self.config.max_log_length) {
            self.write(level, tag, part);
        }
    }

    fn crash(&self, message: &str, args: Args<'_>) {
        self.error(message, args);
    }

    fn crash_with(&self, error: &dyn StdError, message: &str, args: Args<'_>) {
        self.error_with(error, message, args);
    }

    fn crash_err(&self, error: &dyn StdError) {
        self.error_err(error);
    }

    fn event(&self, event: &dyn Event, params: EventParams<'_>) {
        if params.is_empty() {
            self.debug("event: %s", &[&event]);
        } else {
            let pairs = pair_args_string(params);
            self.debug("event: %s args: %s", &[&event, &pairs]);
        }
    }

    fn event_bundle(&self, event: &dyn Event, bundle: &dyn Bundle) {
        if bundle.is_empty() {
            self.debug("event: %s", &[&event]);
        } else {
            self.debug("event: %s args: %s", &[&event, &bundle]);
        }
    }
}

/// `[Pair(p1, v1), Pair(p2, v2)]`
fn pair_args_string(params: EventParams<'_>) -> String {
    let pairs: Vec<String> = params
        .iter()
        .map(|(param, value)| format!("Pair({param}, {value})"))
        .collect();
    format!("[{}]", pairs.join(", "))
}

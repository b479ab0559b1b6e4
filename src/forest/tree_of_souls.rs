//! The composite sink behind the facade.
//!
//! Every call loads the current forest snapshot and repeats itself on each
//! planted tree, in planting order. A tree that panics is reported through
//! `tracing` and skipped; the remaining trees still receive the call. A tag
//! inference failure is a usage error, so its panic is re-raised once every
//! tree has been attempted.

use std::{
    any::Any,
    error::Error as StdError,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use crate::{
    analytics::{Bundle, Event, EventParams},
    debug::TagError,
    forest::Forest,
    log::{explicit_tag::ExplicitTag, log_format::Args, log_level::LogLevel, log_sink::LogSink},
};

/// Dispatch sink of a [`Timber`](crate::Timber).
///
/// Only a `Timber` builds one, so it can never end up planted into the forest
/// it dispatches to:
///
/// ```compile_fail
/// use std::sync::Arc;
/// use timber::{TreeOfSouls, forest::Forest};
///
/// let forest = Arc::new(Forest::new());
/// let souls = Arc::new(TreeOfSouls::new(forest.clone()));
/// forest.plant(souls);
/// ```
pub struct TreeOfSouls {
    explicit_tag: ExplicitTag,
    forest: Arc<Forest>,
}

impl TreeOfSouls {
    pub(crate) fn new(forest: Arc<Forest>) -> Self {
        Self {
            explicit_tag: ExplicitTag::new(),
            forest,
        }
    }

    /// True if a call on this sink can reach `target`, directly or through
    /// nested dispatch sinks.
    pub(crate) fn dispatches_to(&self, target: *const ()) -> bool {
        std::ptr::addr_eq(self as *const Self, target)
            || self.forest.snapshot().iter().any(|tree| {
                std::ptr::addr_eq(Arc::as_ptr(tree), target)
                    || tree
                        .as_tree_of_souls()
                        .is_some_and(|souls| souls.dispatches_to(target))
            })
    }

    fn each(&self, method: &'static str, call: impl Fn(&dyn LogSink)) {
        let trees = self.forest.snapshot();
        let mut usage_error: Option<Box<dyn Any + Send>> = None;

        for tree in trees.iter() {
            let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| call(tree.as_ref()))) else {
                continue;
            };
            if payload.is::<TagError>() {
                usage_error.get_or_insert(payload);
            } else {
                tracing::error!(
                    method = method,
                    panic = %panic_message(payload.as_ref()),
                    "tree panicked during dispatch"
                );
            }
        }

        if let Some(payload) = usage_error {
            panic::resume_unwind(payload);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "<non-string panic payload>"
    }
}

impl LogSink for TreeOfSouls {
    fn explicit_tag(&self) -> &ExplicitTag {
        &self.explicit_tag
    }

    fn as_tree_of_souls(&self) -> Option<&TreeOfSouls> {
        Some(self)
    }

    /// Hands the tag to every planted tree; this sink never reads its own slot.
    fn set_tag(&self, tag: &str) {
        for tree in self.forest.snapshot().iter() {
            tree.set_tag(tag);
        }
    }

    /// # Panics
    ///
    /// Always. Every record-producing method is fanned out explicitly, so the
    /// composite never writes a record of its own.
    fn log(&self, _level: LogLevel, _tag: Option<&str>, _message: &str, _error: Option<&dyn StdError>) {
        unreachable!("Missing override for log method");
    }

    fn trace(&self, message: &str, args: Args<'_>) {
        self.each("trace", |tree| tree.trace(message, args));
    }

    fn trace_with(&self, error: &dyn StdError, message: &str, args: Args<'_>) {
        self.each("trace_with", |tree| tree.trace_with(error, message, args));
    }

    fn trace_err(&self, error: &dyn StdError) {
        self.each("trace_err", |tree| tree.trace_err(error));
    }

    fn debug(&self, message: &str, args: Args<'_>) {
        self.each("debug", |tree| tree.debug(message, args));
    }

    fn debug_with(&self, error: &dyn StdError, message: &str, args: Args<'_>) {
        self.each("debug_with", |tree| tree.debug_with(error, message, args));
    }

    fn debug_err(&self, error: &dyn StdError) {
        self.each("debug_err", |tree| tree.debug_err(error));
    }

    fn info(&self, message: &str, args: Args<'_>) {
        self.each("info", |tree| tree.info(message, args));
    }

    fn info_with(&self, error: &dyn StdError, message: &str, args: Args<'_>) {
        self.each("info_with", |tree| tree.info_with(error, message, args));
    }

    fn info_err(&self, error: &dyn StdError) {
        self.each("info_err", |tree| tree.info_err(error));
    }

    fn warn(&self, message: &str, args: Args<'_>) {
        self.each("warn", |tree| tree.warn(message, args));
    }

    fn warn_with(&self, error: &dyn StdError, message: &str, args: Args<'_>) {
        self.each("warn_with", |tree| tree.warn_with(error, message, args));
    }

    fn warn_err(&self, error: &dyn StdError) {
        self.each("warn_err", |tree| tree.warn_err(error));
    }

    fn error(&self, message: &str, args: Args<'_>) {
        self.each("error", |tree| tree.error(message, args));
    }

    fn error_with(&self, error: &dyn StdError, message: &str, args: Args<'_>) {
        self.each("error_with", |tree| tree.error_with(error, message, args));
    }

    fn error_err(&self, error: &dyn StdError) {
        self.each("error_err", |tree| tree.error_err(error));
    }

    fn assert(&self, message: &str, args: Args<'_>) {
        self.each("assert", |tree| tree.assert(message, args));
    }

    fn assert_with(&self, error: &dyn StdError, message: &str, args: Args<'_>) {
        self.each("assert_with", |tree| tree.assert_with(error, message, args));
    }

    fn assert_err(&self, error: &dyn StdError) {
        self.each("assert_err", |tree| tree.assert_err(error));
    }

    fn log_at(&self, level: LogLevel, message: &str, args: Args<'_>) {
        self.each("log_at", |tree| tree.log_at(level, message, args));
    }

    fn log_at_with(&self, level: LogLevel, error: &dyn StdError, message: &str, args: Args<'_>) {
        self.each("log_at_with", |tree| tree.log_at_with(level, error, message, args));
    }

    fn log_at_err(&self, level: LogLevel, error: &dyn StdError) {
        self.each("log_at_err", |tree| tree.log_at_err(level, error));
    }

    fn crash(&self, message: &str, args: Args<'_>) {
        self.each("crash", |tree| tree.crash(message, args));
    }

    fn crash_with(&self, error: &dyn StdError, message: &str, args: Args<'_>) {
        self.each("crash_with", |tree| tree.crash_with(error, message, args));
    }

    fn crash_err(&self, error: &dyn StdError) {
        self.each("crash_err", |tree| tree.crash_err(error));
    }

    fn event(&self, event: &dyn Event, params: EventParams<'_>) {
        self.each("event", |tree| tree.event(event, params));
    }

    fn event_bundle(&self, event: &dyn Event, bundle: &dyn Bundle) {
        self.each("event_bundle", |tree| tree.event_bundle(event, bundle));
    }
}

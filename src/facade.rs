//! Process-wide logger.
//!
//! One lazily created [`Timber`] backs every function here, so a tree planted
//! at startup receives calls made from any module or thread:
//!
//! ```
//! use std::sync::Arc;
//! use timber::{MemoryLogSink, facade};
//!
//! let memory = Arc::new(MemoryLogSink::new());
//! facade::plant(memory.clone()).unwrap();
//!
//! facade::info("listening on %s", &[&"0.0.0.0:8080"]);
//! facade::tag("Http");
//! facade::warn("slow handler", &[]);
//!
//! let records = memory.records();
//! assert_eq!(records[0].message, "listening on 0.0.0.0:8080");
//! assert_eq!(records[1].tag.as_deref(), Some("Http"));
//! # facade::uproot_all();
//! ```

use std::{error::Error as StdError, sync::{Arc, LazyLock}};

use crate::{
    analytics::{Bundle, Event, EventParams},
    forest::{ForestError, TreeOfSouls},
    log::{log_format::Args, log_level::LogLevel, log_sink::LogSink},
    timber::Timber,
};

static TIMBER: LazyLock<Timber> = LazyLock::new(Timber::new);

/// The process-wide instance.
pub fn timber() -> &'static Timber {
    &TIMBER
}

/// See [`Timber::plant`].
///
/// # Errors
///
/// [`ForestError::PlantedIntoItself`] for the global dispatch sink.
pub fn plant(tree: Arc<dyn LogSink>) -> Result<(), ForestError> {
    TIMBER.plant(tree)
}

/// See [`Timber::plant_all`].
///
/// # Errors
///
/// [`ForestError::PlantedIntoItself`] for the global dispatch sink.
pub fn plant_all<I>(trees: I) -> Result<(), ForestError>
where
    I: IntoIterator<Item = Arc<dyn LogSink>>,
{
    TIMBER.plant_all(trees)
}

/// See [`Timber::uproot`].
///
/// # Errors
///
/// [`ForestError::NotPlanted`] if `tree` is not planted.
pub fn uproot<S: LogSink + ?Sized>(tree: &Arc<S>) -> Result<(), ForestError> {
    TIMBER.uproot(tree)
}

pub fn uproot_all() {
    TIMBER.uproot_all();
}

pub fn forest() -> Vec<Arc<dyn LogSink>> {
    TIMBER.forest()
}

pub fn tree_count() -> usize {
    TIMBER.tree_count()
}

/// Sets a one-shot tag for the next call on this thread.
pub fn tag(tag: &str) -> &'static TreeOfSouls {
    TIMBER.tag(tag)
}

pub fn as_tree() -> &'static TreeOfSouls {
    TIMBER.as_tree()
}

pub fn trace(message: &str, args: Args<'_>) {
    TIMBER.as_tree().trace(message, args);
}

pub fn trace_with(error: &dyn StdError, message: &str, args: Args<'_>) {
    TIMBER.as_tree().trace_with(error, message, args);
}

pub fn trace_err(error: &dyn StdError) {
    TIMBER.as_tree().trace_err(error);
}

pub fn debug(message: &str, args: Args<'_>) {
    TIMBER.as_tree().debug(message, args);
}

pub fn debug_with(error: &dyn StdError, message: &str, args: Args<'_>) {
    TIMBER.as_tree().debug_with(error, message, args);
}

pub fn debug_err(error: &dyn StdError) {
    TIMBER.as_tree().debug_err(error);
}

pub fn info(message: &str, args: Args<'_>) {
    TIMBER.as_tree().info(message, args);
}

pub fn info_with(error: &dyn StdError, message: &str, args: Args<'_>) {
    TIMBER.as_tree().info_with(error, message, args);
}

pub fn info_err(error: &dyn StdError) {
    TIMBER.as_tree().info_err(error);
}

pub fn warn(message: &str, args: Args<'_>) {
    TIMBER.as_tree().warn(message, args);
}

pub fn warn_with(error: &dyn StdError, message: &str, args: Args<'_>) {
    TIMBER.as_tree().warn_with(error, message, args);
}

pub fn warn_err(error: &dyn StdError) {
    TIMBER.as_tree().warn_err(error);
}

pub fn error(message: &str, args: Args<'_>) {
    TIMBER.as_tree().error(message, args);
}

pub fn error_with(error: &dyn StdError, message: &str, args: Args<'_>) {
    TIMBER.as_tree().error_with(error, message, args);
}

pub fn error_err(error: &dyn StdError) {
    TIMBER.as_tree().error_err(error);
}

pub fn assert(message: &str, args: Args<'_>) {
    TIMBER.as_tree().assert(message, args);
}

pub fn assert_with(error: &dyn StdError, message: &str, args: Args<'_>) {
    TIMBER.as_tree().assert_with(error, message, args);
}

pub fn assert_err(error: &dyn StdError) {
    TIMBER.as_tree().assert_err(error);
}

pub fn log_at(level: LogLevel, message: &str, args: Args<'_>) {
    TIMBER.as_tree().log_at(level, message, args);
}

pub fn log_at_with(level: LogLevel, error: &dyn StdError, message: &str, args: Args<'_>) {
    TIMBER.as_tree().log_at_with(level, error, message, args);
}

pub fn log_at_err(level: LogLevel, error: &dyn StdError) {
    TIMBER.as_tree().log_at_err(level, error);
}

pub fn crash(message: &str, args: Args<'_>) {
    TIMBER.as_tree().crash(message, args);
}

pub fn crash_with(error: &dyn StdError, message: &str, args: Args<'_>) {
    TIMBER.as_tree().crash_with(error, message, args);
}

pub fn crash_err(error: &dyn StdError) {
    TIMBER.as_tree().crash_err(error);
}

pub fn event(event: &dyn Event, params: EventParams<'_>) {
    TIMBER.as_tree().event(event, params);
}

pub fn event_bundle(event: &dyn Event, bundle: &dyn Bundle) {
    TIMBER.as_tree().event_bundle(event, bundle);
}

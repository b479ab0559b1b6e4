//! Per-sink, per-thread one-shot tag override.
//!
//! A tag set through [`ExplicitTag::set`] is visible only on the thread that
//! set it and is cleared by the first [`ExplicitTag::take`] on that thread, so
//! it applies to exactly one subsequent log call.

use std::{
    cell::RefCell,
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
};

static NEXT_SLOT: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static EXPLICIT_TAGS: RefCell<HashMap<u64, String>> = RefCell::new(HashMap::new());
}

/// Slot holding the one-shot tag of a single sink.
#[derive(Debug)]
pub struct ExplicitTag {
    slot: u64,
}

impl ExplicitTag {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: NEXT_SLOT.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Sets the tag for the next log call made on the current thread.
    pub fn set(&self, tag: impl Into<String>) {
        let tag = tag.into();
        let _ = EXPLICIT_TAGS.try_with(|tags| tags.borrow_mut().insert(self.slot, tag));
    }

    /// Returns and clears the tag set on the current thread, if any.
    pub fn take(&self) -> Option<String> {
        EXPLICIT_TAGS
            .try_with(|tags| tags.borrow_mut().remove(&self.slot))
            .ok()
            .flatten()
    }

    /// True if a tag is pending on the current thread.
    #[must_use]
    pub fn is_set(&self) -> bool {
        EXPLICIT_TAGS
            .try_with(|tags| tags.borrow().contains_key(&self.slot))
            .unwrap_or(false)
    }
}

impl Default for ExplicitTag {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ExplicitTag {
    // Only the dropping thread's entry can be reached; other threads' entries
    // are discarded with their thread-local map.
    fn drop(&mut self) {
        let _ = EXPLICIT_TAGS.try_with(|tags| tags.borrow_mut().remove(&self.slot));
    }
}

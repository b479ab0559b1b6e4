//! The facade object: a forest of planted trees plus the composite sink that
//! dispatches to them.

use std::sync::Arc;

use crate::{
    forest::{Forest, ForestError, TreeOfSouls},
    log::log_sink::LogSink,
};

/// Registry of log sinks with a single dispatch entry point.
///
/// The process-wide instance lives in [`crate::facade`]; construct your own
/// to inject an isolated logger, e.g. in tests.
///
/// ```
/// use std::sync::Arc;
/// use timber::{LogSink, MemoryLogSink, Timber};
///
/// let timber = Timber::new();
/// let memory = Arc::new(MemoryLogSink::new());
/// timber.plant(memory.clone()).unwrap();
///
/// timber.tag("Boot").info("ready in %dms", &[&42]);
///
/// let records = memory.records();
/// assert_eq!(records[0].tag.as_deref(), Some("Boot"));
/// assert_eq!(records[0].message, "ready in 42ms");
/// ```
pub struct Timber {
    forest: Arc<Forest>,
    souls: Arc<TreeOfSouls>,
}

impl Timber {
    #[must_use]
    pub fn new() -> Self {
        let forest = Arc::new(Forest::new());
        let souls = Arc::new(TreeOfSouls::new(Arc::clone(&forest)));
        Self { forest, souls }
    }

    /// Adds a tree. Planting an already planted tree is a no-op.
    ///
    /// # Errors
    ///
    /// [`ForestError::PlantedIntoItself`] if `tree` is this instance's own
    /// dispatch sink.
    pub fn plant(&self, tree: Arc<dyn LogSink>) -> Result<(), ForestError> {
        self.check_not_souls(&tree)?;
        self.forest.plant(tree);
        Ok(())
    }

    /// Adds several trees at once. Nothing is planted if any tree is rejected.
    ///
    /// # Errors
    ///
    /// See [`Timber::plant`].
    pub fn plant_all<I>(&self, trees: I) -> Result<(), ForestError>
    where
        I: IntoIterator<Item = Arc<dyn LogSink>>,
    {
        let trees: Vec<_> = trees.into_iter().collect();
        for tree in &trees {
            self.check_not_souls(tree)?;
        }
        self.forest.plant_all(trees);
        Ok(())
    }

    /// Removes a planted tree.
    ///
    /// # Errors
    ///
    /// [`ForestError::NotPlanted`] if `tree` is not planted.
    pub fn uproot<S: LogSink + ?Sized>(&self, tree: &Arc<S>) -> Result<(), ForestError> {
        self.forest.uproot(tree.as_ref())
    }

    pub fn uproot_all(&self) {
        self.forest.clear();
    }

    /// Point-in-time copy of the planted trees.
    #[must_use]
    pub fn forest(&self) -> Vec<Arc<dyn LogSink>> {
        self.forest.trees()
    }

    #[must_use]
    pub fn tree_count(&self) -> usize {
        self.forest.len()
    }

    /// Sets a one-shot tag on every planted tree and returns the dispatch sink.
    ///
    /// The tag is visible to the next call made on this thread only.
    pub fn tag(&self, tag: &str) -> &TreeOfSouls {
        self.souls.set_tag(tag);
        &self.souls
    }

    /// The dispatch sink, for passing this logger where a `LogSink` is expected.
    #[must_use]
    pub fn as_tree(&self) -> &TreeOfSouls {
        &self.souls
    }

    #[must_use]
    pub fn as_shared_tree(&self) -> Arc<dyn LogSink> {
        Arc::clone(&self.souls) as Arc<dyn LogSink>
    }

    // Also rejects dispatch sinks that already reach ours, which would recurse forever.
    fn check_not_souls(&self, tree: &Arc<dyn LogSink>) -> Result<(), ForestError> {
        let own = Arc::as_ptr(&self.souls) as *const ();
        let reaches_own = std::ptr::addr_eq(Arc::as_ptr(tree), own)
            || tree
                .as_tree_of_souls()
                .is_some_and(|souls| souls.dispatches_to(own));
        if reaches_own {
            return Err(ForestError::PlantedIntoItself);
        }
        Ok(())
    }
}

impl Default for Timber {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::{LogLevel, MemoryLogSink, NoopLogSink};
    use std::{io, thread};

    fn memory() -> Arc<MemoryLogSink> {
        Arc::new(MemoryLogSink::new())
    }

    #[test]
    fn planting_own_dispatch_sink_is_rejected() {
        let timber = Timber::new();
        assert_eq!(
            timber.plant(timber.as_shared_tree()),
            Err(ForestError::PlantedIntoItself)
        );
        assert_eq!(timber.tree_count(), 0);
    }

    #[test]
    fn dispatch_sink_of_another_instance_can_be_planted() {
        let outer = Timber::new();
        let inner = Timber::new();
        let memory = memory();
        inner.plant(memory.clone()).unwrap();
        outer.plant(inner.as_shared_tree()).unwrap();

        outer.as_tree().info("nested", &[]);

        assert_eq!(memory.records().len(), 1);
    }

    #[test]
    fn tag_reaches_trees_of_a_nested_instance() {
        let outer = Timber::new();
        let inner = Timber::new();
        let (direct, nested) = (memory(), memory());
        inner.plant(nested.clone()).unwrap();
        outer.plant(direct.clone()).unwrap();
        outer.plant(inner.as_shared_tree()).unwrap();

        outer.tag("Db").info("tagged", &[]);
        outer.as_tree().info("plain", &[]);

        for tree in [direct, nested] {
            let tags: Vec<_> = tree.records().into_iter().map(|r| r.tag).collect();
            assert_eq!(tags, vec![Some("Db".to_owned()), None]);
        }
        assert!(!inner.as_tree().explicit_tag().is_set());
    }

    #[test]
    fn planting_into_each_other_is_rejected() {
        let a = Timber::new();
        let b = Timber::new();
        let c = Timber::new();
        b.plant(a.as_shared_tree()).unwrap();
        c.plant(b.as_shared_tree()).unwrap();

        assert_eq!(a.plant(b.as_shared_tree()), Err(ForestError::PlantedIntoItself));
        assert_eq!(a.plant(c.as_shared_tree()), Err(ForestError::PlantedIntoItself));
        assert_eq!(a.tree_count(), 0);

        c.as_tree().info("still terminates", &[]);
    }

    #[test]
    fn plant_all_is_all_or_nothing() {
        let timber = Timber::new();
        let trees = vec![memory() as Arc<dyn LogSink>, timber.as_shared_tree()];
        assert_eq!(timber.plant_all(trees), Err(ForestError::PlantedIntoItself));
        assert_eq!(timber.tree_count(), 0);
    }

    #[test]
    fn uproot_requires_a_planted_tree() {
        let timber = Timber::new();
        let memory = memory();
        assert_eq!(timber.uproot(&memory), Err(ForestError::NotPlanted));

        timber.plant(memory.clone()).unwrap();
        timber.uproot(&memory).unwrap();
        assert_eq!(timber.tree_count(), 0);
        assert_eq!(timber.uproot(&memory), Err(ForestError::NotPlanted));
    }

    #[test]
    fn same_tree_is_planted_once_distinct_trees_both() {
        let timber = Timber::new();
        let memory = memory();
        timber.plant(memory.clone()).unwrap();
        timber.plant(memory.clone()).unwrap();
        assert_eq!(timber.tree_count(), 1);

        timber.plant(Arc::new(NoopLogSink::new())).unwrap();
        timber.plant(Arc::new(NoopLogSink::new())).unwrap();
        assert_eq!(timber.tree_count(), 3);
        assert_eq!(timber.forest().len(), 3);

        timber.uproot_all();
        assert_eq!(timber.tree_count(), 0);
    }

    #[test]
    fn one_call_reaches_every_tree_once() {
        let timber = Timber::new();
        let (a, b) = (memory(), memory());
        timber
            .plant_all([a.clone() as Arc<dyn LogSink>, b.clone() as Arc<dyn LogSink>])
            .unwrap();

        timber.as_tree().error_with(&io::Error::other("eof"), "read failed", &[]);

        for tree in [a, b] {
            let records = tree.records();
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].level, LogLevel::Error);
            assert_eq!(records[0].message, "read failed\neof");
            assert_eq!(records[0].error.as_deref(), Some("eof"));
        }
    }

    #[test]
    fn tag_applies_to_all_trees_for_one_call() {
        let timber = Timber::new();
        let (a, b) = (memory(), memory());
        timber.plant(a.clone()).unwrap();
        timber.plant(b.clone()).unwrap();

        timber.tag("Db").warn("slow query", &[]);
        timber.as_tree().warn("untagged", &[]);

        for tree in [a, b] {
            let tags: Vec<_> = tree.records().into_iter().map(|r| r.tag).collect();
            assert_eq!(tags, vec![Some("Db".to_owned()), None]);
        }
    }

    #[test]
    fn tag_is_local_to_the_setting_thread() {
        let timber = Arc::new(Timber::new());
        let memory = memory();
        timber.plant(memory.clone()).unwrap();

        let _ = timber.tag("Main");
        let other = Arc::clone(&timber);
        thread::spawn(move || other.as_tree().info("from worker", &[]))
            .join()
            .unwrap();
        timber.as_tree().info("from main", &[]);

        let tags: Vec<_> = memory.records().into_iter().map(|r| r.tag).collect();
        assert_eq!(tags, vec![None, Some("Main".to_owned())]);
    }

    #[test]
    fn concurrent_plant_and_dispatch() {
        let timber = Arc::new(Timber::new());
        let observer = memory();
        timber.plant(observer.clone()).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let timber = Arc::clone(&timber);
                thread::spawn(move || {
                    for _ in 0..50 {
                        timber.plant(Arc::new(NoopLogSink::new())).unwrap();
                        timber.as_tree().debug("worker %d", &[&i]);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(timber.tree_count(), 201);
        assert_eq!(observer.records().len(), 200);
    }
}

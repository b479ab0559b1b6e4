//! # Forest: the set of planted sinks.
//!
//! Writers serialize on a single mutex and republish an immutable snapshot
//! after every mutation. Readers load the snapshot through [`ArcSwap`] and
//! never touch the lock, so dispatch neither blocks on nor is blocked by
//! plant/uproot.
//!
//! ```text
//! plant / uproot / clear ──► Mutex<Vec<tree>> ──► publish ──► ArcSwap<snapshot>
//!                                                                  │
//!                                       dispatch ◄── load_full ────┘
//! ```
//!
//! Trees are unique by pointer identity: planting the same `Arc` twice keeps
//! one entry, two distinct sinks always both stay planted.
//!
//! Mutation is crate-private. Only [`Timber`](crate::Timber) plants, after it
//! has rejected its own dispatch sink.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arc_swap::ArcSwap;

use crate::{forest::ForestError, log::log_sink::LogSink};

/// Immutable point-in-time view of the planted trees.
pub type Snapshot = Arc<Vec<Arc<dyn LogSink>>>;

pub struct Forest {
    trees: Mutex<Vec<Arc<dyn LogSink>>>,
    snapshot: ArcSwap<Vec<Arc<dyn LogSink>>>,
}

impl Forest {
    pub(crate) fn new() -> Self {
        Self {
            trees: Mutex::new(Vec::new()),
            snapshot: ArcSwap::from_pointee(Vec::new()),
        }
    }

    /// Adds `tree` unless it is already planted.
    pub(crate) fn plant(&self, tree: Arc<dyn LogSink>) {
        let mut trees = self.lock();
        if !contains(&trees, address(&tree)) {
            trees.push(tree);
        }
        self.publish(&trees);
        tracing::debug!(count = trees.len(), "planted tree");
    }

    /// Adds every tree not yet planted and republishes once.
    pub(crate) fn plant_all(&self, new_trees: Vec<Arc<dyn LogSink>>) {
        let mut trees = self.lock();
        for tree in new_trees {
            if !contains(&trees, address(&tree)) {
                trees.push(tree);
            }
        }
        self.publish(&trees);
        tracing::debug!(count = trees.len(), "planted trees");
    }

    /// Removes the tree living at `tree`'s address.
    ///
    /// # Errors
    ///
    /// Returns [`ForestError::NotPlanted`] if no such tree is planted.
    pub(crate) fn uproot<S: LogSink + ?Sized>(&self, tree: &S) -> Result<(), ForestError> {
        let target = tree as *const S as *const ();
        let mut trees = self.lock();
        let position = trees
            .iter()
            .position(|planted| std::ptr::addr_eq(Arc::as_ptr(planted), target))
            .ok_or(ForestError::NotPlanted)?;
        trees.remove(position);
        self.publish(&trees);
        tracing::debug!(count = trees.len(), "uprooted tree");
        Ok(())
    }

    /// Removes every tree.
    pub(crate) fn clear(&self) {
        let mut trees = self.lock();
        trees.clear();
        self.publish(&trees);
        tracing::debug!("uprooted all trees");
    }

    /// Current snapshot, read without locking.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.load_full()
    }

    /// Copy of the planted trees taken under the lock.
    #[must_use]
    pub fn trees(&self) -> Vec<Arc<dyn LogSink>> {
        self.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<dyn LogSink>>> {
        self.trees.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Called with the lock held so snapshots are published in mutation order.
    fn publish(&self, trees: &[Arc<dyn LogSink>]) {
        self.snapshot.store(Arc::new(trees.to_vec()));
    }
}

fn address(tree: &Arc<dyn LogSink>) -> *const () {
    Arc::as_ptr(tree) as *const ()
}

fn contains(trees: &[Arc<dyn LogSink>], target: *const ()) -> bool {
    trees
        .iter()
        .any(|planted| std::ptr::addr_eq(Arc::as_ptr(planted), target))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::MemoryLogSink;
    use std::thread;

    #[test]
    fn plant_is_idempotent_by_identity() {
        let forest = Forest::new();
        let tree: Arc<dyn LogSink> = Arc::new(MemoryLogSink::new());
        forest.plant(Arc::clone(&tree));
        forest.plant(Arc::clone(&tree));
        assert_eq!(forest.len(), 1);
        assert_eq!(forest.snapshot().len(), 1);
    }

    #[test]
    fn distinct_trees_of_same_type_both_stay_planted() {
        let forest = Forest::new();
        let first: Arc<dyn LogSink> = Arc::new(MemoryLogSink::new());
        let second: Arc<dyn LogSink> = Arc::new(MemoryLogSink::new());
        forest.plant_all(vec![first, second]);
        assert_eq!(forest.len(), 2);
    }

    #[test]
    fn snapshot_is_not_affected_by_later_mutation() {
        let forest = Forest::new();
        let tree = Arc::new(MemoryLogSink::new());
        forest.plant(tree.clone());

        let before = forest.snapshot();
        forest.uproot(tree.as_ref()).unwrap();

        assert_eq!(before.len(), 1);
        assert!(forest.snapshot().is_empty());
        assert!(forest.is_empty());
    }

    #[test]
    fn uproot_unknown_tree_fails() {
        let forest = Forest::new();
        forest.plant(Arc::new(MemoryLogSink::new()));
        let stranger = MemoryLogSink::new();
        assert_eq!(forest.uproot(&stranger), Err(ForestError::NotPlanted));
        assert_eq!(forest.len(), 1);
    }

    #[test]
    fn clear_publishes_empty_snapshot() {
        let forest = Forest::new();
        forest.plant(Arc::new(MemoryLogSink::new()));
        forest.clear();
        assert!(forest.snapshot().is_empty());
        assert!(forest.trees().is_empty());
    }

    #[test]
    fn concurrent_plants_are_all_kept() {
        let forest = Arc::new(Forest::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let forest = Arc::clone(&forest);
                thread::spawn(move || {
                    for _ in 0..25 {
                        forest.plant(Arc::new(MemoryLogSink::new()));
                        let _ = forest.snapshot().len();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(forest.len(), 200);
        assert_eq!(forest.snapshot().len(), 200);
    }
}

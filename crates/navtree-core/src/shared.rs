//! Atomically swappable navigation snapshot.
//!
//! Hosts that rebuild on configuration changes keep one [`SharedTree`] and
//! hand out `Arc<NavigationTree>` snapshots to readers:
//! - `current()` only holds the lock long enough to clone the `Arc`
//! - `replace()` swaps in a freshly built tree; readers keep their old snapshot

use std::sync::{Arc, PoisonError, RwLock};

use crate::tree::NavigationTree;

/// Current navigation tree, replaceable as a whole.
#[derive(Debug)]
pub struct SharedTree {
    current: RwLock<Arc<NavigationTree>>,
}

impl SharedTree {
    #[must_use]
    pub fn new(tree: NavigationTree) -> Self {
        Self {
            current: RwLock::new(Arc::new(tree)),
        }
    }

    /// Snapshot of the current tree.
    #[must_use]
    pub fn current(&self) -> Arc<NavigationTree> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Install a rebuilt tree and return the one it replaced.
    pub fn replace(&self, tree: NavigationTree) -> Arc<NavigationTree> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(tree))
    }
}

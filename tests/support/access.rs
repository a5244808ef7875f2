//! Store access capability that counts calls.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use passdig::core::store::{StoreAccess, StoreLocation};

/// Access capability recording every begin and end call.
#[derive(Default)]
pub struct CountingAccess {
    deny: bool,
    begins: AtomicUsize,
    ends: AtomicUsize,
}

impl CountingAccess {
    pub fn granting() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn denying() -> Arc<Self> {
        Arc::new(Self {
            deny: true,
            ..Default::default()
        })
    }

    pub fn begins(&self) -> usize {
        self.begins.load(Ordering::SeqCst)
    }

    pub fn ends(&self) -> usize {
        self.ends.load(Ordering::SeqCst)
    }

    /// Grants that have not been released yet.
    pub fn outstanding(&self) -> usize {
        let granted = if self.deny { 0 } else { self.begins() };
        granted - self.ends()
    }
}

impl StoreAccess for CountingAccess {
    fn begin_access(&self) -> bool {
        self.begins.fetch_add(1, Ordering::SeqCst);
        !self.deny
    }

    fn end_access(&self) {
        self.ends.fetch_add(1, Ordering::SeqCst);
    }
}

/// A location at `root` gated by `access`.
pub fn counted_location(root: &std::path::Path, access: &Arc<CountingAccess>) -> StoreLocation {
    StoreLocation::with_access(root, access.clone())
}

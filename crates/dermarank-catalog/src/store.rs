//! Atomic snapshot store.
//!
//! Refresh is the engine's only mutation point: a new snapshot is built
//! fully off to the side, then published by replacing one pointer. In-flight
//! requests keep the Arc they cloned and see the old snapshot in full until
//! they finish; the old snapshot is dropped when its last reader is done.

use std::sync::{Arc, RwLock};

use crate::snapshot::CatalogSnapshot;

#[derive(Default)]
pub struct CatalogStore {
    current: RwLock<Option<Arc<CatalogSnapshot>>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Publish a fully-built snapshot. The write lock is held only for the
    /// pointer swap.
    pub fn publish(&self, snapshot: CatalogSnapshot) {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(Arc::new(snapshot));
    }

    /// The current snapshot, if any. Callers pin one Arc per request so the
    /// whole request sees a single generation.
    pub fn current(&self) -> Option<Arc<CatalogSnapshot>> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        guard.clone()
    }
}

// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Copy-on-write node store.
//!
//! The store holds one immutable [`Snapshot`] at a time. Writers build a new
//! snapshot (see [`crate::mutation`]) and swap it in with [`NodeStore::replace`];
//! readers holding an older snapshot keep seeing exactly what they cloned.

use std::sync::Arc;

use tracing::{debug, error};

use crate::ident::ElementId;
use crate::invariant::violations;
use crate::record::ElementRecord;

/// Immutable, cheaply clonable view of the flat element collection.
pub type Snapshot = Arc<[ElementRecord]>;

/// Snapshot holding no records.
pub fn empty_snapshot() -> Snapshot {
    Arc::from(Vec::new())
}

/// Owner of the current element collection.
#[derive(Debug, Clone)]
pub struct NodeStore {
    current: Snapshot,
    revision: u64,
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore {
    /// Empty store.
    pub fn new() -> Self {
        Self {
            current: empty_snapshot(),
            revision: 0,
        }
    }

    /// Store seeded with `records` (e.g. a flattened starter layout).
    pub fn from_records(records: Vec<ElementRecord>) -> Self {
        let mut store = Self::new();
        store.replace(Arc::from(records));
        store
    }

    /// Read-only copy of the current collection.
    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.current)
    }

    /// Borrow the current records without bumping the reference count.
    pub fn records(&self) -> &[ElementRecord] {
        &self.current
    }

    /// Number of successful replacements since creation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// True when the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Look up a record by id.
    pub fn get(&self, id: &ElementId) -> Option<&ElementRecord> {
        self.current.iter().find(|rec| &rec.id == id)
    }

    /// True when a record with `id` exists.
    pub fn contains(&self, id: &ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Swap in a new collection.
    ///
    /// Returns `false` (and keeps the revision) when `next` is the snapshot
    /// already held, which is how no-op mutations come back.
    pub fn replace(&mut self, next: Snapshot) -> bool {
        if Arc::ptr_eq(&self.current, &next) {
            return false;
        }
        if cfg!(debug_assertions) {
            for violation in violations(&next) {
                error!(%violation, "node store invariant violated");
            }
        }
        self.current = next;
        self.revision += 1;
        debug!(revision = self.revision, records = self.current.len(), "node store replaced");
        true
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::record::ElementKind;

    fn rec(id: &str) -> ElementRecord {
        ElementRecord::new(id, ElementKind::Container)
    }

    #[test]
    fn snapshots_are_isolated_from_later_replacements() {
        let mut store = NodeStore::from_records(vec![rec("a")]);
        let before = store.snapshot();
        assert!(store.replace(Arc::from(vec![rec("a"), rec("b")])));
        assert_eq!(before.len(), 1);
        assert_eq!(store.len(), 2);
        assert!(store.contains(&ElementId::from("b")));
    }

    #[test]
    fn replacing_with_the_same_snapshot_is_not_a_change() {
        let mut store = NodeStore::from_records(vec![rec("a")]);
        let rev = store.revision();
        let same = store.snapshot();
        assert!(!store.replace(same));
        assert_eq!(store.revision(), rev);
    }

    #[test]
    fn new_store_is_empty() {
        let store = NodeStore::default();
        assert!(store.is_empty());
        assert_eq!(store.revision(), 0);
        assert!(store.get(&ElementId::from("missing")).is_none());
    }
}

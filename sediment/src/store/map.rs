use crate::collection::{DocId, Document};
use im::OrdMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// The backing map of a single collection.
///
/// Documents are held in an `im::OrdMap` keyed by id; structural sharing
/// makes [CollectionMap::snapshot] an O(1) clone, so reads iterate a stable
/// view while writers keep mutating the live map.
#[derive(Clone, Default)]
pub(crate) struct CollectionMap {
    inner: Arc<RwLock<OrdMap<DocId, Document>>>,
}

impl CollectionMap {
    pub fn new() -> Self {
        CollectionMap {
            inner: Arc::new(RwLock::new(OrdMap::new())),
        }
    }

    /// Returns a point-in-time snapshot of the collection.
    pub fn snapshot(&self) -> OrdMap<DocId, Document> {
        self.inner.read().clone()
    }

    /// Inserts the document only when the id is not yet present.
    ///
    /// Returns `false` when the id already exists.
    pub fn put_if_absent(&self, id: DocId, doc: Document) -> bool {
        let mut map = self.inner.write();
        if map.contains_key(&id) {
            return false;
        }
        map.insert(id, doc);
        true
    }

    /// Inserts or replaces the document under the given id.
    pub fn replace(&self, id: DocId, doc: Document) {
        self.inner.write().insert(id, doc);
    }

    /// Removes and returns the document under the given id.
    pub fn remove(&self, id: &DocId) -> Option<Document> {
        self.inner.write().remove(id)
    }

    pub fn contains(&self, id: &DocId) -> bool {
        self.inner.read().contains_key(id)
    }

    pub fn clear(&self) {
        *self.inner.write() = OrdMap::new();
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }
}

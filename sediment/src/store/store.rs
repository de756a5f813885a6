use crate::store::CollectionMap;
use dashmap::DashMap;

/// The registry of named collections.
///
/// Collection maps are created on first access and shared by handle; two
/// lookups of the same name see the same documents.
#[derive(Default)]
pub(crate) struct DocumentStore {
    collections: DashMap<String, CollectionMap>,
}

impl DocumentStore {
    pub fn new() -> Self {
        DocumentStore {
            collections: DashMap::new(),
        }
    }

    /// Opens the named collection, creating it when absent.
    pub fn collection(&self, name: &str) -> CollectionMap {
        self.collections
            .entry(name.to_string())
            .or_default()
            .clone()
    }

    pub fn collection_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .collections
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    pub fn has_collection(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    /// Drops the named collection and its documents.
    ///
    /// Returns `false` when no such collection exists. Handles already
    /// pointing at the dropped collection keep an empty map.
    pub fn drop_collection(&self, name: &str) -> bool {
        match self.collections.remove(name) {
            Some((_, map)) => {
                map.clear();
                true
            }
            None => false,
        }
    }

    /// Drops every collection.
    pub fn clear(&self) {
        let names = self.collection_names();
        for name in names {
            self.drop_collection(&name);
        }
    }
}

use crate::collection::Collection;
use crate::common::LockRegistry;
use crate::errors::{ErrorKind, SedimentError, SedimentResult};
use crate::store::DocumentStore;
use std::sync::Arc;

/// The top-level database handle.
///
/// A `Database` owns the document store and the per-collection lock
/// registry. It is a cheap-to-clone handle; every clone operates on the
/// same collections.
///
/// # Examples
///
/// ```rust,ignore
/// use sediment::db::Database;
///
/// let db = Database::new();
/// let restaurants = db.collection("restaurants")?;
/// restaurants.insert(doc! { "name": "Juni" })?;
/// assert_eq!(db.collection_names(), vec!["restaurants"]);
/// ```
#[derive(Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

struct DatabaseInner {
    store: Arc<DocumentStore>,
    lock_registry: LockRegistry,
}

impl Database {
    /// Creates an empty database.
    pub fn new() -> Self {
        Database {
            inner: Arc::new(DatabaseInner {
                store: Arc::new(DocumentStore::new()),
                lock_registry: LockRegistry::new(),
            }),
        }
    }

    /// Opens the named collection, creating it when absent.
    ///
    /// # Errors
    ///
    /// Fails with [ErrorKind::ValidationError] when the name is empty.
    pub fn collection(&self, name: &str) -> SedimentResult<Collection> {
        if name.trim().is_empty() {
            log::error!("collection name cannot be empty");
            return Err(SedimentError::new(
                "collection name cannot be empty",
                ErrorKind::ValidationError,
            ));
        }
        let lock = self.inner.lock_registry.get_lock(name);
        Ok(Collection::new(name, self.inner.store.clone(), lock))
    }

    /// Returns the names of all collections, sorted.
    pub fn collection_names(&self) -> Vec<String> {
        self.inner.store.collection_names()
    }

    /// Drops the named collection. Returns `false` when it does not exist.
    pub fn drop_collection(&self, name: &str) -> bool {
        let dropped = self.inner.store.drop_collection(name);
        if dropped {
            self.inner.lock_registry.remove_lock(name);
        }
        dropped
    }

    /// Drops every collection in the database.
    pub fn drop_database(&self) {
        for name in self.collection_names() {
            self.drop_collection(&name);
        }
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

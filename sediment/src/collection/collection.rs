use crate::collection::operation::{ReadOperations, WriteOperations};
use crate::collection::{Document, FindOptions, UpdateOptions, WriteResult};
use crate::common::stream::DocumentCursor;
use crate::common::LockHandle;
use crate::errors::{ErrorKind, SedimentError, SedimentResult};
use crate::filter::Filter;
use crate::pipeline::PipelineStage;
use crate::store::{CollectionMap, DocumentStore};
use crate::update::UpdateSpec;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A named collection of documents.
///
/// A collection is a handle; cloning it is cheap and every clone sees the
/// same documents. Reads run against a snapshot of the collection taken
/// when the cursor is created, writes serialize on a per-collection lock.
///
/// # Examples
///
/// ```rust,ignore
/// use sediment::db::Database;
/// use sediment::filter::field;
///
/// let db = Database::new();
/// let restaurants = db.collection("restaurants")?;
/// restaurants.insert(doc! { "name": "Juni", "borough": "Manhattan" })?;
/// let mut cursor = restaurants.find(field("borough").eq("Manhattan"))?;
/// ```
#[derive(Clone)]
pub struct Collection {
    inner: Arc<CollectionInner>,
}

impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.inner.name)
            .finish_non_exhaustive()
    }
}

struct CollectionInner {
    name: String,
    map: CollectionMap,
    store: Arc<DocumentStore>,
    read_ops: ReadOperations,
    write_ops: WriteOperations,
    dropped: AtomicBool,
}

impl Collection {
    pub(crate) fn new(name: &str, store: Arc<DocumentStore>, lock: LockHandle) -> Self {
        let map = store.collection(name);
        Collection {
            inner: Arc::new(CollectionInner {
                name: name.to_string(),
                map: map.clone(),
                store,
                read_ops: ReadOperations::new(map.clone()),
                write_ops: WriteOperations::new(map, lock),
                dropped: AtomicBool::new(false),
            }),
        }
    }

    /// Returns the name of the collection.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns the number of documents in the collection.
    pub fn size(&self) -> usize {
        self.inner.map.len()
    }

    /// Inserts a document, assigning an `_id` when absent.
    ///
    /// # Errors
    ///
    /// Fails with [ErrorKind::DuplicateKey] when a document with the same
    /// `_id` already exists.
    pub fn insert(&self, doc: Document) -> SedimentResult<WriteResult> {
        self.ensure_open()?;
        self.inner.write_ops.insert(doc)
    }

    /// Inserts a batch of documents as a unit.
    ///
    /// The whole batch is rejected when any id collides, either with an
    /// existing document or within the batch itself.
    pub fn insert_many(&self, docs: Vec<Document>) -> SedimentResult<WriteResult> {
        self.ensure_open()?;
        self.inner.write_ops.insert_many(docs)
    }

    /// Replaces the document with the same `_id`, inserting when absent.
    pub fn save(&self, doc: Document) -> SedimentResult<WriteResult> {
        self.ensure_open()?;
        self.inner.write_ops.save(doc)
    }

    /// Finds all documents matching the filter.
    pub fn find(&self, filter: Filter) -> SedimentResult<DocumentCursor> {
        self.find_with_options(filter, &FindOptions::new())
    }

    /// Finds matching documents with ordering and limit applied.
    pub fn find_with_options(
        &self,
        filter: Filter,
        options: &FindOptions,
    ) -> SedimentResult<DocumentCursor> {
        self.ensure_open()?;
        self.inner.read_ops.find(filter, options)
    }

    /// Executes an aggregation pipeline over the collection.
    pub fn aggregate(&self, stages: Vec<PipelineStage>) -> SedimentResult<DocumentCursor> {
        self.ensure_open()?;
        self.inner.read_ops.aggregate(stages)
    }

    /// Updates documents matching the filter.
    ///
    /// Default options update at most the first match in id order; clear
    /// `options.just_once()` to update every match. Zero matches is a
    /// success with an empty result, unless `options.insert_if_absent()`
    /// requests an upsert.
    pub fn update(
        &self,
        filter: Filter,
        spec: &UpdateSpec,
        options: &UpdateOptions,
    ) -> SedimentResult<WriteResult> {
        self.ensure_open()?;
        self.inner.write_ops.update(filter, spec, options)
    }

    /// Removes documents matching the filter.
    pub fn remove(&self, filter: Filter, just_once: bool) -> SedimentResult<WriteResult> {
        self.ensure_open()?;
        self.inner.write_ops.remove(filter, just_once)
    }

    /// Removes every document in the collection.
    pub fn remove_all(&self) -> SedimentResult<WriteResult> {
        self.ensure_open()?;
        self.inner.write_ops.remove_all()
    }

    /// Drops the collection and its documents.
    ///
    /// Further operations through this handle fail with
    /// [ErrorKind::InvalidOperation].
    pub fn drop(&self) -> SedimentResult<()> {
        self.ensure_open()?;
        self.inner.dropped.store(true, Ordering::Relaxed);
        self.inner.store.drop_collection(&self.inner.name);
        Ok(())
    }

    fn ensure_open(&self) -> SedimentResult<()> {
        if self.inner.dropped.load(Ordering::Relaxed) {
            log::error!(
                "collection '{}' is dropped and cannot be accessed",
                self.inner.name
            );
            return Err(SedimentError::new(
                format!(
                    "collection '{}' is dropped and cannot be accessed",
                    self.inner.name
                ),
                ErrorKind::InvalidOperation,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Value;
    use crate::doc;
    use crate::filter::{all, field};

    fn test_collection(name: &str) -> Collection {
        Collection::new(name, Arc::new(DocumentStore::new()), LockHandle::new())
    }

    #[test]
    fn test_insert_and_find() {
        let collection = test_collection("restaurants");
        collection
            .insert(doc! { "name": "Juni", "borough": "Manhattan" })
            .unwrap();
        collection
            .insert(doc! { "name": "Vella", "borough": "Brooklyn" })
            .unwrap();

        let mut cursor = collection.find(field("borough").eq("Brooklyn")).unwrap();
        let docs = cursor.to_vec().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].get("name").unwrap(), Value::from("Vella"));
    }

    #[test]
    fn test_inserted_id_is_stable() {
        let collection = test_collection("restaurants");
        let result = collection.insert(doc! { "name": "Juni" }).unwrap();
        let id = result.affected_ids()[0];

        let mut cursor = collection.find(all()).unwrap();
        let mut found = cursor.first().unwrap().unwrap();
        assert_eq!(found.id().unwrap(), id);
    }

    #[test]
    fn test_clones_share_documents() {
        let collection = test_collection("restaurants");
        let alias = collection.clone();
        collection.insert(doc! { "name": "Juni" }).unwrap();
        assert_eq!(alias.size(), 1);
    }

    #[test]
    fn test_dropped_collection_rejects_operations() {
        let collection = test_collection("restaurants");
        collection.insert(doc! { "name": "Juni" }).unwrap();
        collection.drop().unwrap();

        let err = collection.insert(doc! { "name": "Vella" }).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
        let err = collection.find(all()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }
}

use crate::collection::{DocId, Document, UpdateOptions, WriteResult};
use crate::common::constants::POSITIONAL_MARKER;
use crate::common::{constants::FIELD_SEPARATOR, LockHandle};
use crate::errors::{ErrorKind, SedimentError, SedimentResult};
use crate::filter::Filter;
use crate::store::CollectionMap;
use crate::update::{self, UpdateSpec};

/// Write-side operations of a collection.
///
/// Every mutation runs under the collection's write lock. Multi-document
/// mutations transform every matched document first and commit afterwards,
/// so a failing operator leaves no partial state behind.
#[derive(Clone)]
pub(crate) struct WriteOperations {
    map: CollectionMap,
    lock: LockHandle,
}

impl WriteOperations {
    pub fn new(map: CollectionMap, lock: LockHandle) -> Self {
        WriteOperations { map, lock }
    }

    pub fn insert(&self, mut doc: Document) -> SedimentResult<WriteResult> {
        let id = doc.id()?;
        let _guard = self.lock.write();
        self.insert_locked(id, doc)?;
        Ok(WriteResult::new(vec![id]))
    }

    pub fn insert_many(&self, docs: Vec<Document>) -> SedimentResult<WriteResult> {
        let mut keyed = Vec::with_capacity(docs.len());
        for mut doc in docs {
            let id = doc.id()?;
            keyed.push((id, doc));
        }

        let _guard = self.lock.write();
        // reject the whole batch before touching the map
        for (index, (id, _)) in keyed.iter().enumerate() {
            let duplicate_in_batch = keyed[..index].iter().any(|(other, _)| other == id);
            if duplicate_in_batch || self.map.contains(id) {
                log::error!("duplicate _id {} in insert batch", id);
                return Err(SedimentError::new(
                    format!("a document with _id {} already exists", id),
                    ErrorKind::DuplicateKey,
                ));
            }
        }

        let mut ids = Vec::with_capacity(keyed.len());
        for (id, doc) in keyed {
            self.map.replace(id, doc);
            ids.push(id);
        }
        Ok(WriteResult::new(ids))
    }

    pub fn save(&self, mut doc: Document) -> SedimentResult<WriteResult> {
        let id = doc.id()?;
        let _guard = self.lock.write();
        self.map.replace(id, doc);
        Ok(WriteResult::new(vec![id]))
    }

    pub fn update(
        &self,
        filter: Filter,
        spec: &UpdateSpec,
        options: &UpdateOptions,
    ) -> SedimentResult<WriteResult> {
        let _guard = self.lock.write();
        let matches = self.matches_locked(&filter, options.just_once())?;

        if matches.is_empty() {
            if options.insert_if_absent() {
                let id = self.upsert_locked(&filter, spec)?;
                return Ok(WriteResult::upserted(id));
            }
            return Ok(WriteResult::new(Vec::new()));
        }

        // transform everything first; a failing operator aborts before any
        // document is written back
        let mut updated = Vec::with_capacity(matches.len());
        for (id, doc) in &matches {
            let transformed = update::apply(doc, spec, Some(&filter))?;
            updated.push((*id, transformed));
        }

        let mut ids = Vec::with_capacity(updated.len());
        for (id, doc) in updated {
            self.map.replace(id, doc);
            ids.push(id);
        }
        Ok(WriteResult::new(ids))
    }

    pub fn remove(&self, filter: Filter, just_once: bool) -> SedimentResult<WriteResult> {
        let _guard = self.lock.write();
        let matches = self.matches_locked(&filter, just_once)?;
        let mut ids = Vec::with_capacity(matches.len());
        for (id, _) in matches {
            self.map.remove(&id);
            ids.push(id);
        }
        Ok(WriteResult::new(ids))
    }

    pub fn remove_all(&self) -> SedimentResult<WriteResult> {
        let _guard = self.lock.write();
        let ids: Vec<DocId> = self.map.snapshot().keys().copied().collect();
        self.map.clear();
        Ok(WriteResult::new(ids))
    }

    fn insert_locked(&self, id: DocId, doc: Document) -> SedimentResult<()> {
        if !self.map.put_if_absent(id, doc) {
            log::error!("a document with _id {} already exists", id);
            return Err(SedimentError::new(
                format!("a document with _id {} already exists", id),
                ErrorKind::DuplicateKey,
            ));
        }
        Ok(())
    }

    // store order is id order, which makes just_once deterministic
    fn matches_locked(
        &self,
        filter: &Filter,
        just_once: bool,
    ) -> SedimentResult<Vec<(DocId, Document)>> {
        let mut matches = Vec::new();
        for (id, doc) in self.map.snapshot() {
            if filter.apply(&doc)? {
                matches.push((id, doc));
                if just_once {
                    break;
                }
            }
        }
        Ok(matches)
    }

    /// Synthesizes and inserts a document from the filter's equality leaves
    /// merged with the spec's set effects.
    fn upsert_locked(&self, filter: &Filter, spec: &UpdateSpec) -> SedimentResult<DocId> {
        let mut doc = Document::new();
        for leaf in filter.leaves() {
            if let (Some(field), Some(value)) = (leaf.field_name(), leaf.equality_value()) {
                doc.put(field.as_str(), value)?;
            }
        }
        for (path, value) in spec.set_effects() {
            if path
                .split(FIELD_SEPARATOR)
                .any(|segment| segment == POSITIONAL_MARKER)
            {
                log::error!("positional path {} cannot seed an upsert", path);
                return Err(SedimentError::new(
                    format!("positional path {} cannot seed an upsert", path),
                    ErrorKind::PositionalMatchRequired,
                ));
            }
            doc.put(path, value.clone())?;
        }
        let id = doc.id()?;
        self.insert_locked(id, doc)?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::upsert_options;
    use crate::common::Value;
    use crate::doc;
    use crate::filter::{all, by_id, field};

    fn empty_ops() -> WriteOperations {
        WriteOperations::new(CollectionMap::new(), LockHandle::new())
    }

    #[test]
    fn test_insert_assigns_id() {
        let ops = empty_ops();
        let result = ops.insert(doc! { "name": "Juni" }).unwrap();
        assert_eq!(result.affected_count(), 1);
        assert_eq!(ops.map.len(), 1);
    }

    #[test]
    fn test_insert_duplicate_id_fails() {
        let ops = empty_ops();
        let mut doc = doc! { "name": "Juni" };
        let id = doc.id().unwrap();
        ops.insert(doc.clone()).unwrap();

        let err = ops.insert(doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateKey);
        assert!(ops.map.contains(&id));
    }

    #[test]
    fn test_insert_many_is_atomic() {
        let ops = empty_ops();
        let mut existing = doc! { "name": "Juni" };
        let id = existing.id().unwrap();
        ops.insert(existing.clone()).unwrap();

        let err = ops
            .insert_many(vec![doc! { "name": "Vella" }, existing])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateKey);
        assert_eq!(ops.map.len(), 1);
        assert!(ops.map.contains(&id));
    }

    #[test]
    fn test_save_replaces_by_id() {
        let ops = empty_ops();
        let mut doc = doc! { "name": "Juni" };
        let id = doc.id().unwrap();
        ops.insert(doc.clone()).unwrap();

        doc.put("borough", "Manhattan").unwrap();
        ops.save(doc).unwrap();
        assert_eq!(ops.map.len(), 1);
        let saved = ops.map.snapshot().get(&id).cloned().unwrap();
        assert_eq!(saved.get("borough").unwrap(), Value::from("Manhattan"));
    }

    #[test]
    fn test_update_all_matches() {
        let ops = empty_ops();
        ops.insert(doc! { "cuisine": "Irish", "borough": "Queens" })
            .unwrap();
        ops.insert(doc! { "cuisine": "Irish", "borough": "Bronx" })
            .unwrap();
        ops.insert(doc! { "cuisine": "Thai", "borough": "Queens" })
            .unwrap();

        let spec = UpdateSpec::new().set("beer", "Guinness");
        let options = UpdateOptions::new().with_just_once(false);
        let result = ops
            .update(field("cuisine").eq("Irish"), &spec, &options)
            .unwrap();
        assert_eq!(result.affected_count(), 2);

        for (_, doc) in ops.map.snapshot() {
            let expected = doc.get("cuisine").unwrap() == Value::from("Irish");
            assert_eq!(doc.lookup("beer").unwrap().is_some(), expected);
        }
    }

    #[test]
    fn test_update_default_is_single_match() {
        let ops = empty_ops();
        ops.insert(doc! { "cuisine": "Irish" }).unwrap();
        ops.insert(doc! { "cuisine": "Irish" }).unwrap();

        let spec = UpdateSpec::new().set("beer", "Guinness");
        let result = ops
            .update(field("cuisine").eq("Irish"), &spec, &UpdateOptions::new())
            .unwrap();
        assert_eq!(result.affected_count(), 1);

        let updated = ops
            .map
            .snapshot()
            .iter()
            .filter(|(_, doc)| doc.lookup("beer").unwrap().is_some())
            .count();
        assert_eq!(updated, 1);
    }

    #[test]
    fn test_update_zero_matches_is_success() {
        let ops = empty_ops();
        let spec = UpdateSpec::new().set("beer", "Guinness");
        let result = ops
            .update(field("cuisine").eq("Irish"), &spec, &UpdateOptions::new())
            .unwrap();
        assert_eq!(result.affected_count(), 0);
        assert!(result.upserted_id().is_none());
    }

    #[test]
    fn test_upsert_synthesizes_from_filter_and_set() {
        let ops = empty_ops();
        let filter = field("name").eq("Ozzy").and(field("country").eq("Australia"));
        let spec = UpdateSpec::new().set("beer", "Victoria Bitter");
        let result = ops.update(filter, &spec, &upsert_options()).unwrap();

        let id = result.upserted_id().unwrap();
        let doc = ops.map.snapshot().get(&id).cloned().unwrap();
        assert_eq!(doc.get("name").unwrap(), Value::from("Ozzy"));
        assert_eq!(doc.get("country").unwrap(), Value::from("Australia"));
        assert_eq!(doc.get("beer").unwrap(), Value::from("Victoria Bitter"));
    }

    #[test]
    fn test_upsert_set_overrides_filter_literal() {
        let ops = empty_ops();
        let filter = field("name").eq("Ozzy");
        let spec = UpdateSpec::new().set("name", "Ozzy Osbourne");
        let result = ops.update(filter, &spec, &upsert_options()).unwrap();

        let id = result.upserted_id().unwrap();
        let doc = ops.map.snapshot().get(&id).cloned().unwrap();
        assert_eq!(doc.get("name").unwrap(), Value::from("Ozzy Osbourne"));
    }

    #[test]
    fn test_failed_update_leaves_no_partial_state() {
        let ops = empty_ops();
        ops.insert(doc! { "cuisine": "Irish", "violations": 2 })
            .unwrap();
        ops.insert(doc! { "cuisine": "Irish", "violations": "many" })
            .unwrap();

        let spec = UpdateSpec::new().inc("violations", 1);
        let options = UpdateOptions::new().with_just_once(false);
        let err = ops
            .update(field("cuisine").eq("Irish"), &spec, &options)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);

        for (_, doc) in ops.map.snapshot() {
            let violations = doc.get("violations").unwrap();
            assert!(violations == Value::I32(2) || violations == Value::from("many"));
        }
    }

    #[test]
    fn test_remove_by_filter() {
        let ops = empty_ops();
        ops.insert(doc! { "borough": "Queens" }).unwrap();
        ops.insert(doc! { "borough": "Brooklyn" }).unwrap();
        ops.insert(doc! { "borough": "Queens" }).unwrap();

        let result = ops.remove(field("borough").eq("Queens"), false).unwrap();
        assert_eq!(result.affected_count(), 2);
        assert_eq!(ops.map.len(), 1);
    }

    #[test]
    fn test_remove_just_once() {
        let ops = empty_ops();
        ops.insert(doc! { "borough": "Queens" }).unwrap();
        ops.insert(doc! { "borough": "Queens" }).unwrap();

        let result = ops.remove(field("borough").eq("Queens"), true).unwrap();
        assert_eq!(result.affected_count(), 1);
        assert_eq!(ops.map.len(), 1);
    }

    #[test]
    fn test_remove_all() {
        let ops = empty_ops();
        ops.insert(doc! { "a": 1 }).unwrap();
        ops.insert(doc! { "b": 2 }).unwrap();

        let result = ops.remove_all().unwrap();
        assert_eq!(result.affected_count(), 2);
        assert_eq!(ops.map.len(), 0);
    }

    #[test]
    fn test_remove_by_id_filter() {
        let ops = empty_ops();
        let mut doc = doc! { "name": "Juni" };
        let id = doc.id().unwrap();
        ops.insert(doc).unwrap();
        ops.insert(doc! { "name": "Vella" }).unwrap();

        let result = ops.remove(by_id(id), false).unwrap();
        assert_eq!(result.affected_ids(), &[id]);
        assert_eq!(ops.map.len(), 1);
    }

    #[test]
    fn test_remove_all_filter_matches_everything() {
        let ops = empty_ops();
        ops.insert(doc! { "a": 1 }).unwrap();
        let result = ops.remove(all(), false).unwrap();
        assert_eq!(result.affected_count(), 1);
    }
}

use crate::collection::DocId;
use std::fmt::Display;

/// The result of a write operation on a collection.
///
/// Holds the ids of the documents affected by an insert, update, or remove.
/// For an upsert that inserted a new document, [WriteResult::upserted_id]
/// carries the id of the synthesized document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteResult {
    doc_ids: Vec<DocId>,
    upserted_id: Option<DocId>,
}

impl WriteResult {
    pub fn new(doc_ids: Vec<DocId>) -> Self {
        WriteResult {
            doc_ids,
            upserted_id: None,
        }
    }

    pub(crate) fn upserted(doc_id: DocId) -> Self {
        WriteResult {
            doc_ids: vec![doc_id],
            upserted_id: Some(doc_id),
        }
    }

    /// Returns the number of documents affected by the write.
    pub fn affected_count(&self) -> usize {
        self.doc_ids.len()
    }

    /// Returns the ids of the affected documents.
    pub fn affected_ids(&self) -> &[DocId] {
        &self.doc_ids
    }

    /// Returns the id of the document inserted by an upsert, if any.
    pub fn upserted_id(&self) -> Option<DocId> {
        self.upserted_id
    }
}

impl Display for WriteResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WriteResult{{affected: {}}}", self.doc_ids.len())
    }
}

impl IntoIterator for WriteResult {
    type Item = DocId;
    type IntoIter = std::vec::IntoIter<DocId>;

    fn into_iter(self) -> Self::IntoIter {
        self.doc_ids.into_iter()
    }
}

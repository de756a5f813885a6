use crate::collection::Document;
use crate::errors::SedimentResult;

/// A lazily evaluated cursor over the documents produced by a find or an
/// aggregation. Results are cached as they are pulled, so the cursor can be
/// reset and iterated again without re-running the query.
pub struct DocumentCursor {
    underlying: Option<Box<dyn Iterator<Item = SedimentResult<Document>>>>,
    cache: Vec<SedimentResult<Document>>,
    current_index: usize,
}

impl std::fmt::Debug for DocumentCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentCursor")
            .field("cache", &self.cache)
            .field("current_index", &self.current_index)
            .finish_non_exhaustive()
    }
}

impl DocumentCursor {
    pub(crate) fn new(iter: Box<dyn Iterator<Item = SedimentResult<Document>>>) -> Self {
        DocumentCursor {
            underlying: Some(iter),
            cache: Vec::new(),
            current_index: 0,
        }
    }

    /// Resets the cursor so that it can be iterated from the beginning.
    pub fn reset(&mut self) {
        self.current_index = 0;
    }

    /// Returns the total number of documents, draining the underlying
    /// iterator if it has not been exhausted yet.
    pub fn size(&mut self) -> usize {
        // If the underlying iterator is already exhausted,
        // then no need to iterate again.
        if self.underlying.is_none() {
            self.reset();
            return self.cache.len();
        }
        // Otherwise, iterate through the remaining items.
        for _ in self.by_ref() {}
        self.reset();
        self.cache.len()
    }

    /// Returns the first document, resetting the cursor beforehand.
    pub fn first(&mut self) -> Option<SedimentResult<Document>> {
        self.reset();
        self.next()
    }

    /// Collects all remaining documents into a vector, failing on the first error.
    pub fn to_vec(&mut self) -> SedimentResult<Vec<Document>> {
        self.collect()
    }
}

impl Iterator for DocumentCursor {
    type Item = SedimentResult<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        // If we have cached items, return the next one.
        if self.current_index < self.cache.len() {
            let result = self.cache[self.current_index].clone();
            self.current_index += 1;
            return Some(result);
        }

        // Otherwise, try to pull from the underlying iterator.
        if let Some(ref mut iter) = self.underlying {
            if let Some(item) = iter.next() {
                self.cache.push(item.clone());
                self.current_index += 1;
                return Some(item);
            }
            // Once exhausted, drop the underlying iterator.
            self.underlying = None;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;
    use crate::errors::{ErrorKind, SedimentError};

    fn create_document(first: &str, last: &str) -> Document {
        doc! {
            "first": first,
            "last": last,
        }
    }

    #[test]
    fn test_new_document_cursor() {
        let docs = vec![
            Ok(create_document("John", "Doe")),
            Ok(create_document("Jane", "Doe")),
        ];
        let iter = Box::new(docs.into_iter());
        let cursor = DocumentCursor::new(iter);
        assert_eq!(cursor.count(), 2);
    }

    #[test]
    fn test_next() {
        let docs = [
            Ok(create_document("John", "Doe")),
            Ok(create_document("Jane", "Doe")),
        ];
        let iter = Box::new(docs.into_iter());
        let mut cursor = DocumentCursor::new(iter);
        assert_eq!(
            cursor
                .next()
                .unwrap()
                .unwrap()
                .get("first")
                .unwrap()
                .as_string()
                .unwrap(),
            "John"
        );
        assert_eq!(
            cursor
                .next()
                .unwrap()
                .unwrap()
                .get("first")
                .unwrap()
                .as_string()
                .unwrap(),
            "Jane"
        );
        assert!(cursor.next().is_none());
    }

    #[test]
    fn test_next_with_error() {
        let docs = [
            Ok(create_document("John", "Doe")),
            Err(SedimentError::new("Test Error", ErrorKind::InternalError)),
        ];
        let iter = Box::new(docs.into_iter());
        let mut cursor = DocumentCursor::new(iter);
        assert!(cursor.next().unwrap().is_ok());
        assert!(cursor.next().unwrap().is_err());
    }

    #[test]
    fn test_first() {
        let docs = [
            Ok(create_document("John", "Doe")),
            Ok(create_document("Jane", "Doe")),
        ];
        let iter = Box::new(docs.into_iter());
        let mut cursor = DocumentCursor::new(iter);
        assert_eq!(
            cursor
                .first()
                .unwrap()
                .unwrap()
                .get("first")
                .unwrap()
                .as_string()
                .unwrap(),
            "John"
        );
    }

    #[test]
    fn test_size_then_reset() {
        let docs = vec![
            Ok(create_document("John", "Doe")),
            Ok(create_document("Jane", "Doe")),
        ];
        let iter = Box::new(docs.into_iter());
        let mut cursor = DocumentCursor::new(iter);
        assert_eq!(cursor.size(), 2);
        // size() resets, the full result set should still be available
        assert_eq!(cursor.by_ref().count(), 2);
        cursor.reset();
        assert_eq!(cursor.size(), 2);
    }

    #[test]
    fn test_to_vec() {
        let docs = vec![
            Ok(create_document("John", "Doe")),
            Ok(create_document("Jane", "Doe")),
        ];
        let iter = Box::new(docs.into_iter());
        let mut cursor = DocumentCursor::new(iter);
        let collected = cursor.to_vec().unwrap();
        assert_eq!(collected.len(), 2);
    }
}

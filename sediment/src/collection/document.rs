use im::OrdMap;
use smallvec::SmallVec;

use crate::collection::doc_id::DocId;
use crate::common::constants::{DOC_ID, FIELD_SEPARATOR};
use crate::common::Value;
use crate::errors::{ErrorKind, SedimentError, SedimentResult};
use itertools::Itertools;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};

type FieldVec = SmallVec<[String; 8]>;

/// Represents a document in Sediment using a lock-free persistent data structure.
///
/// Sediment documents are composed of key-value pairs. The key is always a
/// [String] and value is a [Value].
///
/// Documents support nesting. The key of a nested field is a [String] with path
/// segments separated by `.`. For example, if a document holds `{"a": {"b": 1}}`,
/// the nested value can be retrieved by calling `document.get("a.b")`. A numeric
/// segment indexes into an array, so `"items.0"` reads the first array element.
///
/// The `_id` field holds the unique identifier of the document. If not provided,
/// Sediment will generate a unique [DocId] for the document during insertion.
///
/// ## Lock-Free Design
///
/// This struct uses `im::OrdMap` (a persistent ordered map) for lock-free operation:
/// - O(1) cloning via internal Arc sharing
/// - Mutations create new maps via structural sharing
/// - Each mutated document is completely independent
#[derive(Clone, Eq, PartialEq, Hash, Default, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    /// Persistent ordered map: O(1) clone via internal Arc, O(log n) mutations
    data: OrdMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: OrdMap::new(),
        }
    }

    /// Checks if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Associates the specified [Value] with the specified key in this document.
    ///
    /// This method inserts a key-value pair into the document. If the key already exists,
    /// its value is updated. The method supports both top-level and embedded keys
    /// (e.g., `"user.name"` or `"location.address.zip"`). Intermediate nested documents
    /// are created as needed; a numeric segment writes into an existing array.
    ///
    /// # Arguments
    ///
    /// * `key` - The key as a string or string slice. Cannot be empty.
    /// * `value` - The value to associate with the key. Can be any type that implements
    ///   `Into<Value>` (primitives, strings, documents, arrays, etc.).
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty, or if a numeric segment indexes
    /// outside the bounds of an existing array.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut doc = Document::new();
    /// doc.put("name", "Alice")?;
    /// doc.put("address.zip", 10001)?;
    /// assert_eq!(doc.get("address.zip")?, Value::I32(10001));
    /// ```
    pub fn put<'a, T: Into<Value>>(
        &mut self,
        key: impl Into<Cow<'a, str>>,
        value: T,
    ) -> SedimentResult<()> {
        let key = key.into();
        // key cannot be empty
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(SedimentError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        let value = value.into();

        // if field name contains field separator, split the fields, and put the value
        // accordingly associated with the embedded field.
        if key.contains(FIELD_SEPARATOR) {
            let splits: Vec<&str> = key.split(FIELD_SEPARATOR).collect();
            self.deep_put(&splits, value)
        } else {
            self.data = self.data.update(key.to_string(), value);
            Ok(())
        }
    }

    /// Returns the [Value] to which the specified key is associated, or [Value::Null]
    /// if this document contains no mapping for the key.
    ///
    /// The method supports both top-level and embedded keys (e.g., `"location.address.zip"`).
    /// When a non-numeric segment is applied to an array of documents, the lookup
    /// decomposes the array and gathers the matching sub-values from every element.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to look up as a string slice.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let doc = doc!{ "items": [1, 2, 3], "location": { "zip": 10001 } };
    /// assert_eq!(doc.get("items.0")?, Value::I32(1));
    /// assert_eq!(doc.get("location.zip")?, Value::I32(10001));
    /// assert_eq!(doc.get("missing")?, Value::Null);
    /// ```
    pub fn get(&self, key: &str) -> SedimentResult<Value> {
        match self.data.get(key) {
            Some(value) => Ok(value.clone()),
            None => {
                // Only check for embedded key if not found at top level
                if key.contains(FIELD_SEPARATOR) {
                    self.deep_get(key)
                } else {
                    Ok(Value::Null)
                }
            }
        }
    }

    /// Looks up a path and distinguishes a missing field from an explicit null.
    ///
    /// Returns `None` when the path does not resolve to any value. This is what
    /// existence checks and projection expressions need; [Document::get] folds
    /// both cases into [Value::Null].
    pub fn lookup(&self, key: &str) -> SedimentResult<Option<Value>> {
        if let Some(value) = self.data.get(key) {
            return Ok(Some(value.clone()));
        }
        if !key.contains(FIELD_SEPARATOR) {
            return Ok(None);
        }
        if !self.contains_field(key) {
            // the path may still resolve through an array index or decomposition
            let value = self.deep_get(key)?;
            return match &value {
                Value::Null => Ok(None),
                Value::Array(items) if items.is_empty() => Ok(None),
                _ => Ok(Some(value)),
            };
        }
        self.deep_get(key).map(Some)
    }

    /// Return the [DocId] associated with this document.
    ///
    /// If the document does not have an `_id` field, this method automatically generates
    /// a new [DocId] and assigns it to the document. This method mutates the document
    /// only if an ID needs to be generated.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::InvalidId] if the `_id` field holds a value that is
    /// not a [DocId].
    pub fn id(&mut self) -> SedimentResult<DocId> {
        match self.data.get(DOC_ID) {
            Some(Value::DocId(id)) => Ok(*id),
            Some(other) => {
                log::error!("Document _id must be a DocId, found {}", other);
                Err(SedimentError::new(
                    "Document _id must be a DocId",
                    ErrorKind::InvalidId,
                ))
            }
            None => {
                // if _id field is not populated already, create a new id
                // and set it in the document
                let doc_id = DocId::new();
                self.data = self.data.update(DOC_ID.to_string(), Value::DocId(doc_id));
                Ok(doc_id)
            }
        }
    }

    /// Retrieves all fields (top level and embedded) associated with this document.
    ///
    /// Embedded fields are represented using the field separator. The `_id` field
    /// is excluded from the result.
    pub fn fields(&self) -> FieldVec {
        self.get_fields_internal("")
    }

    /// Checks if this document has an id.
    pub fn has_id(&self) -> bool {
        self.data.contains_key(DOC_ID)
    }

    /// Removes the key and its value from the document.
    ///
    /// Deletes the key-value pair associated with the given key. If the key does not
    /// exist, the operation succeeds without error. The method supports both top-level
    /// and embedded keys.
    pub fn remove(&mut self, key: &str) -> SedimentResult<()> {
        if key.contains(FIELD_SEPARATOR) {
            // if the field is an embedded field,
            // run a deep scan and remove the last field
            let splits: Vec<&str> = key.split(FIELD_SEPARATOR).collect();
            self.deep_remove(&splits)
        } else {
            self.data = self.data.without(key);
            Ok(())
        }
    }

    /// Returns the number of entries in the document.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Merges a document in this document.
    ///
    /// Merges all key-value pairs from another document into this one. If a key
    /// already exists:
    /// - If both values are documents, they are merged recursively
    /// - Otherwise, the value from `other` overwrites the existing value
    pub fn merge(&mut self, other: &Document) -> SedimentResult<()> {
        for (key, value) in other.data.iter() {
            match value {
                Value::Document(obj) => {
                    // if the value is a document, merge it recursively
                    if let Some(Value::Document(mut nested_obj)) = self.data.get(key).cloned() {
                        nested_obj.merge(obj)?;
                        self.data = self.data.update(key.clone(), Value::Document(nested_obj));
                    } else {
                        // Otherwise, just set the value
                        self.data = self.data.update(key.clone(), value.clone());
                    }
                }
                _ => {
                    // if there is no embedded document, put the field in the document
                    self.data = self.data.update(key.clone(), value.clone());
                }
            }
        }
        Ok(())
    }

    /// Checks if a top level key exists in the document.
    ///
    /// This method only checks for top-level keys, not embedded fields. Use
    /// [Document::contains_field] to check for embedded fields.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Checks if a top level field or embedded field exists in the document.
    ///
    /// # Arguments
    ///
    /// * `field` - The field path to check as a string slice (e.g., `"user.email"`).
    pub fn contains_field(&self, field: &str) -> bool {
        if self.contains_key(field) {
            true
        } else {
            self.fields().contains(&field.to_string())
        }
    }

    /// Converts this document to a [BTreeMap].
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        self.data
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Gets an iterator over the key-value pairs of this document.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let doc = doc!{ "name": "Alice", "age": 30 };
    /// for (key, value) in doc.iter() {
    ///     println!("{}: {}", key, value);
    /// }
    /// ```
    pub fn iter(&self) -> DocumentIter {
        DocumentIter {
            keys: self.data.keys().cloned().collect(),
            data: self.clone(),
            index: 0,
        }
    }

    fn get_fields_internal(&self, prefix: &str) -> FieldVec {
        let mut fields = FieldVec::new();

        // iterate top level keys
        for key in self.data.keys() {
            // ignore the id field
            if key == DOC_ID {
                continue;
            }

            if key.is_empty() {
                continue;
            }

            let field = if prefix.is_empty() {
                // level-1 fields
                key.clone()
            } else {
                // level-n fields, separated by field separator
                format!("{}{}{}", prefix, FIELD_SEPARATOR, key)
            };

            if let Some(Value::Document(doc)) = self.data.get(key) {
                // if the value is a document, traverse its fields recursively,
                // prefix would be the field name of the document
                fields.append(&mut doc.get_fields_internal(&field));
            } else {
                // if there is no more embedded document, add the field to the list
                fields.push(field);
            }
        }
        fields
    }

    fn deep_get(&self, key: &str) -> SedimentResult<Value> {
        if !key.contains(FIELD_SEPARATOR) {
            Ok(Value::Null)
        } else {
            self.get_by_embedded_key(key)
        }
    }

    fn deep_put(&mut self, splits: &[&str], value: Value) -> SedimentResult<()> {
        if splits.is_empty() {
            log::error!("Empty embedded key");
            return Err(SedimentError::new(
                "Empty embedded key",
                ErrorKind::ValidationError,
            ));
        }

        let key = splits[0];
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(SedimentError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        if splits.len() == 1 {
            // if last key, simply put in the current document
            self.put(key, value)
        } else {
            let remaining_splits = &splits[1..];
            match self.data.get(key).cloned() {
                Some(Value::Document(mut obj)) => {
                    // if the current level value is embedded doc, scan to the next level
                    let result = obj.deep_put(remaining_splits, value);
                    self.data = self.data.update(key.to_string(), Value::Document(obj));
                    result
                }
                Some(Value::Array(mut arr)) => {
                    // a numeric segment writes into the array element
                    let first = remaining_splits[0];
                    let index = Self::parse_array_index(first, arr.len())?;
                    if remaining_splits.len() == 1 {
                        arr[index] = value;
                    } else if let Value::Document(mut element) = arr[index].clone() {
                        element.deep_put(&remaining_splits[1..], value)?;
                        arr[index] = Value::Document(element);
                    } else {
                        let mut element = Document::new();
                        element.deep_put(&remaining_splits[1..], value)?;
                        arr[index] = Value::Document(element);
                    }
                    self.data = self.data.update(key.to_string(), Value::Array(arr));
                    Ok(())
                }
                _ => {
                    // if current level value is null, create a new document
                    let mut nested_doc = Document::new();
                    let result = nested_doc.deep_put(remaining_splits, value);
                    self.data = self
                        .data
                        .update(key.to_string(), Value::Document(nested_doc));
                    result
                }
            }
        }
    }

    fn parse_array_index(segment: &str, len: usize) -> SedimentResult<usize> {
        let index = segment.parse::<isize>().map_err(|_| {
            log::error!(
                "Invalid array index {} to access array inside a document",
                segment
            );
            SedimentError::new(
                &format!(
                    "Invalid array index {} to access array inside a document",
                    segment
                ),
                ErrorKind::ValidationError,
            )
        })?;

        if index < 0 {
            log::error!(
                "Invalid array index {} to access array inside a document",
                index
            );
            return Err(SedimentError::new(
                &format!(
                    "Invalid array index {} to access array inside a document",
                    index
                ),
                ErrorKind::ValidationError,
            ));
        }

        let index = index as usize;
        if index >= len {
            log::error!("Array index {} out of bound", index);
            return Err(SedimentError::new(
                &format!("Array index {} out of bound", index),
                ErrorKind::ValidationError,
            ));
        }
        Ok(index)
    }

    fn deep_remove(&mut self, splits: &[&str]) -> SedimentResult<()> {
        if splits.is_empty() {
            log::error!("Empty embedded key");
            return Err(SedimentError::new(
                "Empty embedded key",
                ErrorKind::ValidationError,
            ));
        }

        let key = splits[0];
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(SedimentError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        if splits.len() == 1 {
            // if last key, simply remove from the current document
            self.remove(key)
        } else {
            let remaining_splits = &splits[1..];

            match self.data.get(key) {
                Some(Value::Document(obj)) => {
                    // if the current level value is embedded doc, scan to the next level
                    let mut nested_doc = obj.clone();
                    let result = nested_doc.deep_remove(remaining_splits);
                    if nested_doc.is_empty() {
                        // if the next level document is an empty one
                        // remove the current level document also
                        self.data = self.data.without(key);
                    } else {
                        self.data = self
                            .data
                            .update(key.to_string(), Value::Document(nested_doc));
                    }
                    result
                }
                Some(Value::Array(arr)) => {
                    let first = splits[1];
                    // if the current level value is an array,
                    // remove the element at the next level
                    let index = Self::parse_array_index(first, arr.len())?;

                    let item = &arr[index];
                    if let (Value::Document(obj), true) = (item, splits.len() > 2) {
                        // if there are more splits, then this is an embedded document
                        let mut nested_doc = obj.clone();
                        let result = nested_doc.deep_remove(&remaining_splits[1..]);
                        let mut new_arr = arr.clone();
                        if nested_doc.is_empty() {
                            // if the next level document is an empty one
                            // remove the element from array
                            new_arr.remove(index);
                        } else {
                            new_arr[index] = Value::Document(nested_doc);
                        }
                        self.data = self.data.update(key.to_string(), Value::Array(new_arr));
                        result
                    } else {
                        // if there are no more splits, remove the element at the next level
                        let mut new_arr = arr.clone();
                        new_arr.remove(index);
                        self.data = self.data.update(key.to_string(), Value::Array(new_arr));
                        Ok(())
                    }
                }
                _ => {
                    // if current level value is null, remove the key
                    self.data = self.data.without(key);
                    Ok(())
                }
            }
        }
    }

    fn get_by_embedded_key(&self, key: &str) -> SedimentResult<Value> {
        let splits: Vec<&str> = key.split(FIELD_SEPARATOR).collect();

        if splits.is_empty() {
            return Ok(Value::Null);
        }

        let first = splits[0];
        if first.is_empty() {
            log::error!("Document does not support empty key");
            return Err(SedimentError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        // get current level value and scan to next level using remaining keys
        self.recursive_get(self.data.get(first), &splits[1..])
    }

    fn recursive_get(&self, value: Option<&Value>, splits: &[&str]) -> SedimentResult<Value> {
        let value = match value {
            None => return Ok(Value::Null),
            Some(v) => v,
        };

        if splits.is_empty() {
            return Ok(value.clone());
        }

        let key = splits[0];
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(SedimentError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        match value {
            Value::Document(obj) => {
                // if the current level value is document, scan to the next level with remaining keys
                self.recursive_get(obj.data.get(key), &splits[1..])
            }
            Value::Array(arr) => {
                if let Ok(index) = key.parse::<isize>() {
                    // an out-of-range index does not resolve, the path reads as missing
                    if index < 0 || index as usize >= arr.len() {
                        return Ok(Value::Null);
                    }
                    let item = &arr[index as usize];
                    self.recursive_get(Some(item), &splits[1..])
                } else {
                    // if the current key is not an integer, decompose the list
                    self.decompose(arr, splits)
                }
            }
            _ => Ok(Value::Null), // if no match found return null
        }
    }

    fn decompose(&self, arr: &[Value], splits: &[&str]) -> SedimentResult<Value> {
        let mut items: Vec<Value> = Vec::with_capacity(arr.len());

        for item in arr {
            // scan the item using remaining keys
            let result = self.recursive_get(Some(item), splits)?;

            match result {
                Value::Null => {}
                Value::Array(arr) => {
                    // if the result is an iterable, add all items to the list
                    for v in arr {
                        items.push(v);
                    }
                }
                value => {
                    // if the result is not an iterable, add the result to the list
                    items.push(value);
                }
            }
        }
        // remove duplicates from the list
        Ok(Value::Array(
            items.iter().unique().cloned().collect::<Vec<_>>(),
        ))
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "\"{}\": {}", key, value)?;
        }
        write!(f, "}}")
    }
}

pub struct DocumentIter {
    keys: Vec<String>,
    data: Document,
    index: usize,
}

impl Iterator for DocumentIter {
    type Item = (String, Value);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.keys.len() {
            let key = &self.keys[self.index];
            if let Some(value) = self.data.data.get(key) {
                let result = (key.clone(), value.clone());
                self.index += 1;
                return Some(result);
            }
            self.index += 1;
            self.next()
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.keys.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a Sediment Document with JSON-like syntax.
///
/// # Examples
///
/// ```rust
/// use sediment::doc;
///
/// // Empty document
/// let empty = doc!{};
///
/// // Simple key-value pairs
/// let simple = doc!{
///     name: "Alice",
///     age: 30
/// };
///
/// // Nested documents and arrays
/// let complex = doc!{
///     user: {
///         name: "Charlie",
///         tags: ["admin", "user"]
///     },
///     values: [1, 2, 3]
/// };
/// ```
#[macro_export]
macro_rules! doc {
    // match an empty document (with braces for backward compat)
    ({}) => {
        $crate::collection::Document::new()
    };

    // match an empty document (new syntax)
    () => {
        $crate::collection::Document::new()
    };

    // match a document with key value pairs (old syntax with outer braces - for backward compat)
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::doc!($($key : $value),*)
    };

    // match a document with key value pairs (new syntax without outer braces)
    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.put(&$crate::collection::normalize(stringify!($key)), $crate::doc_value!($value))
                .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the doc! macro.
/// Handles nested documents, arrays, and expressions.
#[macro_export]
macro_rules! doc_value {
    // match a nested document
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        {
            $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
        }
    };

    // match an array of values
    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    // match an explicit null
    (null) => {
        $crate::common::Value::Null
    };

    // match an expression (variable, function call, arithmetic in parens, literals, etc.)
    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Value::Null;

    fn set_up() -> Document {
        doc! {
            score: 1034,
            location: {
                state: "NY",
                city: "New York",
                address: {
                    line1: "40",
                    line2: "ABC Street",
                    house: ["1", "2", "3"],
                    zip: 10001,
                },
            },
            category: ["food", "produce", "grocery"],
            obj_array: [
                {
                    value: 1,
                },
                {
                    value: 2,
                },
            ]
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("\"ABC\""), "ABC");
        assert_eq!(normalize("ABC"), "ABC");
    }

    #[test]
    fn test_put_and_get_top_level() {
        let mut doc = Document::new();
        doc.put("name", "Alice").unwrap();
        doc.put("age", 30).unwrap();
        assert_eq!(doc.get("name").unwrap(), "Alice".into());
        assert_eq!(doc.get("age").unwrap(), Value::I32(30));
        assert_eq!(doc.size(), 2);
    }

    #[test]
    fn test_put_empty_key() {
        let mut doc = Document::new();
        let err = doc.put("", 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_get_embedded() {
        let doc = set_up();
        assert_eq!(doc.get("location.state").unwrap(), "NY".into());
        assert_eq!(doc.get("location.address.zip").unwrap(), Value::I32(10001));
        assert_eq!(doc.get("location.missing").unwrap(), Null);
    }

    #[test]
    fn test_get_array_index() {
        let doc = set_up();
        assert_eq!(doc.get("category.0").unwrap(), "food".into());
        assert_eq!(doc.get("category.2").unwrap(), "grocery".into());
        assert_eq!(doc.get("obj_array.1.value").unwrap(), Value::I32(2));
    }

    #[test]
    fn test_get_array_index_out_of_bound_reads_as_missing() {
        let doc = set_up();
        assert_eq!(doc.get("category.5").unwrap(), Null);
        assert_eq!(doc.get("obj_array.5.value").unwrap(), Null);
        assert!(doc.lookup("obj_array.5.value").unwrap().is_none());
    }

    #[test]
    fn test_get_negative_array_index_reads_as_missing() {
        let doc = set_up();
        assert_eq!(doc.get("category.-1").unwrap(), Null);
    }

    #[test]
    fn test_lookup_through_array_index() {
        let doc = set_up();
        assert_eq!(
            doc.lookup("obj_array.0.value").unwrap(),
            Some(Value::I32(1))
        );
        assert_eq!(doc.lookup("category.1").unwrap(), Some("produce".into()));
    }

    #[test]
    fn test_get_decompose_array_of_documents() {
        let doc = set_up();
        let values = doc.get("obj_array.value").unwrap();
        assert_eq!(
            values,
            Value::Array(vec![Value::I32(1), Value::I32(2)])
        );
    }

    #[test]
    fn test_deep_put_creates_intermediate_documents() {
        let mut doc = Document::new();
        doc.put("a.b.c", 5).unwrap();
        assert_eq!(doc.get("a.b.c").unwrap(), Value::I32(5));
        assert!(doc.get("a.b").unwrap().is_document());
    }

    #[test]
    fn test_deep_put_into_array_element() {
        let mut doc = set_up();
        doc.put("obj_array.0.value", 10).unwrap();
        assert_eq!(doc.get("obj_array.0.value").unwrap(), Value::I32(10));
        assert_eq!(doc.get("obj_array.1.value").unwrap(), Value::I32(2));
    }

    #[test]
    fn test_deep_put_array_out_of_bound() {
        let mut doc = set_up();
        assert!(doc.put("category.9", "meat").is_err());
    }

    #[test]
    fn test_remove_top_level() {
        let mut doc = set_up();
        doc.remove("score").unwrap();
        assert_eq!(doc.get("score").unwrap(), Null);
    }

    #[test]
    fn test_remove_embedded() {
        let mut doc = set_up();
        doc.remove("location.address.zip").unwrap();
        assert_eq!(doc.get("location.address.zip").unwrap(), Null);
        assert_eq!(doc.get("location.address.line1").unwrap(), "40".into());
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let mut doc = set_up();
        let size = doc.size();
        doc.remove("no_such_key").unwrap();
        assert_eq!(doc.size(), size);
    }

    #[test]
    fn test_id_generation() {
        let mut doc = doc! { "name": "Alice" };
        assert!(!doc.has_id());
        let id1 = doc.id().unwrap();
        assert!(doc.has_id());
        let id2 = doc.id().unwrap();
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_id_rejects_non_doc_id() {
        let mut doc = Document::new();
        doc.put(DOC_ID, "not-an-id").unwrap();
        let err = doc.id().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidId);
    }

    #[test]
    fn test_fields() {
        let doc = set_up();
        let fields = doc.fields();
        assert!(fields.contains(&"score".to_string()));
        assert!(fields.contains(&"location.state".to_string()));
        assert!(fields.contains(&"location.address.zip".to_string()));
        assert!(!fields.contains(&"location".to_string()));
    }

    #[test]
    fn test_contains_field() {
        let doc = set_up();
        assert!(doc.contains_field("score"));
        assert!(doc.contains_field("location.city"));
        assert!(doc.contains_field("location"));
        assert!(!doc.contains_field("location.country"));
    }

    #[test]
    fn test_lookup_missing_vs_null() {
        let mut doc = doc! { "a": 1 };
        doc.put("b", Value::Null).unwrap();
        assert_eq!(doc.lookup("a").unwrap(), Some(Value::I32(1)));
        assert_eq!(doc.lookup("b").unwrap(), Some(Value::Null));
        assert_eq!(doc.lookup("c").unwrap(), None);
        assert_eq!(doc.lookup("a.b").unwrap(), None);
    }

    #[test]
    fn test_merge() {
        let mut doc1 = doc! { "name": "Alice", "age": 30 };
        let doc2 = doc! { "email": "alice@example.com", "age": 31 };
        doc1.merge(&doc2).unwrap();
        assert_eq!(doc1.get("name").unwrap(), "Alice".into());
        assert_eq!(doc1.get("age").unwrap(), Value::I32(31));
        assert_eq!(doc1.get("email").unwrap(), "alice@example.com".into());
    }

    #[test]
    fn test_merge_recursive() {
        let mut doc1 = doc! { "user": { "name": "Alice", "age": 30 } };
        let doc2 = doc! { "user": { "email": "alice@example.com" } };
        doc1.merge(&doc2).unwrap();
        assert_eq!(doc1.get("user.name").unwrap(), "Alice".into());
        assert_eq!(doc1.get("user.age").unwrap(), Value::I32(30));
        assert_eq!(
            doc1.get("user.email").unwrap(),
            "alice@example.com".into()
        );
    }

    #[test]
    fn test_iter() {
        let doc = doc! { "name": "Alice", "age": 30 };
        let entries: Vec<_> = doc.iter().collect();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = set_up();
        let mut cloned = original.clone();
        cloned.put("score", 0).unwrap();
        assert_eq!(original.get("score").unwrap(), Value::I32(1034));
        assert_eq!(cloned.get("score").unwrap(), Value::I32(0));
    }

    #[test]
    fn test_doc_macro_with_string_keys() {
        let doc = doc! {
            "name": "Alice",
            "address.city": "New York",
        };
        assert_eq!(doc.get("name").unwrap(), "Alice".into());
        assert_eq!(doc.get("address.city").unwrap(), "New York".into());
    }
}

use crate::collection::DocId;
use crate::collection::Document;
use crate::common::constants::DOC_ID;
use crate::common::Value;
use crate::errors::SedimentResult;
use std::any::Any;
use std::fmt::Display;
use std::ops::Deref;
use std::sync::Arc;

use super::AllFilter;
use super::AndFilter;
use super::EqualsFilter;
use super::NotFilter;
use super::OrFilter;

/// Trait for implementing custom filters.
///
/// A `FilterProvider` defines how to evaluate filter conditions on documents.
/// Leaf filters constrain a single field path; logical filters compose other
/// filters. Document matching always goes through [FilterProvider::apply].
pub trait FilterProvider: Any + Send + Sync + Display {
    /// Applies the filter to a document and returns whether it matches.
    ///
    /// # Arguments
    ///
    /// * `entry` - The document to evaluate
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the document matches the filter, `Ok(false)` otherwise
    fn apply(&self, entry: &Document) -> SedimentResult<bool>;

    /// The field path this filter constrains, if it is a leaf filter.
    fn field_name(&self) -> Option<String> {
        None
    }

    /// The literal an equality leaf compares against.
    ///
    /// Upsert synthesis uses this to seed the new document from the filter.
    /// Only equality leaves return `Some`.
    fn equality_value(&self) -> Option<Value> {
        None
    }

    /// Rebuilds this leaf filter against a different field path.
    ///
    /// Positional array updates re-evaluate a leaf condition against each
    /// array element; the rebased filter carries the same operator and
    /// literal but a new path. Logical filters return `None`.
    fn rebase(&self, field_name: &str) -> Option<Filter> {
        let _ = field_name;
        None
    }

    /// The child filters of a conjunction.
    ///
    /// Only `AndFilter` returns `Some`; it lets [Filter::leaves] flatten a
    /// conjunctive filter tree without downcasting.
    fn conjuncts(&self) -> Option<Vec<Filter>> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

/// A query filter for selecting documents from a collection.
///
/// `Filter` encapsulates filter logic through a provider pattern that supports
/// custom filtering implementations. Filters are used with collection `find()`,
/// `update()`, and `remove()` to select documents with various conditions.
///
/// # Filter Composition
///
/// Filters can be composed using logical operators:
/// - `and(other)` - Combines with another filter using logical AND
/// - `or(other)` - Combines with another filter using logical OR
/// - `not()` - Negates the filter using logical NOT
#[derive(Clone)]
pub struct Filter {
    inner: Arc<dyn FilterProvider>,
}

impl Filter {
    /// Creates a new filter from a filter provider implementation.
    pub fn new<T: FilterProvider + 'static>(inner: T) -> Self {
        Filter {
            inner: Arc::new(inner),
        }
    }

    /// Combines this filter with another using logical AND.
    pub fn and(&self, filter: Filter) -> Self {
        Filter::new(AndFilter::new(vec![self.clone(), filter]))
    }

    /// Combines this filter with another using logical OR.
    pub fn or(&self, filter: Filter) -> Self {
        Filter::new(OrFilter::new(vec![self.clone(), filter]))
    }

    /// Negates this filter using logical NOT.
    pub fn not(&self) -> Self {
        Filter::new(NotFilter::new(self.clone()))
    }

    /// Flattens the conjunctive leaf conditions of this filter.
    ///
    /// A bare leaf yields itself; an `and` of leaves yields every leaf,
    /// recursively. Disjunctions and negations are opaque and contribute
    /// nothing, since their leaves do not individually constrain a match.
    pub fn leaves(&self) -> Vec<Filter> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<Filter>) {
        if let Some(children) = self.inner.conjuncts() {
            for child in children {
                child.collect_leaves(out);
            }
        } else if self.inner.field_name().is_some() {
            out.push(self.clone());
        }
    }
}

impl Display for Filter {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Deref for Filter {
    type Target = Arc<dyn FilterProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Creates a filter that matches all documents.
///
/// This filter accepts every document in the collection without applying
/// any filtering conditions.
pub fn all() -> Filter {
    Filter::new(AllFilter {})
}

/// Creates a filter that matches a document by its ID.
///
/// # Arguments
///
/// * `id` - The `DocId` to match
pub fn by_id(id: DocId) -> Filter {
    Filter::new(EqualsFilter::new(DOC_ID.to_string(), Value::DocId(id)))
}

/// Combines multiple filters using logical AND.
///
/// Creates a filter that matches documents satisfying all of the provided filters.
pub fn and(filters: Vec<Filter>) -> Filter {
    Filter::new(AndFilter::new(filters))
}

/// Combines multiple filters using logical OR.
///
/// Creates a filter that matches documents satisfying at least one of the provided filters.
pub fn or(filters: Vec<Filter>) -> Filter {
    Filter::new(OrFilter::new(filters))
}

/// Negates a filter using logical NOT.
pub fn not(filter: Filter) -> Filter {
    Filter::new(NotFilter::new(filter))
}

pub(crate) fn is_all_filter(filter: &Filter) -> bool {
    filter.as_any().is::<AllFilter>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;
    use crate::filter::field;
    use std::fmt::Formatter;

    struct MockFilter;

    impl Display for MockFilter {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "MockFilter")
        }
    }

    impl FilterProvider for MockFilter {
        fn apply(&self, _entry: &Document) -> SedimentResult<bool> {
            Ok(true)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_filter_apply() {
        let filter = Filter::new(MockFilter);
        let doc = Document::new();
        assert!(filter.apply(&doc).unwrap());
    }

    #[test]
    fn test_all_filter() {
        let filter = all();
        let doc = Document::new();
        assert!(filter.apply(&doc).unwrap());
        assert!(is_all_filter(&filter));
    }

    #[test]
    fn test_by_id_filter() {
        let id = DocId::new();
        let filter = by_id(id);
        let mut doc = Document::new();
        doc.put(DOC_ID, Value::DocId(id)).unwrap();
        assert!(filter.apply(&doc).unwrap());

        let other = doc! { "name": "unrelated" };
        assert!(!filter.apply(&other).unwrap());
    }

    #[test]
    fn test_and_composition() {
        let doc = doc! { "age": 35, "name": "Alice" };
        let filter = field("age").gt(30).and(field("name").eq("Alice"));
        assert!(filter.apply(&doc).unwrap());

        let filter = field("age").gt(40).and(field("name").eq("Alice"));
        assert!(!filter.apply(&doc).unwrap());
    }

    #[test]
    fn test_or_composition() {
        let doc = doc! { "age": 35 };
        let filter = field("age").gt(40).or(field("age").lt(36));
        assert!(filter.apply(&doc).unwrap());
    }

    #[test]
    fn test_not_composition() {
        let doc = doc! { "age": 35 };
        let filter = field("age").gt(40).not();
        assert!(filter.apply(&doc).unwrap());
    }

    #[test]
    fn test_leaves_of_leaf() {
        let filter = field("age").eq(30);
        let leaves = filter.leaves();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].field_name(), Some("age".to_string()));
    }

    #[test]
    fn test_leaves_of_conjunction() {
        let filter = field("age").eq(30).and(field("name").eq("Alice"));
        let leaves = filter.leaves();
        assert_eq!(leaves.len(), 2);
    }

    #[test]
    fn test_leaves_skips_disjunction() {
        let filter = field("age").eq(30).or(field("name").eq("Alice"));
        assert!(filter.leaves().is_empty());
    }

    #[test]
    fn test_leaves_skips_all() {
        assert!(all().leaves().is_empty());
    }
}

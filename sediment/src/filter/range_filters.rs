use crate::collection::Document;
use crate::common::Value;
use crate::errors::SedimentResult;
use crate::filter::{Filter, FilterProvider};
use std::any::Any;
use std::cmp::Ordering;
use std::fmt::Display;

/// The comparison operator of a [ComparableFilter].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonMode {
    Greater,
    GreaterEqual,
    Lesser,
    LesserEqual,
}

impl ComparisonMode {
    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            ComparisonMode::Greater => ordering == Ordering::Greater,
            ComparisonMode::GreaterEqual => ordering != Ordering::Less,
            ComparisonMode::Lesser => ordering == Ordering::Less,
            ComparisonMode::LesserEqual => ordering != Ordering::Greater,
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            ComparisonMode::Greater => ">",
            ComparisonMode::GreaterEqual => ">=",
            ComparisonMode::Lesser => "<",
            ComparisonMode::LesserEqual => "<=",
        }
    }
}

/// A filter that matches documents by an ordered comparison on a field.
///
/// Comparisons only hold between values of the same comparison class, so
/// a number is never greater or lesser than a string. A null or missing
/// field never satisfies a range condition. For array fields the filter
/// matches when any element satisfies the comparison.
pub struct ComparableFilter {
    field: String,
    value: Value,
    mode: ComparisonMode,
}

impl ComparableFilter {
    pub fn new(field: String, value: Value, mode: ComparisonMode) -> Self {
        ComparableFilter { field, value, mode }
    }

    fn satisfied_by(&self, stored: &Value) -> bool {
        if stored.comparable_with(&self.value) {
            return self.mode.accepts(stored.cmp(&self.value));
        }
        if let Value::Array(elements) = stored {
            return elements.iter().any(|element| {
                element.comparable_with(&self.value)
                    && self.mode.accepts(element.cmp(&self.value))
            });
        }
        false
    }
}

impl FilterProvider for ComparableFilter {
    fn apply(&self, entry: &Document) -> SedimentResult<bool> {
        let stored = entry.get(&self.field)?;
        Ok(self.satisfied_by(&stored))
    }

    fn field_name(&self) -> Option<String> {
        Some(self.field.clone())
    }

    fn rebase(&self, field_name: &str) -> Option<Filter> {
        Some(Filter::new(ComparableFilter::new(
            field_name.to_string(),
            self.value.clone(),
            self.mode,
        )))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Display for ComparableFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.field, self.mode.symbol(), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;
    use crate::filter::field;

    #[test]
    fn test_greater_than() {
        let doc = doc! { "age": 35 };
        assert!(field("age").gt(30).apply(&doc).unwrap());
        assert!(!field("age").gt(35).apply(&doc).unwrap());
        assert!(!field("age").gt(40).apply(&doc).unwrap());
    }

    #[test]
    fn test_greater_equal() {
        let doc = doc! { "age": 35 };
        assert!(field("age").gte(35).apply(&doc).unwrap());
        assert!(!field("age").gte(36).apply(&doc).unwrap());
    }

    #[test]
    fn test_lesser_than() {
        let doc = doc! { "age": 35 };
        assert!(field("age").lt(36).apply(&doc).unwrap());
        assert!(!field("age").lt(35).apply(&doc).unwrap());
    }

    #[test]
    fn test_lesser_equal() {
        let doc = doc! { "age": 35 };
        assert!(field("age").lte(35).apply(&doc).unwrap());
        assert!(!field("age").lte(34).apply(&doc).unwrap());
    }

    #[test]
    fn test_cross_width_comparison() {
        let doc = doc! { "score": 7 };
        assert!(field("score").gt(6.5).apply(&doc).unwrap());
        assert!(field("score").lt(7i64 + 1).apply(&doc).unwrap());
    }

    #[test]
    fn test_string_comparison() {
        let doc = doc! { "name": "Guinness" };
        assert!(field("name").gt("Abc").apply(&doc).unwrap());
        assert!(field("name").lt("Zzz").apply(&doc).unwrap());
    }

    #[test]
    fn test_mixed_class_never_matches() {
        let doc = doc! { "age": "thirty" };
        assert!(!field("age").gt(10).apply(&doc).unwrap());
        assert!(!field("age").lt(10).apply(&doc).unwrap());
    }

    #[test]
    fn test_null_and_missing_never_match() {
        let doc = doc! { "age": null };
        assert!(!field("age").gt(10).apply(&doc).unwrap());
        assert!(!field("age").lt(10).apply(&doc).unwrap());
        assert!(!field("missing").gt(10).apply(&doc).unwrap());
        assert!(!field("missing").lte(10).apply(&doc).unwrap());
    }

    #[test]
    fn test_array_any_element() {
        let doc = doc! { "scores": [3, 9, 5] };
        assert!(field("scores").gt(8).apply(&doc).unwrap());
        assert!(!field("scores").gt(9).apply(&doc).unwrap());
    }

    #[test]
    fn test_between() {
        let doc = doc! { "age": 35 };
        assert!(field("age").between(30, 40).apply(&doc).unwrap());
        assert!(field("age").between(35, 35).apply(&doc).unwrap());
        assert!(!field("age").between(36, 40).apply(&doc).unwrap());
    }
}

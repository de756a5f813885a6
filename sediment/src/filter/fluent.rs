use crate::common::Value;
use crate::filter::{
    ComparableFilter, ComparisonMode, EqualsFilter, ExistsFilter, Filter, InFilter,
    NotEqualsFilter, NotInFilter,
};

/// Entry point of the fluent filter API.
///
/// Names the field a condition applies to; the returned builder supplies
/// the operator and value.
///
/// # Examples
///
/// ```rust,ignore
/// let filter = field("borough").eq("Brooklyn");
/// let filter = field("grades.score").gte(7);
/// ```
pub fn field(name: &str) -> FluentFilter {
    FluentFilter {
        field: name.to_string(),
    }
}

/// A fluent builder for a single-field filter condition.
pub struct FluentFilter {
    field: String,
}

impl FluentFilter {
    /// Creates an equality filter on the field.
    pub fn eq<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(EqualsFilter::new(self.field, value.into()))
    }

    /// Creates an inequality filter on the field.
    pub fn ne<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(NotEqualsFilter::new(self.field, value.into()))
    }

    /// Creates a greater-than filter on the field.
    pub fn gt<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(ComparableFilter::new(
            self.field,
            value.into(),
            ComparisonMode::Greater,
        ))
    }

    /// Creates a greater-than-or-equal filter on the field.
    pub fn gte<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(ComparableFilter::new(
            self.field,
            value.into(),
            ComparisonMode::GreaterEqual,
        ))
    }

    /// Creates a lesser-than filter on the field.
    pub fn lt<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(ComparableFilter::new(
            self.field,
            value.into(),
            ComparisonMode::Lesser,
        ))
    }

    /// Creates a lesser-than-or-equal filter on the field.
    pub fn lte<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(ComparableFilter::new(
            self.field,
            value.into(),
            ComparisonMode::LesserEqual,
        ))
    }

    /// Creates a filter matching values within the inclusive range
    /// `[lower, upper]`.
    pub fn between<T: Into<Value>>(self, lower: T, upper: T) -> Filter {
        let lower_bound = Filter::new(ComparableFilter::new(
            self.field.clone(),
            lower.into(),
            ComparisonMode::GreaterEqual,
        ));
        let upper_bound = Filter::new(ComparableFilter::new(
            self.field,
            upper.into(),
            ComparisonMode::LesserEqual,
        ));
        lower_bound.and(upper_bound)
    }

    /// Creates a filter on the presence or absence of the field.
    pub fn exists(self, exists: bool) -> Filter {
        Filter::new(ExistsFilter::new(self.field, exists))
    }

    /// Creates a membership filter on the field.
    pub fn within(self, values: Vec<Value>) -> Filter {
        Filter::new(InFilter::new(self.field, values))
    }

    /// Creates a negated membership filter on the field.
    pub fn not_within(self, values: Vec<Value>) -> Filter {
        Filter::new(NotInFilter::new(self.field, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    #[test]
    fn test_fluent_operators() {
        let doc = doc! { "age": 35, "name": "Alice" };
        assert!(field("age").eq(35).apply(&doc).unwrap());
        assert!(field("age").ne(36).apply(&doc).unwrap());
        assert!(field("age").gt(34).apply(&doc).unwrap());
        assert!(field("age").gte(35).apply(&doc).unwrap());
        assert!(field("age").lt(36).apply(&doc).unwrap());
        assert!(field("age").lte(35).apply(&doc).unwrap());
        assert!(field("name").exists(true).apply(&doc).unwrap());
    }

    #[test]
    fn test_fluent_display() {
        assert_eq!(field("age").gt(30).to_string(), "(age > 30)");
        assert_eq!(field("name").eq("Bob").to_string(), "(name == \"Bob\")");
    }

    #[test]
    fn test_between_is_conjunction() {
        let filter = field("age").between(30, 40);
        assert_eq!(filter.leaves().len(), 2);
    }
}

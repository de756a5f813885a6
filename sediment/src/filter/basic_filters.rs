use crate::collection::Document;
use crate::common::Value;
use crate::errors::SedimentResult;
use crate::filter::{Filter, FilterProvider};
use std::any::Any;
use std::fmt::Display;

/// Checks a stored value against a target for filter equality.
///
/// A scalar matches on deep equality. An array matches when any of its
/// elements equals the target, or when the target itself is that array.
pub(crate) fn value_matches(stored: &Value, target: &Value) -> bool {
    if stored == target {
        return true;
    }
    if let Value::Array(elements) = stored {
        return elements.iter().any(|element| element == target);
    }
    false
}

/// A filter that matches every document.
pub struct AllFilter {}

impl FilterProvider for AllFilter {
    fn apply(&self, _entry: &Document) -> SedimentResult<bool> {
        Ok(true)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Display for AllFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(all)")
    }
}

/// A filter that matches documents where a field equals a value.
///
/// For array fields the filter matches when any element of the array
/// equals the value.
pub struct EqualsFilter {
    field: String,
    value: Value,
}

impl EqualsFilter {
    pub fn new(field: String, value: Value) -> Self {
        EqualsFilter { field, value }
    }
}

impl FilterProvider for EqualsFilter {
    fn apply(&self, entry: &Document) -> SedimentResult<bool> {
        let stored = entry.get(&self.field)?;
        Ok(value_matches(&stored, &self.value))
    }

    fn field_name(&self) -> Option<String> {
        Some(self.field.clone())
    }

    fn equality_value(&self) -> Option<Value> {
        Some(self.value.clone())
    }

    fn rebase(&self, field_name: &str) -> Option<Filter> {
        Some(Filter::new(EqualsFilter::new(
            field_name.to_string(),
            self.value.clone(),
        )))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Display for EqualsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} == {})", self.field, self.value)
    }
}

/// A filter that matches documents where a field does not equal a value.
///
/// A missing field does not equal any value, so it matches.
pub struct NotEqualsFilter {
    field: String,
    value: Value,
}

impl NotEqualsFilter {
    pub fn new(field: String, value: Value) -> Self {
        NotEqualsFilter { field, value }
    }
}

impl FilterProvider for NotEqualsFilter {
    fn apply(&self, entry: &Document) -> SedimentResult<bool> {
        let stored = entry.get(&self.field)?;
        Ok(!value_matches(&stored, &self.value))
    }

    fn field_name(&self) -> Option<String> {
        Some(self.field.clone())
    }

    fn rebase(&self, field_name: &str) -> Option<Filter> {
        Some(Filter::new(NotEqualsFilter::new(
            field_name.to_string(),
            self.value.clone(),
        )))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Display for NotEqualsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} != {})", self.field, self.value)
    }
}

/// A filter that matches documents on the presence or absence of a field.
///
/// A field holding an explicit `Null` is present. `exists(false)` is
/// satisfied only when the field is missing entirely.
pub struct ExistsFilter {
    field: String,
    exists: bool,
}

impl ExistsFilter {
    pub fn new(field: String, exists: bool) -> Self {
        ExistsFilter { field, exists }
    }
}

impl FilterProvider for ExistsFilter {
    fn apply(&self, entry: &Document) -> SedimentResult<bool> {
        let present = entry.lookup(&self.field)?.is_some();
        Ok(present == self.exists)
    }

    fn field_name(&self) -> Option<String> {
        Some(self.field.clone())
    }

    fn rebase(&self, field_name: &str) -> Option<Filter> {
        Some(Filter::new(ExistsFilter::new(
            field_name.to_string(),
            self.exists,
        )))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Display for ExistsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} exists: {})", self.field, self.exists)
    }
}

/// A filter that matches documents where a field equals any of a set of values.
pub struct InFilter {
    field: String,
    values: Vec<Value>,
}

impl InFilter {
    pub fn new(field: String, values: Vec<Value>) -> Self {
        InFilter { field, values }
    }
}

impl FilterProvider for InFilter {
    fn apply(&self, entry: &Document) -> SedimentResult<bool> {
        let stored = entry.get(&self.field)?;
        Ok(self
            .values
            .iter()
            .any(|value| value_matches(&stored, value)))
    }

    fn field_name(&self) -> Option<String> {
        Some(self.field.clone())
    }

    fn rebase(&self, field_name: &str) -> Option<Filter> {
        Some(Filter::new(InFilter::new(
            field_name.to_string(),
            self.values.clone(),
        )))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Display for InFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} in {:?})", self.field, self.values.iter().map(|v| v.to_string()).collect::<Vec<_>>())
    }
}

/// A filter that matches documents where a field equals none of a set of values.
///
/// A missing field equals none of the values, so it matches.
pub struct NotInFilter {
    field: String,
    values: Vec<Value>,
}

impl NotInFilter {
    pub fn new(field: String, values: Vec<Value>) -> Self {
        NotInFilter { field, values }
    }
}

impl FilterProvider for NotInFilter {
    fn apply(&self, entry: &Document) -> SedimentResult<bool> {
        let stored = entry.get(&self.field)?;
        Ok(!self
            .values
            .iter()
            .any(|value| value_matches(&stored, value)))
    }

    fn field_name(&self) -> Option<String> {
        Some(self.field.clone())
    }

    fn rebase(&self, field_name: &str) -> Option<Filter> {
        Some(Filter::new(NotInFilter::new(
            field_name.to_string(),
            self.values.clone(),
        )))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Display for NotInFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} not in {:?})", self.field, self.values.iter().map(|v| v.to_string()).collect::<Vec<_>>())
    }
}

use crate::common::SortOrder;

/// Options to control the result set of a find operation.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    limit: Option<usize>,
    order_by: Vec<(String, SortOrder)>,
}

impl FindOptions {
    /// Creates a new `FindOptions` with no limit and no ordering.
    pub fn new() -> Self {
        FindOptions {
            limit: None,
            order_by: Vec::new(),
        }
    }

    /// Caps the number of documents returned by the find.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Adds a sort key. Keys are applied in the order they are added.
    pub fn with_order_by(mut self, field: &str, sort_order: SortOrder) -> Self {
        self.order_by.push((field.to_string(), sort_order));
        self
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn order_by(&self) -> &[(String, SortOrder)] {
        &self.order_by
    }
}

/// Creates a `FindOptions` that limits the result set to `limit` documents.
pub fn limit_by(limit: usize) -> FindOptions {
    FindOptions::new().with_limit(limit)
}

/// Creates a `FindOptions` that orders the result set by the given field.
pub fn order_by(field: &str, sort_order: SortOrder) -> FindOptions {
    FindOptions::new().with_order_by(field, sort_order)
}

use crate::collection::Document;
use crate::errors::SedimentResult;
use crate::filter::{Filter, FilterProvider};
use itertools::Itertools;
use std::any::Any;
use std::fmt::Display;

/// A filter that matches documents satisfying all of its child filters.
pub struct AndFilter {
    filters: Vec<Filter>,
}

impl AndFilter {
    pub fn new(filters: Vec<Filter>) -> Self {
        AndFilter { filters }
    }
}

impl FilterProvider for AndFilter {
    fn apply(&self, entry: &Document) -> SedimentResult<bool> {
        for filter in &self.filters {
            if !filter.apply(entry)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn conjuncts(&self) -> Option<Vec<Filter>> {
        Some(self.filters.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Display for AndFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.filters.iter().map(|f| f.to_string()).join(" && "))
    }
}

/// A filter that matches documents satisfying any of its child filters.
pub struct OrFilter {
    filters: Vec<Filter>,
}

impl OrFilter {
    pub fn new(filters: Vec<Filter>) -> Self {
        OrFilter { filters }
    }
}

impl FilterProvider for OrFilter {
    fn apply(&self, entry: &Document) -> SedimentResult<bool> {
        for filter in &self.filters {
            if filter.apply(entry)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Display for OrFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.filters.iter().map(|f| f.to_string()).join(" || "))
    }
}

/// A filter that matches documents rejected by its child filter.
pub struct NotFilter {
    filter: Filter,
}

impl NotFilter {
    pub fn new(filter: Filter) -> Self {
        NotFilter { filter }
    }
}

impl FilterProvider for NotFilter {
    fn apply(&self, entry: &Document) -> SedimentResult<bool> {
        Ok(!self.filter.apply(entry)?)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Display for NotFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "!({})", self.filter)
    }
}

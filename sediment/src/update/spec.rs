use crate::common::Value;

/// A single mutation operator inside an [UpdateSpec].
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOp {
    /// Sets the field at `path` to `value`, creating intermediate documents.
    Set { path: String, value: Value },
    /// Removes the field at `path`; no-op when absent.
    Unset { path: String },
    /// Adds `delta` to the numeric field at `path`; absent counts as zero.
    Inc { path: String, delta: Value },
    /// Appends `value` to the array at `path`, creating the array when absent.
    Push { path: String, value: Value },
    /// Appends every value to the array at `path`.
    PushAll { path: String, values: Vec<Value> },
    /// Removes all array elements deep-equal to `value`.
    Pull { path: String, value: Value },
    /// Removes all array elements deep-equal to any of `values`.
    PullAll { path: String, values: Vec<Value> },
    /// Removes the first (`direction < 0`) or last (`direction > 0`) element.
    Pop { path: String, direction: i32 },
}

impl UpdateOp {
    pub(crate) fn path(&self) -> &str {
        match self {
            UpdateOp::Set { path, .. } => path,
            UpdateOp::Unset { path } => path,
            UpdateOp::Inc { path, .. } => path,
            UpdateOp::Push { path, .. } => path,
            UpdateOp::PushAll { path, .. } => path,
            UpdateOp::Pull { path, .. } => path,
            UpdateOp::PullAll { path, .. } => path,
            UpdateOp::Pop { path, .. } => path,
        }
    }
}

/// An ordered list of mutation operators applied to a document as a unit.
///
/// Operators are applied in the order they were added; a failing operator
/// aborts the whole application with no partial result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSpec {
    ops: Vec<UpdateOp>,
}

impl UpdateSpec {
    /// Creates an empty update specification.
    pub fn new() -> Self {
        UpdateSpec { ops: Vec::new() }
    }

    /// Sets the field at `path` to `value`.
    pub fn set<T: Into<Value>>(mut self, path: &str, value: T) -> Self {
        self.ops.push(UpdateOp::Set {
            path: path.to_string(),
            value: value.into(),
        });
        self
    }

    /// Removes the field at `path`.
    pub fn unset(mut self, path: &str) -> Self {
        self.ops.push(UpdateOp::Unset {
            path: path.to_string(),
        });
        self
    }

    /// Increments the numeric field at `path` by `delta`.
    pub fn inc<T: Into<Value>>(mut self, path: &str, delta: T) -> Self {
        self.ops.push(UpdateOp::Inc {
            path: path.to_string(),
            delta: delta.into(),
        });
        self
    }

    /// Appends `value` to the array at `path`.
    pub fn push<T: Into<Value>>(mut self, path: &str, value: T) -> Self {
        self.ops.push(UpdateOp::Push {
            path: path.to_string(),
            value: value.into(),
        });
        self
    }

    /// Appends every element of `values` to the array at `path`.
    pub fn push_all(mut self, path: &str, values: Vec<Value>) -> Self {
        self.ops.push(UpdateOp::PushAll {
            path: path.to_string(),
            values,
        });
        self
    }

    /// Removes all elements of the array at `path` deep-equal to `value`.
    pub fn pull<T: Into<Value>>(mut self, path: &str, value: T) -> Self {
        self.ops.push(UpdateOp::Pull {
            path: path.to_string(),
            value: value.into(),
        });
        self
    }

    /// Removes all elements of the array at `path` deep-equal to any of `values`.
    pub fn pull_all(mut self, path: &str, values: Vec<Value>) -> Self {
        self.ops.push(UpdateOp::PullAll {
            path: path.to_string(),
            values,
        });
        self
    }

    /// Removes one element from the array at `path`. A negative direction
    /// removes the first element, a positive one the last.
    pub fn pop(mut self, path: &str, direction: i32) -> Self {
        self.ops.push(UpdateOp::Pop {
            path: path.to_string(),
            direction,
        });
        self
    }

    /// Returns true when the spec contains no operators.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub(crate) fn ops(&self) -> &[UpdateOp] {
        &self.ops
    }

    /// The path and value of every `set` operator, in order.
    ///
    /// Upsert synthesis seeds the new document from these.
    pub(crate) fn set_effects(&self) -> Vec<(&str, &Value)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                UpdateOp::Set { path, value } => Some((path.as_str(), value)),
                _ => None,
            })
            .collect()
    }
}

/// Options to control the behavior of an update operation.
///
/// # Fields
/// - `insert_if_absent`: when `true` and the filter matches no document, a new
///   document is synthesized from the filter's equality fields and the update's
///   set effects, then inserted (upsert).
/// - `just_once`: when `true` (the default), at most the first matching
///   document is updated. Clear it to update every matching document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOptions {
    insert_if_absent: bool,
    just_once: bool,
}

impl UpdateOptions {
    /// Creates a new `UpdateOptions`: no upsert, single-match update.
    pub fn new() -> Self {
        UpdateOptions {
            insert_if_absent: false,
            just_once: true,
        }
    }

    /// Sets whether a missing match should insert a synthesized document.
    pub fn with_insert_if_absent(mut self, insert_if_absent: bool) -> Self {
        self.insert_if_absent = insert_if_absent;
        self
    }

    /// Sets whether only the first matching document should be updated.
    pub fn with_just_once(mut self, just_once: bool) -> Self {
        self.just_once = just_once;
        self
    }

    pub fn insert_if_absent(&self) -> bool {
        self.insert_if_absent
    }

    pub fn just_once(&self) -> bool {
        self.just_once
    }
}

impl Default for UpdateOptions {
    fn default() -> Self {
        UpdateOptions::new()
    }
}

/// Creates an `UpdateOptions` for an upsert operation.
pub fn upsert_options() -> UpdateOptions {
    UpdateOptions::new().with_insert_if_absent(true)
}

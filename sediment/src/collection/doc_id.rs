use crate::errors::{ErrorKind, SedimentError, SedimentResult};
use crate::ID_GENERATOR;
use once_cell::sync::Lazy;
use std::fmt::{Debug, Display};

static ID_TOO_LARGE_ERROR: Lazy<SedimentError> = Lazy::new(|| {
    SedimentError::new(
        &format!(
            "DocId validation error: id value must be less than 10^19 ({})",
            10u64.pow(19)
        ),
        ErrorKind::InvalidId,
    )
});

static ID_TOO_SMALL_ERROR: Lazy<SedimentError> = Lazy::new(|| {
    SedimentError::new(
        &format!(
            "DocId validation error: id value must be greater than or equal to 10^18 ({})",
            10u64.pow(18)
        ),
        ErrorKind::InvalidId,
    )
});

static MAX_VALUE: Lazy<u64> = Lazy::new(|| 10u64.pow(19));
static MIN_VALUE: Lazy<u64> = Lazy::new(|| 10u64.pow(18));

/// A unique identifier for documents in Sediment.
///
/// Each document in a collection is uniquely identified by a `DocId`. The ID is
/// automatically generated using a Snowflake-like distributed ID generator if not
/// explicitly provided when inserting a document.
///
/// # ID Generation
///
/// Sediment uses a Snowflake-based ID generator that produces 64-bit unsigned integers
/// in the range [10^18, 10^19). This ensures:
/// - Uniqueness across all documents
/// - Approximate timestamp ordering
/// - No central coordination required
///
/// # Storage
///
/// The ID is stored in the `_id` field of documents. Two distinct insertions of the
/// same source document receive distinct ids.
#[derive(PartialEq, Eq, Ord, PartialOrd, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocId {
    id_value: u64,
}

impl DocId {
    /// Generates a new unique `DocId`.
    ///
    /// Uses the internal Snowflake ID generator to create a unique ID
    /// based on timestamp and machine information.
    pub fn new() -> Self {
        let id_value = ID_GENERATOR.get_id();
        DocId { id_value }
    }

    /// Creates a `DocId` from a specific value.
    ///
    /// The value must be within the valid range [10^18, 10^19).
    ///
    /// # Arguments
    ///
    /// * `id_value` - A 64-bit unsigned integer ID
    ///
    /// # Returns
    ///
    /// `Ok(DocId)` if the value is valid, or `Err(SedimentError)` if it's outside
    /// the valid range
    pub fn create_id(id_value: u64) -> SedimentResult<DocId> {
        DocId::valid_id(id_value)?;
        Ok(DocId { id_value })
    }

    /// Gets the numeric value of this ID.
    pub fn id_value(&self) -> u64 {
        self.id_value
    }

    pub(crate) fn valid_id(id_value: u64) -> SedimentResult<bool> {
        if id_value >= *MAX_VALUE {
            log::error!("Id value is too large");
            return Err(ID_TOO_LARGE_ERROR.clone());
        } else if id_value < *MIN_VALUE {
            log::error!("Id value is too small");
            return Err(ID_TOO_SMALL_ERROR.clone());
        }

        Ok(true)
    }
}

impl Default for DocId {
    fn default() -> Self {
        DocId::new()
    }
}

impl Debug for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.id_value)
    }
}

impl Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.id_value)
    }
}

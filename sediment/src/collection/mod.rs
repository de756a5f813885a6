//! Collections and documents for schemaless data storage.
//!
//! This module provides the core document storage abstraction in Sediment.
//! Collections store unstructured documents and support flexible querying,
//! updates, and aggregation.
//!
//! # Documents
//!
//! A `Document` is a key-value map where keys are strings and values are `Value` objects.
//! Documents support nested fields using the `.` separator.
//!
//! ```rust,ignore
//! use sediment::collection::Document;
//!
//! let mut doc = Document::new();
//! doc.put("name", "Alice")?;
//! doc.put("address.city", "New York")?;
//! doc.put("age", 30i64)?;
//! ```
//!
//! # Collections
//!
//! A `Collection` manages documents with the same logical type. Collections support:
//! - Insert, update, remove operations
//! - Flexible querying with filters
//! - Aggregation pipelines
//!
//! ```rust,ignore
//! use sediment::collection::Document;
//! use sediment::filter::field;
//!
//! let restaurants = db.collection("restaurants")?;
//!
//! // Insert
//! let mut doc = Document::new();
//! doc.put("name", "Juni")?;
//! let result = restaurants.insert(doc)?;
//!
//! // Query
//! let filter = field("borough").eq("Manhattan");
//! let results = restaurants.find(filter)?;
//! ```
//!
//! # Document IDs
//!
//! Each document has a unique `_id` field containing a `DocId`. The ID is
//! automatically generated using a Snowflake algorithm if not provided during
//! insertion.

#[allow(clippy::module_inception)]
mod collection;
mod doc_id;
mod document;
mod find_options;
pub(crate) mod operation;
pub(crate) mod snowflake;
mod update_options;
mod write_result;

pub use collection::*;
pub use doc_id::DocId;
pub use document::*;
pub use find_options::*;
pub use update_options::*;
pub use write_result::*;

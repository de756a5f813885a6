//! Query filters for selecting documents from collections.
//!
//! This module provides a composable filtering API for querying documents
//! in Sediment. Filters can be combined using logical operators and support
//! various comparison operations.
//!
//! # Creating Filters
//!
//! Filters are created using the fluent API:
//! - `field("age").gt(30)` - comparison operators
//! - `field("name").eq("Alice")` - equality checks
//! - `all()` - match all documents
//! - `by_id(id)` - match by document ID
//! - `field("name").eq("Alice").and(field("age").gt(30))` - logical AND
//!
//! # Examples
//!
//! ```rust,ignore
//! use sediment::filter::{field, all};
//!
//! // Simple filters using fluent API
//! let age_filter = field("age").gt(30);
//! let borough_filter = field("borough").eq("Brooklyn");
//!
//! // Fluent API with logical combinations
//! let filter = field("age").gt(30).and(field("status").eq("active"));
//!
//! // Using filters with collections
//! let results = collection.find(filter)?;
//! ```
//!
//! # Supported Operators
//!
//! - **Equality**: `eq`, `ne`
//! - **Comparison**: `gt`, `gte`, `lt`, `lte`, `between`
//! - **Membership**: `within`, `not_within`
//! - **Existence**: `exists`
//! - **Logical**: `and`, `or`, `not`
//! - **Special**: `all` (match all), `by_id` (match by ID)

mod basic_filters;
#[allow(clippy::module_inception)]
mod filter;
mod fluent;
mod logical_filters;
mod range_filters;

pub use basic_filters::*;
pub use filter::*;
pub use fluent::*;
pub use logical_filters::*;
pub use range_filters::*;

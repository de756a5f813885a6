#![allow(dead_code)]
//! # Sediment - Embedded JSON-Document Query Engine
//!
//! Sediment is a lightweight, embedded, single-node document engine written in Rust.
//! It stores schemaless JSON-like documents in named collections and supports rich
//! predicate queries, in-place document updates, and multi-stage aggregation pipelines.
//!
//! ## Key Features
//!
//! - **Embedded**: No separate server process required
//! - **Schemaless**: Documents are free-form trees of typed values
//! - **Rich Querying**: Composable filter API with logical and range operators
//! - **Updates**: Field-level update operators including positional array updates
//! - **Aggregation**: Match, project, group, sort, and limit pipeline stages
//! - **Clean API**: PIMPL pattern provides stable, encapsulated interface
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sediment::db::Database;
//! use sediment::doc;
//! use sediment::filter::field;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new();
//! let restaurants = db.collection("restaurants")?;
//!
//! restaurants.insert(doc! {
//!     "name": "Brooklyn Deli",
//!     "borough": "Brooklyn",
//!     "cuisine": "Delicatessen",
//! })?;
//!
//! let mut cursor = restaurants.find(field("borough").eq("Brooklyn"))?;
//! for doc in &mut cursor {
//!     println!("{:?}", doc?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - Document collections and document operations
//! - [`common`] - Common types, traits, and utilities
//! - [`db`] - Top-level database handle
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - Query filters and filter providers
//! - [`pipeline`] - Aggregation pipeline stages and execution
//! - [`store`] - In-memory storage primitives
//! - [`update`] - Update operator specifications and application

use crate::collection::snowflake::SnowflakeIdGenerator;
use std::sync::LazyLock;

pub mod collection;
pub mod common;
pub mod db;
pub mod errors;
pub mod filter;
pub mod pipeline;
pub mod store;
pub mod update;

pub(crate) static ID_GENERATOR: LazyLock<SnowflakeIdGenerator> =
    LazyLock::new(SnowflakeIdGenerator::new);

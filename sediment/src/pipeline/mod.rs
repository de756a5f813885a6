//! Aggregation pipelines over document streams.
//!
//! A pipeline is an ordered list of [PipelineStage]s executed left to right
//! over a collection's snapshot stream. Match, project, and limit stages are
//! lazy; sort and group materialize their input.
//!
//! ```rust,ignore
//! use sediment::pipeline::{Expr, GroupSpec, PipelineStage};
//! use sediment::filter::field;
//!
//! let stages = vec![
//!     PipelineStage::Match(field("borough").eq("Brooklyn")),
//!     PipelineStage::Group(
//!         GroupSpec::global().sum("count", Expr::literal(1)),
//!     ),
//! ];
//! let mut cursor = restaurants.aggregate(stages)?;
//! ```

mod engine;
mod expression;
mod group;
mod project;
mod stage;

pub(crate) use engine::execute;
pub use expression::Expr;
pub use group::{Accumulator, GroupSpec};
pub use project::{ProjectField, ProjectSpec};
pub use stage::PipelineStage;

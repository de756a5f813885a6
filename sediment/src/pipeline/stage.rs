use crate::common::SortOrder;
use crate::filter::Filter;
use crate::pipeline::{GroupSpec, ProjectSpec};

/// One stage of an aggregation pipeline.
///
/// Stages execute left to right over the document stream produced by the
/// preceding stage.
#[derive(Clone)]
pub enum PipelineStage {
    /// Keeps only documents matching the filter.
    Match(Filter),
    /// Reshapes each document according to the projection.
    Project(ProjectSpec),
    /// Folds the stream into one document per group.
    Group(GroupSpec),
    /// Stable sort by the given keys, applied in order.
    Sort(Vec<(String, SortOrder)>),
    /// Truncates the stream to the first `n` documents.
    Limit(i64),
}

impl PipelineStage {
    /// Creates a sort stage with a single key.
    pub fn sort_by(field: &str, order: SortOrder) -> Self {
        PipelineStage::Sort(vec![(field.to_string(), order)])
    }
}

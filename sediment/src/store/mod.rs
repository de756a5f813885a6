//! In-memory document storage.
//!
//! The store keeps one [CollectionMap] per collection name. A collection map
//! is a persistent ordered map from [DocId](crate::collection::DocId) to
//! [Document](crate::collection::Document); cloning it under a read lock
//! yields a cheap point-in-time snapshot that readers iterate without
//! blocking writers.

mod map;
#[allow(clippy::module_inception)]
mod store;

pub(crate) use map::CollectionMap;
pub(crate) use store::DocumentStore;

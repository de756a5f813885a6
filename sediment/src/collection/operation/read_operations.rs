use crate::collection::{Document, FindOptions};
use crate::common::stream::{DocumentCursor, FilteredStream, SortedStream};
use crate::errors::SedimentResult;
use crate::filter::{is_all_filter, Filter};
use crate::pipeline::{self, PipelineStage};
use crate::store::CollectionMap;

type DocumentStream = Box<dyn Iterator<Item = SedimentResult<Document>>>;

/// Read-side operations of a collection.
///
/// Every read starts from a snapshot of the backing map, so a cursor is
/// never affected by writes that land after it was created.
#[derive(Clone)]
pub(crate) struct ReadOperations {
    map: CollectionMap,
}

impl ReadOperations {
    pub fn new(map: CollectionMap) -> Self {
        ReadOperations { map }
    }

    fn snapshot_stream(&self) -> DocumentStream {
        Box::new(self.map.snapshot().into_iter().map(|(_, doc)| Ok(doc)))
    }

    pub fn find(&self, filter: Filter, options: &FindOptions) -> SedimentResult<DocumentCursor> {
        let mut stream = self.snapshot_stream();
        if !is_all_filter(&filter) {
            stream = Box::new(FilteredStream::new(stream, filter));
        }
        if !options.order_by().is_empty() {
            stream = Box::new(SortedStream::new(stream, options.order_by().to_vec()));
        }
        if let Some(limit) = options.limit() {
            stream = Box::new(stream.take(limit));
        }
        Ok(DocumentCursor::new(stream))
    }

    pub fn aggregate(&self, stages: Vec<PipelineStage>) -> SedimentResult<DocumentCursor> {
        pipeline::execute(stages, self.snapshot_stream())
    }
}

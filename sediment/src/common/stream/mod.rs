mod document_cursor;
mod filtered_stream;
mod sorted_stream;

pub use document_cursor::DocumentCursor;
pub(crate) use filtered_stream::FilteredStream;
pub(crate) use sorted_stream::SortedStream;

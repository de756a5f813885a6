use crate::{collection::Document, errors::SedimentResult, filter::Filter};

pub(crate) struct FilteredStream {
    raw_stream: Box<dyn Iterator<Item = SedimentResult<Document>>>,
    filter: Filter,
}

impl FilteredStream {
    pub fn new(
        raw_stream: Box<dyn Iterator<Item = SedimentResult<Document>>>,
        filter: Filter,
    ) -> Self {
        FilteredStream { raw_stream, filter }
    }
}

impl Iterator for FilteredStream {
    type Item = SedimentResult<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.raw_stream.next() {
                Some(Ok(doc)) => {
                    // Inline filter application with minimal branching
                    match self.filter.apply(&doc) {
                        Ok(true) => return Some(Ok(doc)),
                        Ok(false) => continue,
                        Err(e) => return Some(Err(e)),
                    }
                }
                Some(Err(e)) => return Some(Err(e)),
                None => return None,
            }
        }
    }
}

use crate::{
    collection::Document,
    common::SortOrder,
    errors::{SedimentError, SedimentResult},
};

// SortedStream materializes its input; Vec::sort_by is stable, so documents
// that compare equal on every sort key keep their input order.
pub(crate) struct SortedStream {
    sorted: Vec<SedimentResult<Document>>,
    error: Option<SedimentError>,
    current_index: usize,
}

impl SortedStream {
    pub fn new<I: Iterator<Item = SedimentResult<Document>>>(
        raw_stream: I,
        sort_order: Vec<(String, SortOrder)>,
    ) -> Self {
        let unsorted = raw_stream.collect::<Vec<SedimentResult<Document>>>();
        let mut error = None;

        let mut cleaned = Vec::with_capacity(unsorted.len());
        for doc in unsorted.iter() {
            if doc.is_err() {
                error = doc.as_ref().err().cloned();
                break;
            }
            cleaned.push(doc.clone());
        }

        cleaned.sort_by(|a, b| {
            for (field, order) in sort_order.iter() {
                let a_value = match a.as_ref() {
                    Ok(doc) => doc.get(field).unwrap_or_default(),
                    Err(_) => return std::cmp::Ordering::Less,
                };

                let b_value = match b.as_ref() {
                    Ok(doc) => doc.get(field).unwrap_or_default(),
                    Err(_) => return std::cmp::Ordering::Greater,
                };

                // missing fields read as null, and null sorts before everything
                let cmp = a_value.cmp(&b_value);

                if cmp != std::cmp::Ordering::Equal {
                    return match order {
                        SortOrder::Ascending => cmp,
                        SortOrder::Descending => cmp.reverse(),
                    };
                }
            }
            std::cmp::Ordering::Equal
        });

        Self {
            sorted: cleaned,
            error,
            current_index: 0,
        }
    }
}

impl Iterator for SortedStream {
    type Item = SedimentResult<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        // fail fast if any error occurs
        if let Some(error) = self.error.clone() {
            return Some(Err(error));
        }

        if self.current_index < self.sorted.len() {
            let result = self.sorted[self.current_index].clone();
            self.current_index += 1;
            Some(result)
        } else {
            None
        }
    }
}

use crate::collection::Document;
use crate::common::stream::{DocumentCursor, FilteredStream, SortedStream};
use crate::errors::{ErrorKind, SedimentError, SedimentResult};
use crate::pipeline::PipelineStage;

type DocumentStream = Box<dyn Iterator<Item = SedimentResult<Document>>>;

/// Executes a pipeline over a document stream.
///
/// Stage specifications are validated up front, before any document flows.
/// Match, project, and limit stages stay lazy; sort and group materialize.
pub(crate) fn execute(
    stages: Vec<PipelineStage>,
    initial: DocumentStream,
) -> SedimentResult<DocumentCursor> {
    validate(&stages)?;

    let mut stream = initial;
    for stage in stages {
        stream = match stage {
            PipelineStage::Match(filter) => Box::new(FilteredStream::new(stream, filter)),
            PipelineStage::Project(spec) => Box::new(
                stream.map(move |item| item.and_then(|doc| spec.project(&doc))),
            ),
            PipelineStage::Group(spec) => {
                let docs = stream.collect::<SedimentResult<Vec<Document>>>()?;
                Box::new(spec.execute(docs)?.into_iter().map(Ok))
            }
            PipelineStage::Sort(sort_order) => Box::new(SortedStream::new(stream, sort_order)),
            PipelineStage::Limit(n) => Box::new(stream.take(n as usize)),
        };
    }
    Ok(DocumentCursor::new(stream))
}

fn validate(stages: &[PipelineStage]) -> SedimentResult<()> {
    for stage in stages {
        match stage {
            PipelineStage::Limit(n) if *n < 0 => {
                log::error!("limit must be non-negative, found {}", n);
                return Err(SedimentError::new(
                    format!("limit must be non-negative, found {}", n),
                    ErrorKind::InvalidArgument,
                ));
            }
            PipelineStage::Project(spec) => spec.validate()?,
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::SortOrder;
    use crate::common::Value;
    use crate::doc;
    use crate::filter::field;
    use crate::pipeline::{Expr, GroupSpec, ProjectSpec};

    fn restaurants() -> DocumentStream {
        let docs = vec![
            doc! { "name": "Juni", "borough": "Manhattan", "score": 7 },
            doc! { "name": "Shake Shack", "borough": "Brooklyn", "score": 4 },
            doc! { "name": "Vella", "borough": "Brooklyn", "score": 9 },
        ];
        Box::new(docs.into_iter().map(Ok))
    }

    #[test]
    fn test_match_then_group_counts() {
        let stages = vec![
            PipelineStage::Match(field("borough").eq("Brooklyn")),
            PipelineStage::Group(GroupSpec::global().sum("count", Expr::literal(1))),
        ];
        let mut cursor = execute(stages, restaurants()).unwrap();
        let groups = cursor.to_vec().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].get("count").unwrap(), Value::I64(2));
    }

    #[test]
    fn test_sort_then_limit() {
        let stages = vec![
            PipelineStage::sort_by("score", SortOrder::Descending),
            PipelineStage::Limit(2),
        ];
        let mut cursor = execute(stages, restaurants()).unwrap();
        let docs = cursor.to_vec().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].get("name").unwrap(), Value::from("Vella"));
        assert_eq!(docs[1].get("name").unwrap(), Value::from("Juni"));
    }

    #[test]
    fn test_limit_larger_than_stream() {
        let stages = vec![PipelineStage::Limit(10)];
        let mut cursor = execute(stages, restaurants()).unwrap();
        assert_eq!(cursor.size(), 3);
    }

    #[test]
    fn test_negative_limit_rejected_before_execution() {
        let stages = vec![PipelineStage::Limit(-1)];
        let err = execute(stages, restaurants()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_invalid_projection_rejected_before_execution() {
        let spec = ProjectSpec::new().include("name").exclude("score");
        let stages = vec![PipelineStage::Project(spec)];
        let err = execute(stages, restaurants()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidProjection);
    }

    #[test]
    fn test_project_rename_via_expression() {
        let stages = vec![PipelineStage::Project(
            ProjectSpec::new()
                .include("name")
                .compute("Type of food", Expr::field("borough")),
        )];
        let mut cursor = execute(stages, restaurants()).unwrap();
        let docs = cursor.to_vec().unwrap();
        assert_eq!(
            docs[0].get("Type of food").unwrap(),
            Value::from("Manhattan")
        );
    }

    #[test]
    fn test_group_by_borough_push_names() {
        let stages = vec![PipelineStage::Group(
            GroupSpec::by(Expr::field("borough")).push("names", Expr::field("name")),
        )];
        let mut cursor = execute(stages, restaurants()).unwrap();
        let groups = cursor.to_vec().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups[1].get("names").unwrap(),
            Value::Array(vec![
                Value::from("Shake Shack"),
                Value::from("Vella")
            ])
        );
    }

    #[test]
    fn test_empty_pipeline_passes_through() {
        let mut cursor = execute(Vec::new(), restaurants()).unwrap();
        assert_eq!(cursor.size(), 3);
    }
}

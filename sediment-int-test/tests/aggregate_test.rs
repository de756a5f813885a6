use sediment::common::{SortOrder, Value};
use sediment::doc;
use sediment::errors::ErrorKind;
use sediment::filter::field;
use sediment::pipeline::{Expr, GroupSpec, PipelineStage, ProjectSpec};
use sediment_int_test::test_util::{cleanup, create_test_context, insert_restaurants, run_test};

#[ctor::ctor]
fn init() {
    colog::init();
}

#[test]
fn test_match_and_count_brooklyn() {
    run_test(
        create_test_context,
        |ctx| {
            let coll = ctx.db().collection("restaurants")?;
            insert_restaurants(&coll)?;

            let stages = vec![
                PipelineStage::Match(field("borough").eq("Brooklyn")),
                PipelineStage::Group(GroupSpec::global().sum("count", Expr::literal(1))),
            ];
            let mut cursor = coll.aggregate(stages)?;
            let groups = cursor.to_vec()?;
            assert_eq!(groups.len(), 1);
            assert_eq!(groups[0].get("_id")?, Value::Null);
            assert_eq!(groups[0].get("count")?, Value::I64(3));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_group_by_borough() {
    run_test(
        create_test_context,
        |ctx| {
            let coll = ctx.db().collection("restaurants")?;
            insert_restaurants(&coll)?;

            let stages = vec![
                PipelineStage::Group(
                    GroupSpec::by(Expr::field("borough"))
                        .sum("count", Expr::literal(1))
                        .push("names", Expr::field("name")),
                ),
                PipelineStage::sort_by("count", SortOrder::Descending),
            ];
            let mut cursor = coll.aggregate(stages)?;
            let groups = cursor.to_vec()?;
            assert_eq!(groups.len(), 4);
            assert_eq!(groups[0].get("_id")?, Value::from("Brooklyn"));
            assert_eq!(groups[0].get("count")?, Value::I64(3));
            let names = groups[0].get("names")?;
            if let Value::Array(names) = names {
                assert_eq!(names.len(), 3);
            } else {
                panic!("names should be an array, found {}", names);
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_projection_rename_never_leaks_id() {
    run_test(
        create_test_context,
        |ctx| {
            let coll = ctx.db().collection("restaurants")?;
            insert_restaurants(&coll)?;

            let stages = vec![PipelineStage::Project(
                ProjectSpec::new()
                    .exclude("_id")
                    .include("name")
                    .compute("Type of food", Expr::field("cuisine")),
            )];
            let mut cursor = coll.aggregate(stages)?;
            for doc in &mut cursor {
                let doc = doc?;
                assert!(doc.lookup("_id")?.is_none());
                assert!(doc.lookup("name")?.is_some());
                assert!(doc.lookup("Type of food")?.is_some());
                assert_eq!(doc.size(), 2);
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_projection_concat_of_address_parts() {
    run_test(
        create_test_context,
        |ctx| {
            let coll = ctx.db().collection("restaurants")?;
            insert_restaurants(&coll)?;

            let stages = vec![
                PipelineStage::Match(field("name").eq("Wendy'S")),
                PipelineStage::Project(
                    ProjectSpec::new().exclude("_id").compute(
                        "location",
                        Expr::concat(vec![
                            Expr::field("address.street"),
                            Expr::literal(", "),
                            Expr::field("address.zipcode"),
                        ]),
                    ),
                ),
            ];
            let mut cursor = coll.aggregate(stages)?;
            let docs = cursor.to_vec()?;
            assert_eq!(docs.len(), 1);
            assert_eq!(
                docs[0].get("location")?,
                Value::from("Flatbush Avenue, 11225")
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_limit_five() {
    run_test(
        create_test_context,
        |ctx| {
            let coll = ctx.db().collection("restaurants")?;
            insert_restaurants(&coll)?;

            let mut cursor = coll.aggregate(vec![PipelineStage::Limit(5)])?;
            assert_eq!(cursor.size(), 5);

            coll.remove_all()?;
            coll.insert(doc! { "name": "Only" })?;
            let mut cursor = coll.aggregate(vec![PipelineStage::Limit(5)])?;
            assert_eq!(cursor.size(), 1);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_negative_limit_rejected() {
    run_test(
        create_test_context,
        |ctx| {
            let coll = ctx.db().collection("restaurants")?;
            insert_restaurants(&coll)?;

            let err = coll.aggregate(vec![PipelineStage::Limit(-3)]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_sort_stage_is_stable() {
    run_test(
        create_test_context,
        |ctx| {
            let coll = ctx.db().collection("orders")?;
            coll.insert_many(vec![
                doc! { "item": "a", "rank": 1 },
                doc! { "item": "b", "rank": 1 },
                doc! { "item": "c", "rank": 0 },
            ])?;

            let stages = vec![PipelineStage::sort_by("rank", SortOrder::Ascending)];
            let mut cursor = coll.aggregate(stages)?;
            let docs = cursor.to_vec()?;
            assert_eq!(docs[0].get("item")?, Value::from("c"));
            // ties keep insertion (store) order
            assert_eq!(docs[1].get("item")?, Value::from("a"));
            assert_eq!(docs[2].get("item")?, Value::from("b"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_full_pipeline_match_group_sort_limit() {
    run_test(
        create_test_context,
        |ctx| {
            let coll = ctx.db().collection("restaurants")?;
            insert_restaurants(&coll)?;

            let stages = vec![
                PipelineStage::Match(field("grades.grade").eq("A")),
                PipelineStage::Group(
                    GroupSpec::by(Expr::field("borough")).sum("count", Expr::literal(1)),
                ),
                PipelineStage::sort_by("count", SortOrder::Descending),
                PipelineStage::Limit(2),
            ];
            let mut cursor = coll.aggregate(stages)?;
            let groups = cursor.to_vec()?;
            assert_eq!(groups.len(), 2);
            assert_eq!(groups[0].get("_id")?, Value::from("Brooklyn"));
            Ok(())
        },
        cleanup,
    )
}

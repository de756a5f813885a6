use sediment::collection::UpdateOptions;
use sediment::doc;
use sediment::errors::SedimentResult;
use sediment::filter::{all, field};
use sediment::update::UpdateSpec;
use sediment_int_test::test_util::{cleanup, create_test_context};

fn main() -> SedimentResult<()> {
    println!("Starting stress test...");
    let ctx = create_test_context()?;

    let count = 100_000;
    let coll = ctx.db().collection("stress")?;

    let start = std::time::Instant::now();
    for i in 0..count {
        coll.insert(doc! {
            "index": i,
            "bucket": (i % 10),
            "processed": false,
        })?;
    }
    println!("Inserted {} documents in {:?}", count, start.elapsed());

    let start = std::time::Instant::now();
    let mut cursor = coll.find(field("bucket").eq(7))?;
    println!(
        "Found {} documents in bucket 7 in {:?}",
        cursor.size(),
        start.elapsed()
    );

    let start = std::time::Instant::now();
    let spec = UpdateSpec::new().set("processed", true);
    let options = UpdateOptions::new().with_just_once(false);
    let result = coll.update(all(), &spec, &options)?;
    println!(
        "Updated {} documents in {:?}",
        result.affected_count(),
        start.elapsed()
    );

    let start = std::time::Instant::now();
    let mut cursor = coll.find(field("processed").eq(true))?;
    println!(
        "Counted {} processed documents in {:?}",
        cursor.size(),
        start.elapsed()
    );

    cleanup(ctx)
}

use chrono::{DateTime, TimeZone, Utc};
use sediment::collection::Collection;
use sediment::db::Database;
use sediment::doc;
use sediment::errors::SedimentResult;

/// Runs a test with setup and teardown.
///
/// Tests run on the current thread; the teardown runs whether or not the
/// test body succeeded, then the first failure is reported.
pub fn run_test<B, T, A>(before: B, test: T, after: A)
where
    B: Fn() -> SedimentResult<TestContext>,
    T: Fn(TestContext) -> SedimentResult<()>,
    A: Fn(TestContext) -> SedimentResult<()>,
{
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };

    let result = test(ctx.clone());
    let after_result = after(ctx);

    if let Err(e) = result {
        panic!("Test failed: {:?}", e);
    }
    if let Err(e) = after_result {
        panic!("After run failed: {:?}", e);
    }
}

#[derive(Clone)]
pub struct TestContext {
    db: Database,
}

impl TestContext {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn db(&self) -> Database {
        self.db.clone()
    }
}

pub fn create_test_context() -> SedimentResult<TestContext> {
    Ok(TestContext::new(Database::new()))
}

pub fn cleanup(ctx: TestContext) -> SedimentResult<()> {
    ctx.db().drop_database();
    Ok(())
}

pub fn grade_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Seeds a collection with the restaurant fixture used across the
/// integration tests: six restaurants over three boroughs, each with a
/// nested address and a grades array.
pub fn insert_restaurants(coll: &Collection) -> SedimentResult<()> {
    let docs = vec![
        doc! {
            "name": "Morris Park Bake Shop",
            "borough": "Bronx",
            "cuisine": "Bakery",
            "address": { "street": "Morris Park Ave", "zipcode": "10462" },
            "grades": [
                { "grade": "A", "score": 2, "date": (grade_date(2014, 3, 3)) },
                { "grade": "A", "score": 6, "date": (grade_date(2013, 9, 11)) },
            ],
        },
        doc! {
            "name": "Wendy'S",
            "borough": "Brooklyn",
            "cuisine": "Hamburgers",
            "address": { "street": "Flatbush Avenue", "zipcode": "11225" },
            "grades": [
                { "grade": "A", "score": 8, "date": (grade_date(2014, 12, 30)) },
                { "grade": "B", "score": 23, "date": (grade_date(2014, 7, 1)) },
            ],
        },
        doc! {
            "name": "Dj Reynolds Pub And Restaurant",
            "borough": "Manhattan",
            "cuisine": "Irish",
            "address": { "street": "West 57 Street", "zipcode": "10019" },
            "grades": [
                { "grade": "A", "score": 2, "date": (grade_date(2014, 9, 6)) },
                { "grade": "A", "score": 11, "date": (grade_date(2013, 7, 22)) },
            ],
        },
        doc! {
            "name": "Riviera Caterer",
            "borough": "Brooklyn",
            "cuisine": "American",
            "address": { "street": "Stillwell Avenue", "zipcode": "11224" },
            "grades": [
                { "grade": "A", "score": 5, "date": (grade_date(2014, 6, 10)) },
                { "grade": "A", "score": 7, "date": (grade_date(2014, 1, 24)) },
            ],
        },
        doc! {
            "name": "Tov Kosher Kitchen",
            "borough": "Queens",
            "cuisine": "Jewish/Kosher",
            "address": { "street": "63 Road", "zipcode": "11374" },
            "grades": [
                { "grade": "Z", "score": 20, "date": (grade_date(2014, 11, 24)) },
                { "grade": "A", "score": 13, "date": (grade_date(2013, 1, 17)) },
            ],
        },
        doc! {
            "name": "Wilken'S Fine Food",
            "borough": "Brooklyn",
            "cuisine": "Delicatessen",
            "address": { "street": "Clarkson Avenue", "zipcode": "11226" },
            "grades": [
                { "grade": "A", "score": 10, "date": (grade_date(2014, 5, 29)) },
                { "grade": "A", "score": 9, "date": (grade_date(2013, 2, 1)) },
            ],
        },
    ];
    coll.insert_many(docs)?;
    Ok(())
}

use griddle::{
    record,
    schema::ColumnOptions,
    stmt::{FieldOp, Filter, Value},
    Db, Query,
};
use griddle_driver_memory::Memory;
use tests::init_logging;

struct User;

async fn setup() -> Db {
    init_logging();

    let mut builder = Db::builder();
    builder.name("batch").driver(Memory::new());
    builder
        .entity::<User>(Some("users"))
        .unwrap()
        .column::<User>(
            "id",
            ColumnOptions::new().primary(true).auto_increment(true),
        )
        .unwrap()
        .column::<User>("name", ColumnOptions::new())
        .unwrap()
        .column::<User>("age", ColumnOptions::new())
        .unwrap()
        .column::<User>("status", ColumnOptions::new())
        .unwrap();

    let db = builder.build().unwrap();
    db.initialize().await.unwrap();
    db
}

#[tokio::test]
async fn create_many_reports_the_inserted_count() {
    let db = setup().await;
    let users = db.collection::<User>().unwrap();

    let count = users
        .create_many(vec![
            record! { "name" => "Ann" },
            record! { "name" => "Bea" },
            record! { "name" => "Cal" },
        ])
        .await
        .unwrap();

    assert_eq!(count, 3);
    assert_eq!(users.count(None).await.unwrap(), 3);
}

#[tokio::test]
async fn create_many_falls_back_per_record_on_bulk_failure() {
    let db = setup().await;
    let users = db.collection::<User>().unwrap();

    // The second record duplicates the first key, so the atomic bulk insert
    // fails and the per-record retry stores only the first.
    let count = users
        .create_many(vec![
            record! { "id" => 1, "name" => "Ann" },
            record! { "id" => 1, "name" => "Imposter" },
        ])
        .await
        .unwrap();

    assert_eq!(count, 1);
    assert_eq!(users.count(None).await.unwrap(), 1);

    let stored = users
        .find_unique(&Filter::new().field("id", 1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.get("name"), Some(&Value::from("Ann")));
}

#[tokio::test]
async fn create_many_of_nothing_is_zero() {
    let db = setup().await;
    let users = db.collection::<User>().unwrap();
    assert_eq!(users.create_many(vec![]).await.unwrap(), 0);
}

#[tokio::test]
async fn update_many_applies_one_patch_to_every_match() {
    let db = setup().await;
    let users = db.collection::<User>().unwrap();

    users
        .create_many(vec![
            record! { "name" => "Ann", "age" => 20 },
            record! { "name" => "Bea", "age" => 15 },
            record! { "name" => "Cal", "age" => 12 },
        ])
        .await
        .unwrap();

    let minors = Filter::new().field("age", FieldOp::lt(18));
    let patch = vec![record! { "status" => "minor" }];

    let count = users.update_many(Some(&minors), &patch).await.unwrap();
    assert_eq!(count, 2);

    // Idempotent: the second identical call still reports the rows whose
    // update succeeded, even though no value changes.
    let count = users.update_many(Some(&minors), &patch).await.unwrap();
    assert_eq!(count, 2);

    let flagged = Filter::new().field("status", "minor");
    assert_eq!(users.count(Some(&flagged)).await.unwrap(), 2);
}

#[tokio::test]
async fn update_many_applies_patches_positionally_with_clamping() {
    let db = setup().await;
    let users = db.collection::<User>().unwrap();

    users
        .create_many(vec![
            record! { "name" => "Ann" },
            record! { "name" => "Bea" },
            record! { "name" => "Cal" },
        ])
        .await
        .unwrap();

    let patches = vec![
        record! { "status" => "first" },
        record! { "status" => "rest" },
    ];

    let count = users.update_many(None, &patches).await.unwrap();
    assert_eq!(count, 3);

    let records = users.find_many(Query::new()).await.unwrap();
    let statuses: Vec<_> = records
        .iter()
        .map(|record| record.get("status").cloned().unwrap())
        .collect();

    // The last patch applies to every match past the end of the list.
    assert_eq!(
        statuses,
        vec![
            Value::from("first"),
            Value::from("rest"),
            Value::from("rest")
        ]
    );
}

#[tokio::test]
async fn update_many_with_no_patches_is_zero() {
    let db = setup().await;
    let users = db.collection::<User>().unwrap();

    users.create(record! { "name" => "Ann" }).await.unwrap();
    assert_eq!(users.update_many(None, &[]).await.unwrap(), 0);
}

#[tokio::test]
async fn delete_many_removes_matches_and_reports_the_count() {
    let db = setup().await;
    let users = db.collection::<User>().unwrap();

    users
        .create_many(vec![
            record! { "name" => "Ann", "age" => 20 },
            record! { "name" => "Bea", "age" => 15 },
            record! { "name" => "Cal", "age" => 12 },
        ])
        .await
        .unwrap();

    let minors = Filter::new().field("age", FieldOp::lt(18));
    assert_eq!(users.delete_many(Some(&minors)).await.unwrap(), 2);
    assert_eq!(users.count(None).await.unwrap(), 1);

    // Unfiltered delete clears the rest.
    assert_eq!(users.delete_many(None).await.unwrap(), 1);
    assert_eq!(users.count(None).await.unwrap(), 0);
}

use griddle::{record, schema::ColumnOptions, stmt::Filter, stmt::Value, Db};
use griddle_driver_memory::Memory;
use tests::init_logging;

struct User;

async fn setup() -> Db {
    init_logging();

    let mut builder = Db::builder();
    builder.name("crud_basic").driver(Memory::new());
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
        .unwrap();

    let db = builder.build().unwrap();
    db.initialize().await.unwrap();
    db
}

#[tokio::test]
async fn create_then_find_unique_by_assigned_key() {
    let db = setup().await;
    let users = db.collection::<User>().unwrap();

    let created = users
        .create(record! { "name" => "Ann", "age" => 20 })
        .await
        .unwrap();
    assert_eq!(created.get("id"), Some(&Value::I64(1)));

    let found = users
        .find_unique(&Filter::new().field("id", 1))
        .await
        .unwrap()
        .expect("created record should be found");

    assert_eq!(found.get("name"), Some(&Value::from("Ann")));
    assert_eq!(found.get("age"), Some(&Value::I64(20)));
}

#[tokio::test]
async fn find_unique_miss_is_none_not_an_error() {
    let db = setup().await;
    let users = db.collection::<User>().unwrap();

    let found = users
        .find_unique(&Filter::new().field("id", 99))
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn update_merges_partial_data() {
    let db = setup().await;
    let users = db.collection::<User>().unwrap();

    users
        .create(record! { "name" => "Ann", "age" => 20 })
        .await
        .unwrap();

    let updated = users
        .update(&Filter::new().field("id", 1), record! { "age" => 21 })
        .await
        .unwrap();

    assert_eq!(updated.get("age"), Some(&Value::I64(21)));
    assert_eq!(updated.get("name"), Some(&Value::from("Ann")));
}

#[tokio::test]
async fn update_of_missing_record_fails_with_not_found() {
    let db = setup().await;
    let users = db.collection::<User>().unwrap();

    let err = users
        .update(&Filter::new().field("id", 42), record! { "age" => 1 })
        .await
        .unwrap_err();
    assert!(err.is_record_not_found());

    // Same through the scan fallback path.
    let err = users
        .update(
            &Filter::new().field("name", "Nobody"),
            record! { "age" => 1 },
        )
        .await
        .unwrap_err();
    assert!(err.is_record_not_found());
}

#[tokio::test]
async fn delete_returns_the_pre_image() {
    let db = setup().await;
    let users = db.collection::<User>().unwrap();

    users
        .create(record! { "name" => "Ann", "age" => 20 })
        .await
        .unwrap();

    let deleted = users
        .delete(&Filter::new().field("id", 1))
        .await
        .unwrap();
    assert_eq!(deleted.get("name"), Some(&Value::from("Ann")));

    let err = users
        .delete(&Filter::new().field("id", 1))
        .await
        .unwrap_err();
    assert!(err.is_record_not_found());
}

#[tokio::test]
async fn upsert_updates_hits_and_creates_misses() {
    let db = setup().await;
    let users = db.collection::<User>().unwrap();

    let filter = Filter::new().field("id", 1);

    let created = users
        .upsert(
            &filter,
            record! { "name" => "Ann", "age" => 20 },
            record! { "age" => 99 },
        )
        .await
        .unwrap();
    assert_eq!(created.get("age"), Some(&Value::I64(20)));

    let updated = users
        .upsert(
            &filter,
            record! { "name" => "Ann", "age" => 20 },
            record! { "age" => 99 },
        )
        .await
        .unwrap();
    assert_eq!(updated.get("age"), Some(&Value::I64(99)));
    assert_eq!(users.count(None).await.unwrap(), 1);
}

#[tokio::test]
async fn count_with_and_without_condition() {
    let db = setup().await;
    let users = db.collection::<User>().unwrap();

    for (name, age) in [("Ann", 20), ("Bea", 17), ("Cal", 30)] {
        users
            .create(record! { "name" => name, "age" => age })
            .await
            .unwrap();
    }

    assert_eq!(users.count(None).await.unwrap(), 3);

    let adults = Filter::new().field("age", griddle::stmt::FieldOp::gte(18));
    assert_eq!(users.count(Some(&adults)).await.unwrap(), 2);
}

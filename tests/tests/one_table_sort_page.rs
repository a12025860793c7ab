use griddle::{
    record,
    schema::ColumnOptions,
    stmt::{FieldOp, Filter, OrderBy, Value},
    Db, Query,
};
use griddle_driver_memory::Memory;
use tests::init_logging;

struct User;

async fn setup() -> Db {
    init_logging();

    let mut builder = Db::builder();
    builder.name("sort_page").driver(Memory::new());
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

    let users = db.collection::<User>().unwrap();
    users
        .create_many(vec![
            record! { "name" => "Ann", "age" => 30 },
            record! { "name" => "Bea", "age" => 20 },
            record! { "name" => "Cal", "age" => 30 },
            record! { "name" => "Dee", "age" => 25 },
        ])
        .await
        .unwrap();

    db
}

fn names(records: &[griddle::stmt::Record]) -> Vec<Value> {
    records
        .iter()
        .map(|record| record.get("name").cloned().unwrap())
        .collect()
}

#[tokio::test]
async fn order_by_sorts_the_result() {
    let db = setup().await;
    let users = db.collection::<User>().unwrap();

    let records = users
        .find_many(Query::new().order_by(OrderBy::asc("age")))
        .await
        .unwrap();

    let ages: Vec<_> = records
        .iter()
        .map(|record| record.get("age").cloned().unwrap())
        .collect();
    assert_eq!(
        ages,
        vec![
            Value::I64(20),
            Value::I64(25),
            Value::I64(30),
            Value::I64(30)
        ]
    );
}

#[tokio::test]
async fn secondary_ordering_breaks_ties() {
    let db = setup().await;
    let users = db.collection::<User>().unwrap();

    let records = users
        .find_many(
            Query::new()
                .order_by(OrderBy::desc("age"))
                .order_by(OrderBy::asc("name")),
        )
        .await
        .unwrap();

    assert_eq!(
        names(&records),
        vec![
            Value::from("Ann"),
            Value::from("Cal"),
            Value::from("Dee"),
            Value::from("Bea")
        ]
    );
}

#[tokio::test]
async fn skip_and_take_slice_after_sorting() {
    let db = setup().await;
    let users = db.collection::<User>().unwrap();

    let records = users
        .find_many(
            Query::new()
                .order_by(OrderBy::asc("age"))
                .skip(1)
                .take(2),
        )
        .await
        .unwrap();

    assert_eq!(
        names(&records),
        vec![Value::from("Dee"), Value::from("Ann")]
    );
}

#[tokio::test]
async fn skip_past_the_end_is_empty() {
    let db = setup().await;
    let users = db.collection::<User>().unwrap();

    let records = users
        .find_many(Query::new().skip(10))
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn find_first_returns_the_sorted_head() {
    let db = setup().await;
    let users = db.collection::<User>().unwrap();

    let youngest = users
        .find_first(None, &[OrderBy::asc("age")])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(youngest.get("name"), Some(&Value::from("Bea")));

    let none = users
        .find_first(Some(&Filter::new().field("age", FieldOp::gt(99))), &[])
        .await
        .unwrap();
    assert!(none.is_none());
}

#[tokio::test]
async fn filters_compose_with_pagination() {
    let db = setup().await;
    let users = db.collection::<User>().unwrap();

    let thirty = Filter::new().field("age", 30);
    let records = users
        .find_many(
            Query::new()
                .filter(thirty)
                .order_by(OrderBy::desc("name"))
                .take(1),
        )
        .await
        .unwrap();

    assert_eq!(names(&records), vec![Value::from("Cal")]);
}

#[tokio::test]
async fn logical_combinators_filter_end_to_end() {
    let db = setup().await;
    let users = db.collection::<User>().unwrap();

    let filter = Filter::new()
        .or([
            Filter::new().field("name", "Ann"),
            Filter::new().field("name", "Bea"),
        ])
        .not(Filter::new().field("age", FieldOp::lt(25)));

    let records = users
        .find_many(Query::new().filter(filter))
        .await
        .unwrap();
    assert_eq!(names(&records), vec![Value::from("Ann")]);
}

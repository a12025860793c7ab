use griddle::{record, schema::ColumnOptions, Db};
use griddle_driver_memory::Memory;
use tests::{init_logging, LoggingDriver};

struct User;

fn builder_with(driver: impl griddle_core::driver::Driver) -> Db {
    let mut builder = Db::builder();
    builder.name("init").driver(driver);
    builder
        .entity::<User>(Some("users"))
        .unwrap()
        .column::<User>(
            "id",
            ColumnOptions::new().primary(true).auto_increment(true),
        )
        .unwrap()
        .column::<User>("name", ColumnOptions::new())
        .unwrap();

    builder.build().unwrap()
}

#[tokio::test]
async fn initialize_is_idempotent() {
    init_logging();

    let driver = LoggingDriver::new(Memory::new());
    let log = driver.log();
    let db = builder_with(driver);

    db.initialize().await.unwrap();
    db.initialize().await.unwrap();
    db.initialize().await.unwrap();

    // The store is opened exactly once.
    let opens = log
        .entries()
        .iter()
        .filter(|op| *op == "Open")
        .count();
    assert_eq!(opens, 1);
}

#[tokio::test]
async fn collections_require_initialization() {
    init_logging();

    let db = builder_with(Memory::new());

    let err = db.collection::<User>().unwrap_err();
    assert!(err.is_configuration());

    db.initialize().await.unwrap();
    assert!(db.collection::<User>().is_ok());
}

#[tokio::test]
async fn clones_share_initialization_state() {
    init_logging();

    let db = builder_with(Memory::new());
    let clone = db.clone();

    db.initialize().await.unwrap();
    assert!(clone.is_initialized());

    let users = clone.collection::<User>().unwrap();
    users.create(record! { "name" => "Ann" }).await.unwrap();

    assert_eq!(
        db.collection::<User>()
            .unwrap()
            .count(None)
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn building_without_a_driver_fails() {
    init_logging();

    let err = Db::builder().name("nodriver").build().unwrap_err();
    assert!(err.is_configuration());
}

#[tokio::test]
async fn unregistered_entity_has_no_collection() {
    init_logging();

    struct Stranger;

    let db = builder_with(Memory::new());
    db.initialize().await.unwrap();

    assert!(db.collection::<Stranger>().is_err());
}

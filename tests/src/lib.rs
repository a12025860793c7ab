//! Shared support for the integration tests: a driver wrapper that records
//! the operations issued against the store, so tests can assert on the
//! point-lookup fast path versus full scans.

use griddle_core::{
    async_trait,
    driver::{Driver, Operation, Response},
    schema::db::Schema,
    Result,
};

use std::sync::{Arc, Mutex};

/// Shared, cloneable record of the operations a [`LoggingDriver`] saw.
#[derive(Debug, Clone, Default)]
pub struct OpLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl OpLog {
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    /// Drains and returns everything recorded so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.entries.lock().unwrap())
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .any(|entry| entry == label)
    }

    fn push(&self, label: &str) {
        self.entries.lock().unwrap().push(label.to_string());
    }
}

/// Wraps a driver and records a label per operation before forwarding.
#[derive(Debug)]
pub struct LoggingDriver<D> {
    inner: D,
    log: OpLog,
}

impl<D: Driver> LoggingDriver<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            log: OpLog::default(),
        }
    }

    /// A handle to the log, valid after the driver moves into the database.
    pub fn log(&self) -> OpLog {
        self.log.clone()
    }
}

#[async_trait]
impl<D: Driver> Driver for LoggingDriver<D> {
    async fn open(&self, db_name: &str, version: u32, schema: &Schema) -> Result<()> {
        self.log.push("Open");
        self.inner.open(db_name, version, schema).await
    }

    async fn exec(&self, op: Operation) -> Result<Response> {
        self.log.push(label(&op));
        self.inner.exec(op).await
    }
}

fn label(op: &Operation) -> &'static str {
    match op {
        Operation::Count(_) => "Count",
        Operation::DeleteByKey(_) => "DeleteByKey",
        Operation::GetByKey(_) => "GetByKey",
        Operation::Insert(_) => "Insert",
        Operation::Scan(_) => "Scan",
        Operation::UpdateByKey(_) => "UpdateByKey",
    }
}

/// Test-wide logger init; safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

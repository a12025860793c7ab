mod table;
use table::Table;

mod version_store;
pub use version_store::MemoryVersionStore;

use griddle_core::{
    async_trait,
    driver::{Driver, Operation, Response},
    schema::db::Schema,
    Error, Result,
};

use std::{collections::HashMap, sync::Mutex};

/// In-memory ordered key-value table store.
///
/// The reference driver: rows live in per-table ordered maps, auto-increment
/// keys come from a per-table counter, key uniqueness is enforced on insert
/// and bulk inserts are atomic. Everything is lost when the driver is
/// dropped.
#[derive(Debug, Default)]
pub struct Memory {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    opened_version: Option<u32>,
    tables: HashMap<String, Table>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The schema version the store was last opened at, if any.
    pub fn opened_version(&self) -> Option<u32> {
        self.state().opened_version
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("memory store lock poisoned")
    }
}

#[async_trait]
impl Driver for Memory {
    async fn open(&self, db_name: &str, version: u32, schema: &Schema) -> Result<()> {
        let mut state = self.state();

        // Additive reconciliation: declare tables the schema introduces,
        // drop tables it no longer names, keep the rows of the rest.
        for table in &schema.tables {
            state
                .tables
                .entry(table.name.clone())
                .or_insert_with(|| Table::new(table.primary.clone()));
        }
        state
            .tables
            .retain(|name, _| schema.table(name).is_some());

        state.opened_version = Some(version);

        log::debug!(
            "memory store `{db_name}` opened at version {version} with {} tables",
            schema.tables.len()
        );

        Ok(())
    }

    async fn exec(&self, op: Operation) -> Result<Response> {
        log::trace!("memory store op: {op:?}");

        let mut state = self.state();

        match op {
            Operation::GetByKey(op) => {
                let table = state.table(&op.table)?;
                Ok(match table.get(&op.key) {
                    Some(record) => Response::record_stream(record),
                    None => Response::empty_record_stream(),
                })
            }
            Operation::Insert(op) => {
                let keys = state.table_mut(&op.table)?.insert(op.records)?;
                Ok(Response::keys(keys))
            }
            Operation::UpdateByKey(op) => {
                let affected = state.table_mut(&op.table)?.update(&op.key, &op.patch);
                Ok(Response::count(affected))
            }
            Operation::DeleteByKey(op) => {
                let removed = state.table_mut(&op.table)?.delete(&op.keys);
                Ok(Response::count(removed))
            }
            Operation::Scan(op) => {
                let rows = state.table(&op.table)?.scan();
                Ok(Response::record_stream(rows))
            }
            Operation::Count(op) => {
                let count = state.table(&op.table)?.count();
                Ok(Response::count(count))
            }
        }
    }
}

impl State {
    fn table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::store(format!("unknown table `{name}`")))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| Error::store(format!("unknown table `{name}`")))
    }
}

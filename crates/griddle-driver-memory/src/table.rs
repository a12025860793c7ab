use griddle_core::{
    schema::db::PrimaryKey,
    stmt::{Key, Record, Value},
    Error, Result,
};

use std::collections::BTreeMap;

/// One table's rows, kept in key order.
#[derive(Debug)]
pub(crate) struct Table {
    primary: Option<PrimaryKey>,
    rows: BTreeMap<Key, Record>,
    next_auto: i64,
}

impl Table {
    pub(crate) fn new(primary: Option<PrimaryKey>) -> Self {
        Self {
            primary,
            rows: BTreeMap::new(),
            next_auto: 1,
        }
    }

    pub(crate) fn get(&self, key: &Key) -> Option<Record> {
        self.rows.get(key).cloned()
    }

    /// Inserts a batch atomically: the whole batch (including intra-batch
    /// duplicates) is validated and keyed before any row is stored, so a
    /// constraint violation anywhere leaves the table untouched.
    pub(crate) fn insert(&mut self, records: Vec<Record>) -> Result<Vec<Key>> {
        let primary = self.primary.clone().ok_or_else(|| {
            Error::store("table has no primary key; records cannot be stored")
        })?;

        let mut staged: Vec<(Key, Record)> = Vec::with_capacity(records.len());
        let mut next_auto = self.next_auto;

        for mut record in records {
            let existing = record.get(&primary.column).cloned();

            let key = match existing {
                None | Some(Value::Null) if primary.auto_increment => {
                    let key = Key::I64(next_auto);
                    next_auto += 1;
                    record.insert(primary.column.clone(), key.to_value());
                    key
                }
                None | Some(Value::Null) => {
                    return Err(Error::store(format!(
                        "record is missing its key field `{}`",
                        primary.column
                    )));
                }
                Some(value) => {
                    let key = Key::from_value(&value).ok_or_else(|| {
                        Error::store(format!(
                            "field `{}` does not hold a keyable value",
                            primary.column
                        ))
                    })?;

                    // Keep the auto counter ahead of explicit numeric keys.
                    if let Key::I64(explicit) = key {
                        next_auto = next_auto.max(explicit + 1);
                    }

                    key
                }
            };

            if self.rows.contains_key(&key) || staged.iter().any(|(staged, _)| *staged == key) {
                return Err(Error::store(format!(
                    "duplicate key {key:?} in table insert"
                )));
            }

            staged.push((key, record));
        }

        self.next_auto = next_auto;

        let keys = staged.iter().map(|(key, _)| key.clone()).collect();
        self.rows.extend(staged);

        Ok(keys)
    }

    /// Overlays the patch onto the record stored at `key`. Returns the
    /// affected-row count: 1 when the key exists (even for a value-level
    /// no-op patch), 0 otherwise.
    pub(crate) fn update(&mut self, key: &Key, patch: &Record) -> u64 {
        match self.rows.get_mut(key) {
            Some(record) => {
                record.apply(patch);
                1
            }
            None => 0,
        }
    }

    pub(crate) fn delete(&mut self, keys: &[Key]) -> u64 {
        keys.iter()
            .filter(|key| self.rows.remove(*key).is_some())
            .count() as u64
    }

    pub(crate) fn count(&self) -> u64 {
        self.rows.len() as u64
    }

    /// The table's rows in key order.
    pub(crate) fn scan(&self) -> Vec<Record> {
        self.rows.values().cloned().collect()
    }
}

use crate::{db::Shared, engine};

use griddle_core::{
    driver::{operation, Driver, Response},
    schema::ResolvedEntity,
    stmt::{Filter, Key, OrderBy, Record, RecordStream},
    Error, Result,
};

use std::sync::Arc;

/// Declarative query arguments for [`Collection::find_many`]: an optional
/// where-condition, orderings applied in sequence, and pagination applied
/// after sorting.
#[derive(Debug, Default, Clone)]
pub struct Query {
    pub filter: Option<Filter>,
    pub order_by: Vec<OrderBy>,
    pub skip: Option<usize>,
    pub take: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn order_by(mut self, step: OrderBy) -> Self {
        self.order_by.push(step);
        self
    }

    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn take(mut self, take: usize) -> Self {
        self.take = Some(take);
        self
    }
}

/// Per-entity query handle: the full CRUD/batch contract against one table.
///
/// Every call is an independent asynchronous operation. The engine issues no
/// multi-step transactions, so the scan-then-update fallback paths can race
/// with concurrent writers of the same logical row; single-key operations
/// are as atomic as the driver makes them.
pub struct Collection {
    shared: Arc<Shared>,
    entity: ResolvedEntity,
}

impl Collection {
    pub(crate) fn new(shared: Arc<Shared>, entity: ResolvedEntity) -> Self {
        Self { shared, entity }
    }

    /// The resolved table name this collection operates on.
    pub fn table(&self) -> &str {
        &self.entity.table_name
    }

    /// Looks up a single record. A filter shaped like an exact primary-key
    /// probe becomes a direct key lookup; anything else scans and returns
    /// the first match. A miss is `Ok(None)`, not an error.
    pub async fn find_unique(&self, filter: &Filter) -> Result<Option<Record>> {
        match engine::key_from_filter(&self.entity, filter) {
            Some(key) => self.get_by_key(&key).await,
            None => self.first_match(filter).await,
        }
    }

    /// The first matching record, after applying any orderings.
    pub async fn find_first(
        &self,
        filter: Option<&Filter>,
        order_by: &[OrderBy],
    ) -> Result<Option<Record>> {
        let records = self
            .find_many(Query {
                filter: filter.cloned(),
                order_by: order_by.to_vec(),
                skip: None,
                take: Some(1),
            })
            .await?;

        Ok(records.into_iter().next())
    }

    /// Filtered, sorted, paginated scan.
    pub async fn find_many(&self, query: Query) -> Result<Vec<Record>> {
        let rows = self.scan(query.filter.as_ref()).await?;
        let mut records = rows.collect().await?;

        if !query.order_by.is_empty() {
            let cmp = engine::comparator(&query.order_by);
            records.sort_by(|a, b| cmp(a, b));
        }

        let skip = query.skip.unwrap_or(0);
        if skip > 0 {
            records.drain(..skip.min(records.len()));
        }

        if let Some(take) = query.take {
            records.truncate(take);
        }

        Ok(records)
    }

    /// Inserts one record and returns it as stored.
    ///
    /// When the store offers no read-after-write visibility the read-back
    /// comes up empty; the input merged with the assigned key is returned
    /// instead as a best-effort substitute.
    pub async fn create(&self, record: Record) -> Result<Record> {
        let response = self
            .exec(operation::Insert {
                table: self.table().to_string(),
                records: vec![record.clone()],
            })
            .await?;

        let key = response
            .rows
            .into_keys()
            .into_iter()
            .next()
            .ok_or_else(|| Error::store("insert reported no assigned key"))?;

        match self.get_by_key(&key).await? {
            Some(stored) => Ok(stored),
            None => {
                log::warn!(
                    "table `{}`: created record not visible on read-back; returning input",
                    self.table()
                );
                let mut fallback = record;
                engine::merge_key_into(&self.entity, &mut fallback, &key);
                Ok(fallback)
            }
        }
    }

    /// Bulk insert. Tries a single atomic batch first; if the batch fails as
    /// a whole (e.g. a key constraint violation anywhere in it), retries
    /// record-by-record, silently skipping individual failures. Returns the
    /// count that succeeded.
    pub async fn create_many(&self, records: Vec<Record>) -> Result<u64> {
        if records.is_empty() {
            return Ok(0);
        }

        let bulk = self
            .exec(operation::Insert {
                table: self.table().to_string(),
                records: records.clone(),
            })
            .await;

        match bulk {
            Ok(response) => Ok(response.rows.into_keys().len() as u64),
            Err(err) => {
                log::warn!(
                    "table `{}`: bulk insert failed ({err}); retrying record-by-record",
                    self.table()
                );

                let mut count = 0;
                for record in records {
                    let inserted = self
                        .exec(operation::Insert {
                            table: self.table().to_string(),
                            records: vec![record],
                        })
                        .await;

                    if inserted.is_ok() {
                        count += 1;
                    }
                }

                Ok(count)
            }
        }
    }

    /// Patches the single record the filter resolves to. Fails with a
    /// record-not-found error when nothing resolves. Returns the post-update
    /// record, or the pre-image merged with the patch when read-back yields
    /// nothing.
    pub async fn update(&self, filter: &Filter, patch: Record) -> Result<Record> {
        let (key, pre_image) = match engine::key_from_filter(&self.entity, filter) {
            Some(key) => (key, None),
            None => {
                let found = self.first_match(filter).await?.ok_or_else(|| {
                    Error::record_not_found(format!(
                        "no record in `{}` matches the update condition",
                        self.table()
                    ))
                })?;
                let key = engine::key_from_record(&self.entity, &found)?;
                (key, Some(found))
            }
        };

        let response = self
            .exec(operation::UpdateByKey {
                table: self.table().to_string(),
                key: key.clone(),
                patch: patch.clone(),
            })
            .await?;

        if response.rows.into_count() == 0 {
            return Err(Error::record_not_found(format!(
                "no record in `{}` stored under the resolved key",
                self.table()
            )));
        }

        match self.get_by_key(&key).await? {
            Some(stored) => Ok(stored),
            None => {
                let mut merged = pre_image.unwrap_or_else(|| {
                    let mut record = Record::new();
                    engine::merge_key_into(&self.entity, &mut record, &key);
                    record
                });
                merged.apply(&patch);
                Ok(merged)
            }
        }
    }

    /// Patches every matching record. A single patch applies to all matches;
    /// a patch list applies positionally, clamped to its last entry once
    /// exhausted. Returns the count of records whose update reported at
    /// least one affected row; per-record failures are absorbed into the
    /// count.
    pub async fn update_many(&self, filter: Option<&Filter>, patches: &[Record]) -> Result<u64> {
        if patches.is_empty() {
            return Ok(0);
        }

        let matches = self
            .find_many(Query {
                filter: filter.cloned(),
                ..Query::default()
            })
            .await?;

        let mut count = 0;

        for (index, record) in matches.iter().enumerate() {
            let Ok(key) = engine::key_from_record(&self.entity, record) else {
                continue;
            };

            let patch = &patches[index.min(patches.len() - 1)];

            let updated = self
                .exec(operation::UpdateByKey {
                    table: self.table().to_string(),
                    key,
                    patch: patch.clone(),
                })
                .await;

            if let Ok(response) = updated {
                if response.rows.into_count() > 0 {
                    count += 1;
                }
            }
        }

        Ok(count)
    }

    /// Updates the record the filter finds, or creates one from the create
    /// payload when nothing matches.
    pub async fn upsert(&self, filter: &Filter, create: Record, update: Record) -> Result<Record> {
        match self.find_unique(filter).await? {
            Some(_) => self.update(filter, update).await,
            None => self.create(create).await,
        }
    }

    /// Removes the single record the filter resolves to and returns it as it
    /// existed before removal. Fails with a record-not-found error when
    /// nothing matches.
    pub async fn delete(&self, filter: &Filter) -> Result<Record> {
        let found = self.find_unique(filter).await?.ok_or_else(|| {
            Error::record_not_found(format!(
                "no record in `{}` matches the delete condition",
                self.table()
            ))
        })?;

        let key = match engine::key_from_filter(&self.entity, filter) {
            Some(key) => key,
            None => engine::key_from_record(&self.entity, &found)?,
        };

        self.exec(operation::DeleteByKey {
            table: self.table().to_string(),
            keys: vec![key],
        })
        .await?;

        Ok(found)
    }

    /// Removes every matching record and returns the count removed. Records
    /// whose key cannot be resolved are silently excluded from both the
    /// removal and the count.
    pub async fn delete_many(&self, filter: Option<&Filter>) -> Result<u64> {
        let matches = self
            .find_many(Query {
                filter: filter.cloned(),
                ..Query::default()
            })
            .await?;

        let keys: Vec<Key> = matches
            .iter()
            .filter_map(|record| engine::key_from_record(&self.entity, record).ok())
            .collect();

        if keys.is_empty() {
            return Ok(0);
        }

        let count = keys.len() as u64;

        self.exec(operation::DeleteByKey {
            table: self.table().to_string(),
            keys,
        })
        .await?;

        Ok(count)
    }

    /// Record count: the store's own count when unfiltered, a filtered scan
    /// count otherwise.
    pub async fn count(&self, filter: Option<&Filter>) -> Result<u64> {
        match filter {
            None => {
                let response = self
                    .exec(operation::Count {
                        table: self.table().to_string(),
                    })
                    .await?;
                Ok(response.rows.into_count())
            }
            Some(filter) => {
                let records = self.scan(Some(filter)).await?.collect().await?;
                Ok(records.len() as u64)
            }
        }
    }

    async fn first_match(&self, filter: &Filter) -> Result<Option<Record>> {
        let mut rows = self.scan(Some(filter)).await?;
        rows.next().await.transpose()
    }

    async fn get_by_key(&self, key: &Key) -> Result<Option<Record>> {
        let response = self
            .exec(operation::GetByKey {
                table: self.table().to_string(),
                key: key.clone(),
            })
            .await?;

        let mut rows = response.rows.into_values();
        rows.next().await.transpose()
    }

    async fn scan(&self, filter: Option<&Filter>) -> Result<RecordStream> {
        engine::scan(self.driver(), self.table(), filter).await
    }

    async fn exec(&self, op: impl Into<operation::Operation>) -> Result<Response> {
        self.driver().exec(op.into()).await
    }

    fn driver(&self) -> &dyn Driver {
        &*self.shared.driver
    }
}

impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("table", &self.entity.table_name)
            .finish()
    }
}

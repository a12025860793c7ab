mod eval;
pub(crate) use eval::matches;

mod key;
pub(crate) use key::{key_from_filter, key_from_record, merge_key_into};

mod sort;
pub(crate) use sort::comparator;

use griddle_core::{
    driver::{operation, Driver},
    stmt::{Filter, RecordStream},
    Result,
};

/// Streams a table's records, applying the compiled predicate as a lazy
/// filter step on top of the store's cursor.
pub(crate) async fn scan(
    driver: &dyn Driver,
    table: &str,
    filter: Option<&Filter>,
) -> Result<RecordStream> {
    let response = driver
        .exec(
            operation::Scan {
                table: table.to_string(),
            }
            .into(),
        )
        .await?;

    let mut rows = response.rows.into_values();

    let Some(filter) = filter.filter(|filter| !filter.is_empty()).cloned() else {
        return Ok(rows);
    };

    Ok(RecordStream::from_stream(async_stream::stream! {
        while let Some(res) = rows.next().await {
            match res {
                Ok(record) if matches(&filter, &record) => yield Ok(record),
                Ok(_) => {}
                Err(err) => yield Err(err),
            }
        }
    }))
}

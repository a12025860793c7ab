mod count;
pub use count::Count;

mod delete_by_key;
pub use delete_by_key::DeleteByKey;

mod get_by_key;
pub use get_by_key::GetByKey;

mod insert;
pub use insert::Insert;

mod scan;
pub use scan::Scan;

mod update_by_key;
pub use update_by_key::UpdateByKey;

#[derive(Debug)]
pub enum Operation {
    /// Count a table's records.
    Count(Count),

    /// Delete records identified by the given keys.
    DeleteByKey(DeleteByKey),

    /// Get a record by its primary key.
    GetByKey(GetByKey),

    /// Insert one or more records, atomically.
    Insert(Insert),

    /// Stream a table's records in key order.
    Scan(Scan),

    /// Patch the record at the given primary key.
    UpdateByKey(UpdateByKey),
}

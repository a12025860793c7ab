use super::Operation;
use crate::stmt;

/// Insert one or more records. All-or-nothing: a key constraint violation
/// anywhere in the batch fails the whole operation without mutating the
/// table.
#[derive(Debug)]
pub struct Insert {
    /// Which table to insert into
    pub table: String,

    /// The records to insert, in order
    pub records: Vec<stmt::Record>,
}

impl From<Insert> for Operation {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}

use super::Operation;
use crate::stmt;

#[derive(Debug)]
pub struct UpdateByKey {
    /// Which table to update
    pub table: String,

    /// The key of the record to patch
    pub key: stmt::Key,

    /// Fields to overlay onto the stored record
    pub patch: stmt::Record,
}

impl From<UpdateByKey> for Operation {
    fn from(value: UpdateByKey) -> Self {
        Self::UpdateByKey(value)
    }
}

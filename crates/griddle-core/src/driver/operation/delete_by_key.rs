use super::Operation;
use crate::stmt;

#[derive(Debug)]
pub struct DeleteByKey {
    /// Which table to delete from
    pub table: String,

    /// The keys to remove. Keys with no stored record are ignored.
    pub keys: Vec<stmt::Key>,
}

impl From<DeleteByKey> for Operation {
    fn from(value: DeleteByKey) -> Self {
        Self::DeleteByKey(value)
    }
}

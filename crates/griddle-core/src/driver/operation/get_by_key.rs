use super::Operation;
use crate::stmt;

#[derive(Debug)]
pub struct GetByKey {
    /// Which table to get from
    pub table: String,

    /// The key to fetch
    pub key: stmt::Key,
}

impl From<GetByKey> for Operation {
    fn from(value: GetByKey) -> Self {
        Self::GetByKey(value)
    }
}

use crate::stmt::{Key, RecordStream};

#[derive(Debug)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Keys assigned by an insert, in input order
    Keys(Vec<Key>),

    /// Operation result, as a stream of rows
    Values(RecordStream),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn keys(keys: Vec<Key>) -> Self {
        Self {
            rows: Rows::Keys(keys),
        }
    }

    pub fn record_stream(records: impl Into<RecordStream>) -> Self {
        Self {
            rows: Rows::Values(records.into()),
        }
    }

    pub fn empty_record_stream() -> Self {
        Self {
            rows: Rows::Values(RecordStream::default()),
        }
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }

    #[track_caller]
    pub fn into_count(self) -> u64 {
        match self {
            Self::Count(count) => count,
            _ => panic!("driver response was not a count"),
        }
    }

    #[track_caller]
    pub fn into_keys(self) -> Vec<Key> {
        match self {
            Self::Keys(keys) => keys,
            _ => panic!("driver response was not a key list"),
        }
    }

    #[track_caller]
    pub fn into_values(self) -> RecordStream {
        match self {
            Self::Values(values) => values,
            _ => panic!("driver response was not a record stream"),
        }
    }
}

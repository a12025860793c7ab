use super::Operation;

#[derive(Debug)]
pub struct Count {
    /// Which table to count
    pub table: String,
}

impl From<Count> for Operation {
    fn from(value: Count) -> Self {
        Self::Count(value)
    }
}

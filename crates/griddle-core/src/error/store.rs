/// Error reported by the underlying table store, e.g. a key constraint
/// violation during insert.
#[derive(Debug)]
pub(super) struct StoreError {
    detail: Box<str>,
}

impl StoreError {
    pub(super) fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into().into_boxed_str(),
        }
    }
}

impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "store error: {}", self.detail)
    }
}

/// Error when an update/delete target resolves to no record.
#[derive(Debug)]
pub(super) struct RecordNotFoundError {
    context: Box<str>,
}

impl RecordNotFoundError {
    pub(super) fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into().into_boxed_str(),
        }
    }
}

impl core::fmt::Display for RecordNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "record not found: {}", self.context)
    }
}

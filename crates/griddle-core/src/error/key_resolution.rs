/// Error when a record cannot yield its primary key value.
#[derive(Debug)]
pub(super) struct KeyResolutionError {
    context: Box<str>,
}

impl KeyResolutionError {
    pub(super) fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into().into_boxed_str(),
        }
    }
}

impl core::fmt::Display for KeyResolutionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cannot resolve primary key: {}", self.context)
    }
}

/// Error for systemic registration or schema mistakes.
///
/// These are programming errors in the startup routine: empty or duplicate
/// table names, conflicting primary columns, mutation after seal. They abort
/// database initialization.
#[derive(Debug)]
pub(super) struct ConfigurationError {
    detail: Box<str>,
}

impl ConfigurationError {
    pub(super) fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into().into_boxed_str(),
        }
    }
}

impl core::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid configuration: {}", self.detail)
    }
}

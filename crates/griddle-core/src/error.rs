mod adhoc;
mod configuration;
mod key_resolution;
mod record_not_found;
mod store;

use adhoc::AdhocError;
use configuration::ConfigurationError;
use key_resolution::KeyResolutionError;
use record_not_found::RecordNotFoundError;
use std::sync::Arc;
use store::StoreError;

/// An error that can occur in Griddle.
///
/// Errors carry a kind plus an optional cause chain. The kind determines how
/// callers react: configuration errors abort initialization, record-not-found
/// errors are an expected outcome of update/delete flows, key-resolution and
/// store errors are scoped to the single operation that raised them.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    Configuration(ConfigurationError),
    RecordNotFound(RecordNotFoundError),
    KeyResolution(KeyResolutionError),
    Store(StoreError),
}

impl Error {
    /// A systemic configuration mistake: bad registration, schema conflict,
    /// or mutation after seal. Aborts initialization rather than degrading.
    pub fn configuration(msg: impl Into<String>) -> Self {
        ErrorKind::Configuration(ConfigurationError::new(msg)).into()
    }

    /// The target of an update/delete did not resolve to any record.
    pub fn record_not_found(msg: impl Into<String>) -> Self {
        ErrorKind::RecordNotFound(RecordNotFoundError::new(msg)).into()
    }

    /// A record could not yield its primary key value when one was required.
    pub fn key_resolution(msg: impl Into<String>) -> Self {
        ErrorKind::KeyResolution(KeyResolutionError::new(msg)).into()
    }

    /// An error reported by the underlying table store.
    pub fn store(msg: impl Into<String>) -> Self {
        ErrorKind::Store(StoreError::new(msg)).into()
    }

    pub fn is_configuration(&self) -> bool {
        self.chain()
            .any(|err| matches!(err.kind(), ErrorKind::Configuration(_)))
    }

    pub fn is_record_not_found(&self) -> bool {
        self.chain()
            .any(|err| matches!(err.kind(), ErrorKind::RecordNotFound(_)))
    }

    pub fn is_key_resolution(&self) -> bool {
        self.chain()
            .any(|err| matches!(err.kind(), ErrorKind::KeyResolution(_)))
    }

    pub fn is_store(&self) -> bool {
        self.chain().any(|err| matches!(err.kind(), ErrorKind::Store(_)))
    }

    /// Adds context to this error.
    ///
    /// Context is displayed first, followed by the earlier chain, ending with
    /// the root cause.
    pub fn context(self, msg: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ErrorInner {
                kind: ErrorKind::Adhoc(AdhocError::new(msg)),
                cause: Some(self),
            }),
        }
    }

    fn chain(&self) -> impl Iterator<Item = &Self> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.cause.as_ref()?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            Configuration(err) => core::fmt::Display::fmt(err, f),
            RecordNotFound(err) => core::fmt::Display::fmt(err, f),
            KeyResolution(err) => core::fmt::Display::fmt(err, f),
            Store(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self {
            inner: Arc::new(ErrorInner { kind, cause: None }),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::from(ErrorKind::Anyhow(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::from(anyhow::Error::from(err))
    }
}

mod builder;
pub use builder::Builder;

use crate::{collection::Collection, version};

use griddle_core::{
    driver::{Driver, VersionStore},
    schema::{self, db::Schema, EntityId, Registry},
    Error, Result,
};

use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

/// Shared state between all `Db` clones and the collections handed out.
pub(crate) struct Shared {
    pub(crate) name: String,
    pub(crate) registry: Mutex<Registry>,
    pub(crate) driver: Arc<dyn Driver>,
    pub(crate) version_store: Option<Arc<dyn VersionStore>>,
    pub(crate) init: OnceCell<Initialized>,
}

/// State produced by the one-time initialize flow.
pub(crate) struct Initialized {
    schema: Schema,
    version: u32,
}

/// A database handle. Cloning is cheap; all clones share the registry, the
/// driver and the initialization state.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Opens the database: derives the storage schema from the registry,
    /// decides the schema version, declares both to the driver, then seals
    /// the registry.
    ///
    /// Idempotent after the first success, and never runs concurrently with
    /// itself; late callers wait on the in-flight attempt and share its
    /// outcome. A failed attempt leaves the database uninitialized so a
    /// later call can retry.
    pub async fn initialize(&self) -> Result<()> {
        self.shared
            .init
            .get_or_try_init(|| self.run_initialize())
            .await?;

        Ok(())
    }

    async fn run_initialize(&self) -> Result<Initialized> {
        let schema = {
            let registry = self.registry();
            schema::Builder::new().build(&registry)?
        };

        let version = version::resolve(
            self.shared.version_store.as_deref(),
            &self.shared.name,
            &schema,
        );

        log::debug!(
            "opening database `{}` at schema version {version} ({} tables)",
            self.shared.name,
            schema.tables.len()
        );

        self.shared
            .driver
            .open(&self.shared.name, version, &schema)
            .await?;

        self.registry().seal();

        Ok(Initialized { schema, version })
    }

    /// The per-entity query handle. The database must be initialized first.
    pub fn collection<T: 'static>(&self) -> Result<Collection> {
        self.initialized()?;

        let entity = self.registry().resolve(EntityId::of::<T>())?;
        Ok(Collection::new(self.shared.clone(), entity))
    }

    /// The derived storage schema, available once initialized.
    pub fn schema(&self) -> Result<&Schema> {
        Ok(&self.initialized()?.schema)
    }

    /// The schema version the store was opened at, available once
    /// initialized.
    pub fn version(&self) -> Result<u32> {
        Ok(self.initialized()?.version)
    }

    pub fn is_initialized(&self) -> bool {
        self.shared.init.initialized()
    }

    fn initialized(&self) -> Result<&Initialized> {
        self.shared.init.get().ok_or_else(|| {
            Error::configuration(format!(
                "database `{}` is not initialized",
                self.shared.name
            ))
        })
    }

    fn registry(&self) -> std::sync::MutexGuard<'_, Registry> {
        self.shared.registry.lock().expect("registry lock poisoned")
    }
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("name", &self.shared.name)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

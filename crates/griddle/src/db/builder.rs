use super::{Db, Shared};

use griddle_core::{
    driver::{Driver, VersionStore},
    schema::{ColumnOptions, EntityId, Registry},
    Error, Result,
};

use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

/// Builds a [`Db`]: carries the registry while startup code registers
/// entities and columns, plus the driver and optional version store.
#[derive(Default)]
pub struct Builder {
    name: Option<String>,
    registry: Registry,
    driver: Option<Arc<dyn Driver>>,
    version_store: Option<Arc<dyn VersionStore>>,
}

impl Builder {
    /// The database name, used for the version record key and driver open
    /// call. Defaults to `"griddle"`.
    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn driver(&mut self, driver: impl Driver) -> &mut Self {
        self.driver = Some(Arc::new(driver));
        self
    }

    pub fn version_store(&mut self, store: impl VersionStore) -> &mut Self {
        self.version_store = Some(Arc::new(store));
        self
    }

    /// Registers an entity under an explicit table name, or under the type's
    /// own name when `table_name` is `None`.
    pub fn entity<T: 'static>(&mut self, table_name: Option<&str>) -> Result<&mut Self> {
        self.registry
            .register_entity(EntityId::of::<T>(), table_name, None)?;
        Ok(self)
    }

    /// Registers an entity whose columns extend a parent entity's.
    pub fn entity_extends<T: 'static, P: 'static>(
        &mut self,
        table_name: Option<&str>,
    ) -> Result<&mut Self> {
        self.registry.register_entity(
            EntityId::of::<T>(),
            table_name,
            Some(EntityId::of::<P>()),
        )?;
        Ok(self)
    }

    /// Registers a column. May run before the owning entity's registration;
    /// the descriptor is created lazily under the type's default name.
    pub fn column<T: 'static>(&mut self, name: &str, options: ColumnOptions) -> Result<&mut Self> {
        self.registry
            .register_column(EntityId::of::<T>(), name, options)?;
        Ok(self)
    }

    /// Direct access to the registry, for registration flows driven by code
    /// outside the builder.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Builds the database handle. The handle is inert until
    /// [`Db::initialize`] runs.
    pub fn build(&mut self) -> Result<Db> {
        let driver = self
            .driver
            .take()
            .ok_or_else(|| Error::configuration("no driver configured"))?;

        Ok(Db {
            shared: Arc::new(Shared {
                name: self.name.take().unwrap_or_else(|| "griddle".to_string()),
                registry: Mutex::new(std::mem::take(&mut self.registry)),
                driver,
                version_store: self.version_store.take(),
                init: OnceCell::new(),
            }),
        })
    }
}

pub mod operation;
pub use operation::Operation;

mod response;
pub use response::{Response, Rows};

mod version_store;
pub use version_store::VersionStore;

use crate::{async_trait, schema::db, Result};

use std::fmt::Debug;

/// The asynchronous table store the query engine executes against.
///
/// Drivers provide single-key atomicity; the engine issues no multi-step
/// transactions on top of it.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Declares the expected schema shape and version with the store.
    /// Called exactly once, while the owning database initializes.
    async fn open(&self, db_name: &str, version: u32, schema: &db::Schema) -> Result<()>;

    /// Execute a store operation.
    async fn exec(&self, op: Operation) -> Result<Response>;
}

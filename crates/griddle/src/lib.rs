mod collection;
pub use collection::{Collection, Query};

pub mod db;
pub use db::Db;

pub mod driver;

mod engine;

mod version;
pub use version::VersionRecord;

pub use griddle_core::{record, schema, stmt, Error, Result};

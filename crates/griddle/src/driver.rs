pub use griddle_core::{
    driver::{
        operation::{self, Operation},
        Driver, Response, Rows, VersionStore,
    },
    schema::db::Schema,
};

#[cfg(feature = "memory")]
pub use griddle_driver_memory::{Memory, MemoryVersionStore};

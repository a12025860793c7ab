#[macro_use]
mod macros;

pub mod driver;
pub use driver::Driver;

mod error;
pub use error::Error;

pub mod schema;
pub use schema::Registry;

pub mod stmt;

/// A Result type alias that uses Griddle's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;

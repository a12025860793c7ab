mod filter;
pub use filter::{FieldFilter, FieldOp, Filter};

mod key;
pub use key::Key;

mod order_by;
pub use order_by::{Direction, OrderBy};

mod record;
pub use record::Record;

mod record_stream;
pub use record_stream::RecordStream;

mod value;
pub use value::Value;

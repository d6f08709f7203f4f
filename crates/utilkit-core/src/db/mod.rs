//! Database helper over sqlx's sqlite, postgres and mysql drivers.
//!
//! Every helper opens its own connection, runs one statement and closes the
//! connection again, also on failure. There is no pool. The API is blocking:
//! a current-thread tokio runtime owned by [`Database`] drives the driver,
//! so these helpers must not be called from inside another async runtime.

mod decode;
mod error;
mod session;
mod types;

pub use error::DbError;
pub use session::{Connection, Database};
pub use types::{Backend, ConnectionConfig, Row, Value};

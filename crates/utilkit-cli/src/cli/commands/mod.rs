//! CLI command handlers, one file per command.

mod exec;
mod headers;
mod params;
mod query;

pub use exec::{run_exec, ExecMode};
pub use headers::run_headers;
pub use params::run_params;
pub use query::run_query;

//! Request-string formatters.
//!
//! Turn text copied out of a browser's network panel into structured data:
//! a header block into a header map, and a request URL into its base path
//! plus decoded query parameters.

mod error;
mod headers;
mod query;

pub use error::FormatError;
pub use headers::format_headers;
pub use query::format_parameters;

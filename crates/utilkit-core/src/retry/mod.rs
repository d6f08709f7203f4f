//! Retry executor.
//!
//! Wraps a fallible operation and re-runs it while its failures match a
//! retry condition, up to a retry limit, with a fixed delay between
//! attempts. An optional recovery callback sees every matching failure;
//! when it reports [`Recovery::Recovered`] that failure does not count
//! against the limit.

mod failure;
mod policy;
mod run;

pub use failure::{Failure, Recovery};
pub use policy::{AttemptCounter, RetryDecision, RetryPolicy};
pub use run::Retrier;

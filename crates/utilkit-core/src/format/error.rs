//! Malformed-input error shared by the formatters.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// An expected delimiter was not found in `input`.
    #[error("missing {delimiter:?} in {input:?}")]
    MissingDelimiter { delimiter: char, input: String },
}

impl FormatError {
    pub(crate) fn missing(delimiter: char, input: &str) -> Self {
        FormatError::MissingDelimiter {
            delimiter,
            input: input.to_string(),
        }
    }
}

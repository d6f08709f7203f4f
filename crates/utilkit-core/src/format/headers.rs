//! Parse a pasted `Key: Value` header block into a map.

use std::collections::HashMap;

use super::FormatError;

/// Parse one header per line, split on the first colon.
///
/// Names and values are trimmed, blank lines are skipped, and a later
/// duplicate replaces an earlier one. A non-blank line without a colon is an
/// error.
pub fn format_headers(block: &str) -> Result<HashMap<String, String>, FormatError> {
    let mut headers = HashMap::new();
    for line in block.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| FormatError::missing(':', line))?;
        headers.insert(name.trim().to_string(), value.trim().to_string());
    }
    Ok(headers)
}

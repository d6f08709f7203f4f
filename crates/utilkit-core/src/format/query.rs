//! Split a request URL into its base and decoded query parameters.

use std::collections::HashMap;

use url::form_urlencoded;

use super::FormatError;

/// Split `request_url` at the first `?` into the base (returned verbatim) and
/// a map of percent-decoded parameters.
///
/// The query is split on `&`, each pair on its first `=`. Empty pairs are
/// skipped; a pair without `=` is an error, as is a URL without `?`. A
/// trailing `#fragment` is dropped.
pub fn format_parameters(
    request_url: &str,
) -> Result<(String, HashMap<String, String>), FormatError> {
    let (base, query) = request_url
        .split_once('?')
        .ok_or_else(|| FormatError::missing('?', request_url))?;
    let query = query.split_once('#').map_or(query, |(q, _)| q);

    let mut params = HashMap::new();
    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        if !pair.contains('=') {
            return Err(FormatError::missing('=', pair));
        }
        // A single `name=value` segment decodes to exactly one pair.
        for (name, value) in form_urlencoded::parse(pair.as_bytes()) {
            params.insert(name.into_owned(), value.into_owned());
        }
    }
    Ok((base.to_string(), params))
}

//! "Get Directions" deep links into an external maps service.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const DEFAULT_MAPS_BASE_URL: &str = "https://www.google.com/maps";

/// Characters left unescaped by a URI component encoder.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Build the map-search URL for `address` under `base_url`.
///
/// A trailing slash on `base_url` is ignored.
#[must_use]
pub fn directions_url(base_url: &str, address: &str) -> String {
    let encoded = utf8_percent_encode(address, QUERY_COMPONENT).to_string();
    format!(
        "{}/search/?api=1&query={encoded}",
        base_url.trim_end_matches('/')
    )
}

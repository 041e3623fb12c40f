//! Forwarding-prefix URL rewriting.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left untouched when encoding a URI component.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Appends `target`, encoded as a single URI component, to `prefix`.
///
/// `proxied_url("https://proxy.example/?url=", "https://a.b/c?d=1")` yields
/// `https://proxy.example/?url=https%3A%2F%2Fa.b%2Fc%3Fd%3D1`.
#[must_use]
pub fn proxied_url(prefix: &str, target: &str) -> String {
    format!("{prefix}{}", utf8_percent_encode(target, URI_COMPONENT))
}

//! Path segment encoding.
//!
//! Facade arguments are spliced into URL paths, so anything outside the RFC
//! 3986 unreserved set is percent-encoded. Application keys additionally
//! encode `.`, which some upstream routers treat as a format suffix.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except `A-Z a-z 0-9 - _ . ~`.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Same as `SEGMENT`, but `.` is escaped too.
const APP_KEY: &AsciiSet = &SEGMENT.add(b'.');

/// Percent-encode a single path segment (space becomes `%20`, `/` becomes `%2F`).
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Percent-encode an application key, escaping `.` as `%2E`.
pub fn encode_app_key(key: &str) -> String {
    utf8_percent_encode(key, APP_KEY).to_string()
}

//! Query-string construction.
//!
//! The Start.Info API packs several values into single parameters using
//! `+`, `:`, `$`, `,` and `;` as separators (e.g. `time=2024-03-15+14:30`,
//! `poles=A,B`, `lines=1;5`). Those characters are sent literally. Anything
//! that would change the structure of the query (`&`, `=`, `#`, `%`,
//! whitespace, control and non-ASCII bytes) is percent-encoded.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Escaped in query keys and values: everything but RFC 3986 unreserved
/// characters and the API's in-band separators.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'+')
    .remove(b':')
    .remove(b'$')
    .remove(b',')
    .remove(b';');

/// Escaped in a single path segment: everything but unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Ordered list of query parameters for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.pairs.push((key, value.into()));
        self
    }

    /// Append a parameter only when a value is present.
    pub fn with_opt(self, key: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// The parameters in insertion order.
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// Look up the first value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Owned copy of the parameters, for error reporting.
    pub fn to_owned_pairs(&self) -> Vec<(String, String)> {
        self.pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    /// Encode as `k1=v1&k2=v2`, without a leading `?`.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                out.push('&');
            }
            out.extend(utf8_percent_encode(key, QUERY_COMPONENT));
            out.push('=');
            out.extend(utf8_percent_encode(value, QUERY_COMPONENT));
        }
        out
    }
}

/// Percent-encode a value for use as one URL path segment.
///
/// `/`, `?`, `#` and `%` are escaped so the value cannot change the path
/// structure or start a query.
pub fn encode_path_segment(s: &str) -> String {
    utf8_percent_encode(s, PATH_SEGMENT).to_string()
}

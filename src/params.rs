//! Per-request query parameters and caller-facing request options.
//!
//! A [`RequestParameters`] value is built fresh for every dispatched request
//! and dropped when the request completes, so filters, sort keys and page
//! numbers can never leak from one call into the next.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Query parameter carrying the API key.
pub const API_KEY: &str = "api_key";
/// Query parameter carrying the page number.
pub const PAGE: &str = "page";
/// Query parameter carrying the page size.
pub const PER_PAGE: &str = "per_page";
/// Query parameter enabling prerelease versions.
pub const INCLUDE_PRERELEASE: &str = "include_prerelease";
/// Query parameter carrying free-text search.
pub const QUERY: &str = "q";
/// Query parameter carrying the sort key.
pub const SORT: &str = "sort";

/// A single query-string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Plain string value.
    Str(String),
    /// Integer value.
    Int(i64),
    /// Set of strings, rendered comma-separated.
    Set(BTreeSet<String>),
}

impl ParamValue {
    /// Render the value for the query string, percent-encoding each member.
    pub fn encode(&self) -> String {
        match self {
            Self::Str(s) => urlencoding::encode(s).into_owned(),
            Self::Int(i) => i.to_string(),
            Self::Set(set) => set
                .iter()
                .map(|s| urlencoding::encode(s).into_owned())
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Integer view of the value, if it is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<u32> for ParamValue {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<BTreeSet<String>> for ParamValue {
    fn from(set: BTreeSet<String>) -> Self {
        Self::Set(set)
    }
}

/// Query-string state for exactly one request.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RequestParameters {
    entries: BTreeMap<String, ParamValue>,
}

impl fmt::Debug for RequestParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.entries {
            if key == API_KEY {
                map.entry(key, &"<redacted>");
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}

impl RequestParameters {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a parameter.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Look up a parameter.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// Whether the parameter is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Current page parameter, if set.
    pub fn page(&self) -> Option<i64> {
        self.get(PAGE).and_then(ParamValue::as_int)
    }

    /// Current per-page parameter, if set.
    pub fn per_page(&self) -> Option<i64> {
        self.get(PER_PAGE).and_then(ParamValue::as_int)
    }

    /// Render as an encoded query string (`key=value&...`), keys in order.
    pub fn to_query_string(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), v.encode()))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Caller-facing options shared by every operation.
///
/// Out-of-range pages are accepted here and clamped when the request is
/// built; see [`crate::fix_pages`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Page to fetch (1-indexed). Only used for GET requests.
    pub page: Option<i64>,
    /// Items per page (1..=100). Only used for GET requests.
    pub per_page: Option<i64>,
    /// Ask for prerelease versions. Always on for POST requests.
    pub include_prerelease: bool,
    /// Rebuild the session transport before dispatching.
    pub force_recreate: bool,
}

impl RequestOptions {
    /// Options requesting a specific page.
    #[must_use]
    pub fn for_page(page: i64, per_page: i64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            ..Default::default()
        }
    }

    /// Set the page.
    #[must_use]
    pub fn page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size.
    #[must_use]
    pub fn per_page(mut self, per_page: i64) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Request prerelease versions.
    #[must_use]
    pub fn include_prerelease(mut self, include: bool) -> Self {
        self.include_prerelease = include;
        self
    }

    /// Rebuild the transport before this request.
    #[must_use]
    pub fn force_recreate(mut self, force: bool) -> Self {
        self.force_recreate = force;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_is_ordered_and_encoded() {
        let mut params = RequestParameters::new();
        params.set(QUERY, "web framework").set(PAGE, 2i64);
        assert_eq!(params.to_query_string(), "page=2&q=web%20framework");
    }

    #[test]
    fn test_set_members_are_encoded_individually() {
        let set: BTreeSet<String> = ["Apache-2.0", "GPL 3"].iter().map(|s| s.to_string()).collect();
        assert_eq!(ParamValue::Set(set).encode(), "Apache-2.0,GPL%203");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut params = RequestParameters::new();
        params.set(API_KEY, "secret-key");
        let debug = format!("{params:?}");
        assert!(debug.contains("api_key"));
        assert!(!debug.contains("secret-key"));
    }

    #[test]
    fn test_page_accessors() {
        let mut params = RequestParameters::new();
        assert_eq!(params.page(), None);
        params.set(PAGE, 3i64).set(PER_PAGE, 50i64);
        assert_eq!(params.page(), Some(3));
        assert_eq!(params.per_page(), Some(50));
    }

    #[test]
    fn test_options_builder() {
        let opts = RequestOptions::default().page(4).per_page(10).include_prerelease(true);
        assert_eq!(opts.page, Some(4));
        assert_eq!(opts.per_page, Some(10));
        assert!(opts.include_prerelease);
        assert!(!opts.force_recreate);
    }
}

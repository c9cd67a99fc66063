//! Query-string builder for endpoint calls.
//!
//! Parameters are recorded in insertion order. Optional values that are
//! `None` are kept in the builder but never reach the wire.

use std::fmt::Display;

/// Ordered set of query parameters with nullable values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, Option<String>)>,
}

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter with a value.
    pub fn set(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.pairs.push((key.to_string(), Some(value.to_string())));
        self
    }

    /// Add a parameter whose value may be absent.
    pub fn set_opt<V: Display>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        self.pairs
            .push((key.to_string(), value.map(|v| v.to_string())));
        self
    }

    /// Look up the first value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// True when no parameter would be sent.
    pub fn is_empty(&self) -> bool {
        self.pairs.iter().all(|(_, v)| v.is_none())
    }

    /// Build the `(key, value)` pairs to send, skipping `None` values.
    pub fn build(&self) -> Vec<(String, String)> {
        self.pairs
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.clone(), v.clone())))
            .collect()
    }
}

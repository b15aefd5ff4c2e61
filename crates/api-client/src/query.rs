// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Query-parameter encoding for request options
//!
//! The upstream services take all input as GET query parameters, with nested
//! objects flattened into dotted keys (`viewport.width`, `headers.X-Custom`).
//! [`QueryPairs`] builds that encoding explicitly: optional fields are
//! skipped when absent, boolean feature flags are emitted only when enabled,
//! and insertion order is preserved so requests are reproducible in tests.

use std::fmt::Display;

/// Ordered list of query key/value pairs
///
/// Feed the built pairs to `reqwest` via [`QueryPairs::as_slice`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPairs {
    pairs: Vec<(String, String)>,
}

impl QueryPairs {
    /// Create an empty pair list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key/value pair
    pub fn push(&mut self, key: &str, value: impl Display) {
        self.pairs.push((key.to_string(), value.to_string()));
    }

    /// Append a key/value pair when the value is present, skip it otherwise
    pub fn push_opt(&mut self, key: &str, value: Option<impl Display>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Append `key=true` when the flag is enabled, nothing otherwise
    pub fn push_flag(&mut self, key: &str, enabled: bool) {
        if enabled {
            self.push(key, "true");
        }
    }

    /// Append a nested field as a dotted key (`{prefix}.{key}`)
    pub fn push_nested(&mut self, prefix: &str, key: &str, value: impl Display) {
        self.pairs
            .push((format!("{prefix}.{key}"), value.to_string()));
    }

    /// Whether no pairs have been added
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of pairs added so far
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// The built pairs, in insertion order
    pub fn as_slice(&self) -> &[(String, String)] {
        &self.pairs
    }
}

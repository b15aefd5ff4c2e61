// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Concurrent fan-out over independent per-URL requests
//!
//! [`batch`] launches every per-URL future immediately, joins them all, and
//! maps each outcome to a [`BatchOutcome`] keyed by its input URL. One
//! request's failure never cancels or affects any other request, and the
//! returned sequence always has one entry per input URL in input order,
//! regardless of the order in which the underlying requests complete.

use futures::future::join_all;

/// Per-URL result of a batch operation
///
/// Exactly one `BatchOutcome` is produced for every input URL. Each variant
/// carries the URL it belongs to, so callers never need to correlate results
/// by position alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome<T, E> {
    /// The request for this URL succeeded
    Success {
        /// The input URL this outcome belongs to
        url: String,
        /// The parsed payload returned for this URL
        data: T,
    },
    /// The request for this URL failed
    Failure {
        /// The input URL this outcome belongs to
        url: String,
        /// The typed error the request failed with
        error: E,
    },
}

impl<T, E> BatchOutcome<T, E> {
    /// The input URL this outcome belongs to
    pub fn url(&self) -> &str {
        match self {
            BatchOutcome::Success { url, .. } | BatchOutcome::Failure { url, .. } => url,
        }
    }

    /// Whether the request for this URL succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, BatchOutcome::Success { .. })
    }

    /// Whether the request for this URL failed
    pub fn is_failure(&self) -> bool {
        matches!(self, BatchOutcome::Failure { .. })
    }

    /// The payload, when this outcome is a success
    pub fn data(&self) -> Option<&T> {
        match self {
            BatchOutcome::Success { data, .. } => Some(data),
            BatchOutcome::Failure { .. } => None,
        }
    }

    /// The error, when this outcome is a failure
    pub fn error(&self) -> Option<&E> {
        match self {
            BatchOutcome::Success { .. } => None,
            BatchOutcome::Failure { error, .. } => Some(error),
        }
    }
}

/// Issue `op` for every URL concurrently and collect per-URL outcomes
///
/// All futures are created up front and polled concurrently; there is no
/// concurrency cap. The result vector preserves input order, not completion
/// order.
pub async fn batch<T, E, F, Fut>(urls: Vec<String>, op: F) -> Vec<BatchOutcome<T, E>>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let tasks = urls.into_iter().map(|url| {
        let request = op(url.clone());
        async move {
            match request.await {
                Ok(data) => BatchOutcome::Success { url, data },
                Err(error) => BatchOutcome::Failure { url, error },
            }
        }
    });

    join_all(tasks).await
}

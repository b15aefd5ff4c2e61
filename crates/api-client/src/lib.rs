// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Generic API client traits and utilities for external integrations
//!
//! This crate provides the common abstractions shared by the typed clients in
//! this workspace, each of which wraps one third-party REST API.
//!
//! # Core Abstractions
//!
//! - **`ApiClient` Trait**: Common interface for all external API clients with async support
//! - **Health Check System**: Standardized health status reporting across all clients
//! - **Error Handling**: One `ApiError` taxonomy covering every failure a client surfaces
//! - **Batch Fan-Out**: [`batch::batch`] issues independent per-URL requests concurrently
//!   and collects per-item outcomes without one failure aborting the others
//! - **Query Encoding**: [`query::QueryPairs`] flattens request options into the dotted
//!   query-key wire format the upstream services expect
//!
//! # Key Features
//!
//! - **Async-First Design**: All operations return `impl Future` for efficient async execution
//! - **Error Classification**: Callers branch programmatically on typed error variants
//! - **Type Safety**: Strong typing prevents runtime errors from invalid configurations

use thiserror::Error;

pub mod batch;
pub mod health;
pub mod query;

pub use batch::{BatchOutcome, batch};
pub use health::HealthStatus;
pub use query::QueryPairs;

/// Generic trait for external API clients
///
/// This trait provides a common interface for all external API integrations,
/// enabling consistent error handling and health checks.
pub trait ApiClient: Send + Sync {
    /// Check the health of this API client
    ///
    /// # Errors
    ///
    /// Returns an error if the health check fails
    fn health_check(&self) -> impl Future<Output = Result<HealthStatus, ApiError>> + Send;

    /// Get the name/identifier of this API client
    fn name(&self) -> &'static str;
}

/// Common errors that can occur when working with API clients
///
/// Each variant carries enough context for the caller to branch on: the
/// offending field path for validation failures, the remote status code and
/// message for API-reported failures, or the raw parse error for malformed
/// responses. Errors are never recovered into success values.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    /// Caller input failed validation; no request was sent
    #[error("Invalid input for `{field}`: {message}")]
    Validation { field: String, message: String },

    /// HTTP request failed
    #[error("HTTP request failed: {message}")]
    Http { message: String },

    /// Network timeout
    #[error("Request timeout after {timeout_seconds} seconds")]
    Timeout { timeout_seconds: u64 },

    /// The remote service explicitly reported failure
    #[error("API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    /// Response shape violates the declared contract
    #[error("Invalid response format: {message}")]
    InvalidResponse { message: String },

    /// The remote service reported success but returned no data
    #[error("API reported success but returned no data")]
    EmptySuccess { status_code: Option<u16> },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Client independent error
    #[error(transparent)]
    Custom { error: anyhow::Error },
}

impl ApiError {
    /// The remote HTTP status code attached to this error, when one exists
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Api { status_code, .. } | ApiError::EmptySuccess { status_code } => {
                *status_code
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let error = ApiError::Validation {
            field: "url".to_string(),
            message: "relative URLs are not supported".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid input for `url`: relative URLs are not supported"
        );

        let error = ApiError::Timeout { timeout_seconds: 30 };
        assert_eq!(error.to_string(), "Request timeout after 30 seconds");

        let error = ApiError::Api {
            message: "quota exceeded".to_string(),
            status_code: Some(429),
        };
        assert_eq!(error.to_string(), "API error: quota exceeded");
    }

    #[test]
    fn api_error_status_code() {
        let error = ApiError::Api {
            message: "nope".to_string(),
            status_code: Some(400),
        };
        assert_eq!(error.status_code(), Some(400));

        let error = ApiError::EmptySuccess { status_code: None };
        assert_eq!(error.status_code(), None);

        let error = ApiError::Http {
            message: "connection refused".to_string(),
        };
        assert_eq!(error.status_code(), None);
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the Microlink API client

use api_client::ApiError;
use thiserror::Error;

use crate::types::Envelope;

/// Errors specific to the Microlink API client
///
/// Every failure is a typed value the caller can branch on; nothing is
/// swallowed or downgraded to a default result.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum MicrolinkError {
    /// Caller input failed validation; no request was sent
    #[error("Invalid input for `{field}`: {message}")]
    Validation { field: String, message: String },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Timeout error
    #[error("Request timeout")]
    Timeout { seconds: u64 },

    /// The remote service reported failure in its response envelope
    #[error("API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
        /// The raw envelope the failure was reported in, when one was parsed
        response: Option<Box<Envelope>>,
    },

    /// Response shape violates the envelope contract
    #[error("Invalid response structure: {message}")]
    InvalidResponse { message: String },

    /// The envelope reported success but carried no data
    #[error("No data returned from API")]
    EmptySuccess { status_code: Option<u16> },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<MicrolinkError> for ApiError {
    fn from(value: MicrolinkError) -> Self {
        match value {
            MicrolinkError::Validation { field, message } => {
                ApiError::Validation { field, message }
            }
            MicrolinkError::Http(error) => ApiError::Http {
                message: error.to_string(),
            },
            MicrolinkError::Timeout { seconds } => ApiError::Timeout {
                timeout_seconds: seconds,
            },
            MicrolinkError::Api {
                message,
                status_code,
                ..
            } => ApiError::Api {
                message,
                status_code,
            },
            MicrolinkError::InvalidResponse { message } => ApiError::InvalidResponse { message },
            MicrolinkError::EmptySuccess { status_code } => ApiError::EmptySuccess { status_code },
            MicrolinkError::Config(message) => ApiError::Configuration { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_conversion() {
        let error = MicrolinkError::Validation {
            field: "url".to_string(),
            message: "bad".to_string(),
        };
        assert!(matches!(ApiError::from(error), ApiError::Validation { .. }));

        let error = MicrolinkError::Api {
            message: "denied".to_string(),
            status_code: Some(403),
            response: None,
        };
        match ApiError::from(error) {
            ApiError::Api {
                message,
                status_code,
            } => {
                assert_eq!(message, "denied");
                assert_eq!(status_code, Some(403));
            }
            other => panic!("Expected Api error, got: {other:?}"),
        }

        let error = MicrolinkError::EmptySuccess { status_code: None };
        assert!(matches!(
            ApiError::from(error),
            ApiError::EmptySuccess { status_code: None }
        ));

        let error = MicrolinkError::Timeout { seconds: 30 };
        assert!(matches!(
            ApiError::from(error),
            ApiError::Timeout { timeout_seconds: 30 }
        ));
    }

    #[test]
    fn error_display() {
        let error = MicrolinkError::EmptySuccess { status_code: Some(200) };
        assert_eq!(error.to_string(), "No data returned from API");

        let error = MicrolinkError::Api {
            message: "rate limit reached".to_string(),
            status_code: Some(429),
            response: None,
        };
        assert_eq!(error.to_string(), "API error: rate limit reached");
    }
}

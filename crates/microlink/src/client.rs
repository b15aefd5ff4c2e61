// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Microlink API client
//!
//! One GET per operation against the configured base URL, with all input
//! encoded as query parameters. The convenience operations are parameter
//! presets over [`MicrolinkClient::get_metadata`] and delegate to it;
//! [`MicrolinkClient::batch_get_metadata`] fans the primary operation out
//! across many URLs concurrently.

use std::time::Duration;

use api_client::{ApiClient, ApiError, BatchOutcome, HealthStatus, batch};
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use tokio::time::timeout;
use tracing::{Span, debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    error::MicrolinkError,
    normalize,
    options::MicrolinkOptions,
    types::Metadata,
};

/// Default base URL for the Microlink API
pub const DEFAULT_BASE_URL: &str = "https://api.microlink.io";

/// Header carrying the API key on the pro plan
const API_KEY_HEADER: &str = "x-api-key";

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_HEALTH_CHECK_TIMEOUT_SECONDS: u64 = 5;

/// Probe target used by the health check
const HEALTH_CHECK_PROBE_URL: &str = "https://example.com";

/// Configuration for the Microlink API client
///
/// Immutable after construction; owned by one client instance. The API key
/// is optional: the free tier works without one.
#[derive(Debug, Clone)]
pub struct MicrolinkConfig {
    /// API key sent as the `x-api-key` header when present
    pub api_key: Option<String>,
    /// Base URL for the Microlink API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Health check timeout in seconds
    pub health_check_timeout_seconds: u64,
    /// Options applied to every call unless overridden per call
    pub default_options: MicrolinkOptions,
}

impl Default for MicrolinkConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            health_check_timeout_seconds: DEFAULT_HEALTH_CHECK_TIMEOUT_SECONDS,
            default_options: MicrolinkOptions::default(),
        }
    }
}

/// Microlink API client for extracting website metadata and link previews
#[derive(Debug)]
pub struct MicrolinkClient {
    client: Client,
    config: MicrolinkConfig,
}

impl MicrolinkClient {
    /// Create a new Microlink API client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created or the
    /// configuration is invalid
    pub fn new(config: MicrolinkConfig) -> Result<Self, MicrolinkError> {
        if config.base_url.trim().is_empty() {
            return Err(MicrolinkError::Config(
                "Base URL cannot be empty".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(api_key) = &config.api_key {
            if api_key.trim().is_empty() {
                return Err(MicrolinkError::Config(
                    "API key cannot be empty when set".to_string(),
                ));
            }
            let value = HeaderValue::from_str(api_key).map_err(|e| {
                MicrolinkError::Config(format!("Invalid API key format: {e}"))
            })?;
            headers.insert(API_KEY_HEADER, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .user_agent("data-api-clients/0.1.0")
            .build()
            .map_err(MicrolinkError::Http)?;

        Ok(Self { client, config })
    }

    /// Extract metadata from a website URL
    ///
    /// Per-call options are overlaid on the configured defaults, the merged
    /// copy is validated before any request is constructed, and the
    /// response runs through the two-tier envelope normalization.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad input (no request is sent), a
    /// transport or timeout error when the request fails, an API error when
    /// the envelope reports failure, a schema error when the body defeats
    /// both normalization tiers, and an empty-success error when a success
    /// envelope carries no data
    #[instrument(skip(self, options), fields(request_id))]
    pub async fn get_metadata(
        &self,
        url: &str,
        options: &MicrolinkOptions,
    ) -> Result<Metadata, MicrolinkError> {
        let request_id = Uuid::new_v4();
        Span::current().record("request_id", request_id.to_string());

        let merged = options.merged_with(&self.config.default_options);
        merged.validate(url)?;
        let query = merged.to_query(url);

        debug!(request_id = %request_id, url, "fetching link metadata");

        let response = timeout(
            Duration::from_secs(self.config.timeout_seconds),
            self.client
                .get(&self.config.base_url)
                .query(query.as_slice())
                .send(),
        )
        .await
        .map_err(|_| MicrolinkError::Timeout {
            seconds: self.config.timeout_seconds,
        })?
        .map_err(MicrolinkError::Http)?;

        let http_status = response.status();
        let body = response.text().await.map_err(MicrolinkError::Http)?;

        // The envelope's status field is authoritative; the HTTP status code
        // only fills the gaps the envelope leaves open.
        match normalize::normalize(&body) {
            Ok(data) => Ok(data),
            Err(MicrolinkError::Api {
                message,
                status_code,
                response,
            }) => {
                warn!(
                    request_id = %request_id,
                    status_code,
                    message,
                    "Microlink API reported failure"
                );
                Err(MicrolinkError::Api {
                    message,
                    status_code: status_code
                        .or_else(|| (!http_status.is_success()).then_some(http_status.as_u16())),
                    response,
                })
            }
            Err(MicrolinkError::InvalidResponse { message }) if !http_status.is_success() => {
                warn!(
                    request_id = %request_id,
                    status = http_status.as_u16(),
                    "Microlink API error without a parseable envelope"
                );
                Err(MicrolinkError::Api {
                    message: format!("HTTP {}: {message}", http_status.as_u16()),
                    status_code: Some(http_status.as_u16()),
                    response: None,
                })
            }
            Err(error) => Err(error),
        }
    }

    /// Capture a screenshot of the target page along with its metadata
    ///
    /// Preset over [`Self::get_metadata`] with `screenshot` enabled; an
    /// explicit per-call `screenshot` value still wins.
    ///
    /// # Errors
    ///
    /// See [`Self::get_metadata`]
    pub async fn get_screenshot(
        &self,
        url: &str,
        options: &MicrolinkOptions,
    ) -> Result<Metadata, MicrolinkError> {
        let options = MicrolinkOptions {
            screenshot: options.screenshot.or(Some(true)),
            ..options.clone()
        };
        self.get_metadata(url, &options).await
    }

    /// Render the target page as a PDF along with its metadata
    ///
    /// Preset over [`Self::get_metadata`] with `pdf` enabled.
    ///
    /// # Errors
    ///
    /// See [`Self::get_metadata`]
    pub async fn get_pdf(
        &self,
        url: &str,
        options: &MicrolinkOptions,
    ) -> Result<Metadata, MicrolinkError> {
        let options = MicrolinkOptions {
            pdf: options.pdf.or(Some(true)),
            ..options.clone()
        };
        self.get_metadata(url, &options).await
    }

    /// Collect performance insights for the target page with its metadata
    ///
    /// Preset over [`Self::get_metadata`] with `insights` enabled.
    ///
    /// # Errors
    ///
    /// See [`Self::get_metadata`]
    pub async fn get_insights(
        &self,
        url: &str,
        options: &MicrolinkOptions,
    ) -> Result<Metadata, MicrolinkError> {
        let options = MicrolinkOptions {
            insights: options.insights.or(Some(true)),
            ..options.clone()
        };
        self.get_metadata(url, &options).await
    }

    /// Extract metadata for many URLs concurrently
    ///
    /// All requests launch immediately; one request's failure never cancels
    /// or affects any other. The result has exactly one entry per input URL
    /// in input order, regardless of completion order.
    pub async fn batch_get_metadata(
        &self,
        urls: Vec<String>,
        options: &MicrolinkOptions,
    ) -> Vec<BatchOutcome<Metadata, MicrolinkError>> {
        info!(count = urls.len(), "fanning out metadata requests");

        batch(urls, |url| async move {
            self.get_metadata(&url, options).await
        })
        .await
    }
}

impl ApiClient for MicrolinkClient {
    async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        debug!(url = self.config.base_url, "performing health check on Microlink API");

        let start_time = std::time::Instant::now();
        let response = timeout(
            Duration::from_secs(self.config.health_check_timeout_seconds),
            self.client
                .get(&self.config.base_url)
                .query(&[("url", HEALTH_CHECK_PROBE_URL)])
                .send(),
        )
        .await
        .map_err(|_| MicrolinkError::Timeout {
            seconds: self.config.health_check_timeout_seconds,
        })?
        .map_err(MicrolinkError::Http)?;

        let response_time = start_time.elapsed();

        match response.status() {
            status if status.is_success() => {
                info!("Microlink API health check passed in {:?}", response_time);
                Ok(HealthStatus::Up)
            }
            StatusCode::UNAUTHORIZED => {
                warn!("Microlink API health check failed: unauthorized");
                Ok(HealthStatus::Down {
                    reason: "Authentication failed".to_string(),
                })
            }
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("Microlink API health check failed: rate limited");
                Ok(HealthStatus::Degraded {
                    reason: "Rate limited".to_string(),
                })
            }
            status => {
                warn!("Microlink API health check failed with status: {}", status);
                Ok(HealthStatus::Degraded {
                    reason: format!("API returned status {}", status.as_u16()),
                })
            }
        }
    }

    fn name(&self) -> &'static str {
        "microlink"
    }
}

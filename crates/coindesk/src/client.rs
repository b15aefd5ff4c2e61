// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! CoinDesk API client
//!
//! Each public operation validates its input, performs a single GET against
//! the configured base URL, and parses the response against a declared
//! payload type. Convenience operations are parameter presets over the
//! primary operations and delegate to them.

use std::time::Duration;

use api_client::{ApiClient, ApiError, HealthStatus, QueryPairs};
use chrono::NaiveDate;
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::types::{
    CurrentPriceInput, HistoricalPriceInput, HistoricalPriceResponse, PriceIndexResponse,
    SupportedCurrenciesResponse, SupportedCurrency, TimePeriod,
};

/// Default base URL for the CoinDesk API
pub const DEFAULT_BASE_URL: &str = "https://api.coindesk.com";

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_HEALTH_CHECK_TIMEOUT_SECONDS: u64 = 5;

/// Configuration for the CoinDesk API client
///
/// Immutable after construction; owned by one client instance. The upstream
/// service requires no API key.
#[derive(Debug, Clone)]
pub struct CoindeskConfig {
    /// Base URL for the CoinDesk API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Health check timeout in seconds
    pub health_check_timeout_seconds: u64,
}

impl Default for CoindeskConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            health_check_timeout_seconds: DEFAULT_HEALTH_CHECK_TIMEOUT_SECONDS,
        }
    }
}

/// Errors specific to the CoinDesk API client
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum CoindeskError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error response
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Caller input failed validation; no request was sent
    #[error("Invalid input for `{field}`: {message}")]
    Validation { field: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Timeout error
    #[error("Request timeout")]
    Timeout { seconds: u64 },
}

impl From<CoindeskError> for ApiError {
    fn from(value: CoindeskError) -> Self {
        match value {
            CoindeskError::Http(error) => ApiError::Http {
                message: error.to_string(),
            },
            CoindeskError::Json(error) => ApiError::InvalidResponse {
                message: error.to_string(),
            },
            CoindeskError::Api { status, message } => ApiError::Api {
                message,
                status_code: Some(status),
            },
            CoindeskError::Validation { field, message } => ApiError::Validation { field, message },
            CoindeskError::Config(message) => ApiError::Configuration { message },
            CoindeskError::Timeout { seconds } => ApiError::Timeout {
                timeout_seconds: seconds,
            },
        }
    }
}

/// CoinDesk API client
#[derive(Debug)]
pub struct CoindeskClient {
    client: Client,
    config: CoindeskConfig,
}

impl CoindeskClient {
    /// Create a new CoinDesk API client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created or the
    /// configuration is invalid
    pub fn new(config: CoindeskConfig) -> Result<Self, CoindeskError> {
        if config.base_url.trim().is_empty() {
            return Err(CoindeskError::Config("Base URL cannot be empty".to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .user_agent("data-api-clients/0.1.0")
            .build()
            .map_err(CoindeskError::Http)?;

        Ok(Self { client, config })
    }

    /// Get the current Bitcoin Price Index
    ///
    /// Without a currency the upstream response covers USD, EUR and GBP;
    /// with one, the response is restricted to that currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed
    pub async fn current_price(
        &self,
        input: &CurrentPriceInput,
    ) -> Result<PriceIndexResponse, CoindeskError> {
        let path = match input.currency {
            Some(currency) => format!("v1/bpi/currentprice/{}.json", currency.path_segment()),
            None => "v1/bpi/currentprice.json".to_string(),
        };

        self.get_json(&path, &QueryPairs::new()).await
    }

    /// Get historical Bitcoin closing prices for a date range
    ///
    /// `start` and `end` must be `YYYY-MM-DD`; unspecified `currency` and
    /// `index` default to USD and always appear in the request. Historical
    /// data is available from July 18, 2010.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any request is sent when a date
    /// bound is malformed; otherwise errors mirror [`Self::current_price`]
    pub async fn historical_price(
        &self,
        input: &HistoricalPriceInput,
    ) -> Result<HistoricalPriceResponse, CoindeskError> {
        let query = historical_query(input)?;
        self.get_json("v1/bpi/historical/close.json", &query).await
    }

    /// Get the most recent closing price
    ///
    /// Preset over [`Self::historical_price`] with the `yesterday` window.
    ///
    /// # Errors
    ///
    /// See [`Self::historical_price`]
    pub async fn yesterday_price(&self) -> Result<HistoricalPriceResponse, CoindeskError> {
        self.historical_price(&HistoricalPriceInput {
            period: Some(TimePeriod::Yesterday),
            ..HistoricalPriceInput::default()
        })
        .await
    }

    /// Get daily closing prices for the last 31 days
    ///
    /// Preset over [`Self::historical_price`]; the upstream serves a 31-day
    /// window when no explicit range is given. The index follows the chosen
    /// currency.
    ///
    /// # Errors
    ///
    /// See [`Self::historical_price`]
    pub async fn last_31_days_price(
        &self,
        currency: Option<SupportedCurrency>,
    ) -> Result<HistoricalPriceResponse, CoindeskError> {
        let currency = currency.unwrap_or(SupportedCurrency::Usd);
        self.historical_price(&HistoricalPriceInput {
            currency: Some(currency),
            index: Some(currency),
            ..HistoricalPriceInput::default()
        })
        .await
    }

    /// Get the current Bitcoin price in one specific currency
    ///
    /// Preset over [`Self::current_price`].
    ///
    /// # Errors
    ///
    /// See [`Self::current_price`]
    pub async fn price_in_currency(
        &self,
        currency: SupportedCurrency,
    ) -> Result<PriceIndexResponse, CoindeskError> {
        self.current_price(&CurrentPriceInput {
            currency: Some(currency),
        })
        .await
    }

    /// Get the list of currencies supported by the price index
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed
    pub async fn supported_currencies(
        &self,
    ) -> Result<SupportedCurrenciesResponse, CoindeskError> {
        self.get_json("v1/bpi/supported-currencies.json", &QueryPairs::new())
            .await
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryPairs,
    ) -> Result<T, CoindeskError> {
        let url = self.endpoint_url(path);

        debug!(url, "fetching from CoinDesk");

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query.as_slice());
        }

        let response = timeout(
            Duration::from_secs(self.config.timeout_seconds),
            request.send(),
        )
        .await
        .map_err(|_| CoindeskError::Timeout {
            seconds: self.config.timeout_seconds,
        })?
        .map_err(CoindeskError::Http)?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await.map_err(CoindeskError::Http)?;
                serde_json::from_str(&body).map_err(CoindeskError::Json)
            }
            status => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                warn!(status = status.as_u16(), message, "CoinDesk API error");
                Err(CoindeskError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

/// Validate historical input and build its query, defaults included
///
/// Surfaces only the first violated constraint, in field declaration order.
fn historical_query(input: &HistoricalPriceInput) -> Result<QueryPairs, CoindeskError> {
    if let Some(start) = &input.start {
        validate_date("start", start)?;
    }
    if let Some(end) = &input.end {
        validate_date("end", end)?;
    }

    let currency = input.currency.unwrap_or(SupportedCurrency::Usd);
    let index = input.index.unwrap_or(SupportedCurrency::Usd);

    let mut query = QueryPairs::new();
    query.push_opt("start", input.start.as_deref());
    query.push_opt("end", input.end.as_deref());
    query.push("currency", currency);
    query.push("index", index);
    query.push_opt("for", input.period.map(TimePeriod::as_query_value));

    Ok(query)
}

fn validate_date(field: &str, value: &str) -> Result<(), CoindeskError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| CoindeskError::Validation {
        field: field.to_string(),
        message: format!("expected a YYYY-MM-DD date, got \"{value}\""),
    })?;
    Ok(())
}

impl ApiClient for CoindeskClient {
    async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        let url = self.endpoint_url("v1/bpi/currentprice.json");

        debug!(url, "performing health check on CoinDesk API");

        let start_time = std::time::Instant::now();
        let response = timeout(
            Duration::from_secs(self.config.health_check_timeout_seconds),
            self.client.get(&url).send(),
        )
        .await
        .map_err(|_| CoindeskError::Timeout {
            seconds: self.config.health_check_timeout_seconds,
        })?
        .map_err(CoindeskError::Http)?;

        let response_time = start_time.elapsed();

        match response.status() {
            StatusCode::OK => {
                info!("CoinDesk API health check passed in {:?}", response_time);
                Ok(HealthStatus::Up)
            }
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("CoinDesk API health check failed: rate limited");
                Ok(HealthStatus::Degraded {
                    reason: "Rate limited".to_string(),
                })
            }
            status => {
                warn!("CoinDesk API health check failed with status: {}", status);
                Ok(HealthStatus::Degraded {
                    reason: format!("API returned status {}", status.as_u16()),
                })
            }
        }
    }

    fn name(&self) -> &'static str {
        "coindesk"
    }
}
